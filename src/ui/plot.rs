use std::collections::BTreeMap;

use eframe::egui::{Color32, Id, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotBounds, PlotPoints, Points};
use rusty_fallout::data::{map_view_bounds, DeploymentType, HistogramBin, YearCount};

use crate::state::AppState;

const CHART_COLOR: Color32 = Color32::from_rgb(128, 0, 128);

// ---------------------------------------------------------------------------
// Explosions per year
// ---------------------------------------------------------------------------

pub fn time_plot(ui: &mut Ui, yearly: &[YearCount], height: f32) {
    let points: PlotPoints = yearly
        .iter()
        .map(|b| [b.year as f64, b.count as f64])
        .collect();

    Plot::new("time_plot")
        .height(height)
        .x_axis_label("Year")
        .y_axis_label("Number of Explosions")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(CHART_COLOR).width(2.0).name("explosions"));
        });
}

// ---------------------------------------------------------------------------
// Magnitude distribution
// ---------------------------------------------------------------------------

pub fn magnitude_plot(ui: &mut Ui, bins: &[HistogramBin], height: f32) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new((b.low + b.high) / 2.0, b.count as f64)
                .width(b.high - b.low)
                .name(format!("{:.2} – {:.2}", b.low, b.high))
        })
        .collect();

    Plot::new("magnitude_plot")
        .height(height)
        .x_axis_label("Magnitude")
        .y_axis_label("Frequency")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(CHART_COLOR));
        });
}

// ---------------------------------------------------------------------------
// Deployment sites
// ---------------------------------------------------------------------------

/// Scatter of lon/lat, one series per deployment type. Points without
/// coordinates are skipped here, not in the extract.
pub fn map_plot(ui: &mut Ui, state: &AppState) {
    let mut by_type: BTreeMap<&DeploymentType, Vec<[f64; 2]>> = BTreeMap::new();
    for point in &state.map_points {
        if let Some(pos) = point.position() {
            by_type.entry(&point.deployment_type).or_default().push(pos);
        }
    }

    // Frame the configured centre once; after that the user owns the view.
    let opened = Id::new("deployment_map_opened");
    let first_show = !ui.data(|d| d.get_temp::<bool>(opened).unwrap_or(false));
    let (min, max) = map_view_bounds(state.settings.map_center);

    Plot::new("deployment_map")
        .legend(Legend::default())
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .label_formatter(|name, value| {
            format!("Type: {name}\nLatitude: {:.3}\nLongitude: {:.3}", value.y, value.x)
        })
        .show(ui, |plot_ui| {
            if first_show {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
            }
            for (kind, positions) in by_type {
                plot_ui.points(
                    Points::new(PlotPoints::from(positions))
                        .radius(4.0)
                        .color(state.type_colors.color_for(kind))
                        .name(kind.label()),
                );
            }
        });
    if first_show {
        ui.data_mut(|d| d.insert_temp(opened, true));
    }
}
