use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};
use rusty_fallout::data::{FilteredRow, SearchHit};

const ROW_HEIGHT: f32 = 18.0;

fn coordinate(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.3}")).unwrap_or_default()
}

fn header_row(header: &mut egui_extras::TableRow<'_, '_>, titles: &[&str]) {
    for title in titles {
        header.col(|ui| {
            ui.strong(*title);
        });
    }
}

/// Finder results: origin, location, coordinates, magnitude, type, date.
pub fn filtered_table(ui: &mut Ui, rows: &[FilteredRow]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(70.0), 6)
        .column(Column::remainder())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            header_row(
                &mut header,
                &["Country", "Location", "Latitude", "Longitude", "Magnitude", "Type", "Date"],
            );
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui| {
                    ui.label(&r.source_country);
                });
                row.col(|ui| {
                    ui.label(&r.deployment_location);
                });
                row.col(|ui| {
                    ui.label(coordinate(r.latitude));
                });
                row.col(|ui| {
                    ui.label(coordinate(r.longitude));
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", r.magnitude_body));
                });
                row.col(|ui| {
                    ui.label(r.deployment_type.label());
                });
                row.col(|ui| {
                    ui.label(r.date.to_string());
                });
            });
        });
}

/// Name search results: origin, location, magnitude, name, purpose, type.
pub fn search_table(ui: &mut Ui, hits: &[SearchHit]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(70.0), 5)
        .column(Column::remainder())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            header_row(
                &mut header,
                &["Country", "Location", "Magnitude", "Name", "Purpose", "Type"],
            );
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, hits.len(), |mut row| {
                let h = &hits[row.index()];
                row.col(|ui| {
                    ui.label(&h.source_country);
                });
                row.col(|ui| {
                    ui.label(&h.deployment_location);
                });
                row.col(|ui| {
                    ui.label(h.magnitude_body.map(|m| format!("{m:.1}")).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(&h.name);
                });
                row.col(|ui| {
                    ui.label(&h.purpose);
                });
                row.col(|ui| {
                    ui.label(h.deployment_type.label());
                });
            });
        });
}
