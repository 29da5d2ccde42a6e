use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};
use egui_extras::DatePickerButton;
use rusty_fallout::data::criteria::{MAGNITUDE_CEIL, MAGNITUDE_FLOOR};
use rusty_fallout::data::DeploymentType;

use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation and finder widgets
// ---------------------------------------------------------------------------

/// Render the left panel: page selector, plus the query widgets when the
/// finder is open.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Select Page");
    ui.separator();
    for page in Page::ALL {
        ui.selectable_value(&mut state.page, page, page.title());
    }
    ui.separator();

    if state.page != Page::ExplosionFinder {
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let mut changed = false;

            // ---- Magnitude range ----
            ui.strong("Magnitude Range");
            changed |= ui
                .add(
                    Slider::new(&mut state.criteria.min_magnitude, MAGNITUDE_FLOOR..=MAGNITUDE_CEIL)
                        .text("min"),
                )
                .changed();
            changed |= ui
                .add(
                    Slider::new(&mut state.criteria.max_magnitude, MAGNITUDE_FLOOR..=MAGNITUDE_CEIL)
                        .text("max"),
                )
                .changed();
            ui.separator();

            // ---- Time frame ----
            ui.strong("Timeline");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Start");
                changed |= ui
                    .add(DatePickerButton::new(&mut state.criteria.start_date).id_salt("start_date"))
                    .changed();
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("End");
                changed |= ui
                    .add(DatePickerButton::new(&mut state.criteria.end_date).id_salt("end_date"))
                    .changed();
            });
            ui.separator();

            // ---- Sort order ----
            ui.strong("Sort by deployment location");
            ui.horizontal(|ui: &mut Ui| {
                changed |= ui
                    .radio_value(&mut state.criteria.sort_ascending, true, "Ascending")
                    .changed();
                changed |= ui
                    .radio_value(&mut state.criteria.sort_ascending, false, "Descending")
                    .changed();
            });
            ui.separator();

            if changed {
                state.refilter();
            }

            // ---- Deployment types ----
            let n_selected = state.criteria.types.len();
            let header = if n_selected == 0 {
                "Deployment Method  (all)".to_string()
            } else {
                format!("Deployment Method  ({n_selected} selected)")
            };
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    if ui.small_button("Any type").clicked() {
                        state.clear_types();
                    }
                    for kind in type_choices(state) {
                        let mut checked = state.criteria.types.contains(&kind);
                        let text = RichText::new(kind.label()).color(state.type_colors.color_for(&kind));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_type(&kind);
                        }
                    }
                });
        });
}

/// Known types first, then any extra labels found in the data.
fn type_choices(state: &AppState) -> Vec<DeploymentType> {
    let extras = state
        .dataset
        .deployment_types()
        .iter()
        .filter(|kind| matches!(kind, DeploymentType::Other(label) if !label.is_empty()))
        .cloned();
    DeploymentType::KNOWN.iter().cloned().chain(extras).collect()
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered view…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} explosions loaded, {} match the finder",
            state.dataset.len(),
            state.filtered.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

/// Ask for the dataset when none was configured.
pub fn pick_dataset_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open nuclear explosions dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}

fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered explosions")
        .set_file_name("filtered_explosions.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_filtered(&path) {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
