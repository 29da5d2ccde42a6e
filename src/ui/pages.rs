use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Page};
use crate::ui::{plot, tables};

fn show_magnitude(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}"))
}

pub fn home(ui: &mut Ui, state: &AppState) {
    ui.heading("Nuclear Explosions Project");
    ui.add_space(8.0);
    ui.label("Explore every recorded nuclear explosion of the first test era.");
    ui.label("Pick a page in the side panel:");
    for page in &Page::ALL[1..] {
        ui.label(format!("• {}", page.title()));
    }
    ui.add_space(8.0);
    ui.separator();
    if let Some(path) = &state.settings.dataset_path {
        ui.label(format!("Dataset: {}", path.display()));
    }
    ui.label(format!(
        "{} records from {} countries, {} deployment methods",
        state.dataset.len(),
        state.dataset.source_countries().len(),
        state.dataset.deployment_types().len()
    ));
}

pub fn explosion_finder(ui: &mut Ui, state: &AppState) {
    ui.heading("Nuclear Explosion Finder");
    ui.label(format!("Refined Nuclear Explosions: {}", state.filtered.len()));
    ui.separator();
    if state.filtered.is_empty() {
        ui.label("No explosions match the current filters.");
        return;
    }
    tables::filtered_table(ui, &state.filtered);
}

pub fn data_visualizations(ui: &mut Ui, state: &AppState) {
    ui.heading("Data Visualizations");
    let half = (ui.available_height() - 40.0).max(200.0) / 2.0;
    ui.strong("Number of Nuclear Explosions Over Time");
    plot::time_plot(ui, &state.yearly, half);
    ui.strong("Frequency Distribution of Magnitude");
    plot::magnitude_plot(ui, &state.histogram, half);
}

pub fn test_statistics(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Nuclear Test Statistics");
    ui.separator();

    ui.strong("Summary Statistics");
    egui::Grid::new("summary_stats")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Total Number of Explosions:");
            ui.label(state.summary.count.to_string());
            ui.end_row();
            ui.label("Maximum Magnitude:");
            ui.label(show_magnitude(state.summary.max_magnitude));
            ui.end_row();
            ui.label("Minimum Magnitude:");
            ui.label(show_magnitude(state.summary.min_magnitude));
            ui.end_row();
            ui.label("Mean Magnitude:");
            ui.label(show_magnitude(state.summary.mean_magnitude));
            ui.end_row();
        });

    ui.add_space(6.0);
    egui::CollapsingHeader::new("Explosions by origin")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("origin_counts").striped(true).show(ui, |ui: &mut Ui| {
                for origin in &state.origins {
                    ui.label(&origin.country);
                    ui.label(origin.count.to_string());
                    ui.end_row();
                }
            });
        });
    ui.separator();

    ui.strong("Enter Name of Nuclear Test for Specific Stats");
    let mut submit = false;
    ui.horizontal(|ui: &mut Ui| {
        let response = ui.text_edit_singleline(&mut state.search_term);
        submit |= response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        ui.checkbox(&mut state.search_as_pattern, "Pattern");
        submit |= ui.button("Search").clicked();
    });
    if submit {
        state.run_search();
    }

    match &state.search_result {
        None => {}
        Some(Err(e)) => {
            ui.label(RichText::new(format!("Search failed: {e}")).color(Color32::RED));
        }
        Some(Ok(hits)) if hits.is_empty() => {
            ui.label("No matching results found.");
        }
        Some(Ok(hits)) => {
            ui.label(format!("Search Results: {}", hits.len()));
            tables::search_table(ui, hits);
        }
    }
}

pub fn interactive_map(ui: &mut Ui, state: &AppState) {
    ui.heading(format!(
        "Interactive Map of {} Made Nuclear Weapons",
        state.settings.map_origin
    ));
    let placed = state.map_points.iter().filter(|p| p.position().is_some()).count();
    ui.label(format!(
        "{} explosions, {} with known coordinates. The view opens on the Nevada Test Site. Drag and zoom to explore, or double-click to show every site.",
        state.map_points.len(),
        placed
    ));
    plot::map_plot(ui, state);
}
