use std::sync::Arc;

use eframe::egui;
use rusty_fallout::config::Settings;
use rusty_fallout::data::Dataset;

use crate::state::{AppState, Page};
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyFalloutApp {
    pub state: AppState,
}

impl RustyFalloutApp {
    pub fn new(dataset: Arc<Dataset>, settings: Settings) -> Self {
        Self {
            state: AppState::new(dataset, settings),
        }
    }
}

impl eframe::App for RustyFalloutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation and query widgets ----
        egui::SidePanel::left("nav_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Home => pages::home(ui, &self.state),
            Page::ExplosionFinder => pages::explosion_finder(ui, &self.state),
            Page::DataVisualizations => pages::data_visualizations(ui, &self.state),
            Page::TestStatistics => pages::test_statistics(ui, &mut self.state),
            Page::InteractiveMap => pages::interactive_map(ui, &self.state),
        });
    }
}
