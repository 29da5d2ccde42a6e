//! egui rendering. Widgets collect input into [`crate::state::AppState`];
//! everything shown is produced by the `rusty_fallout::data` functions.

pub mod pages;
pub mod panels;
pub mod plot;
pub mod tables;
