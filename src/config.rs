//! Runtime settings.
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. JSON file named by `RUSTY_FALLOUT_SETTINGS`
//! 3. `RUSTY_FALLOUT_DATA` environment variable (dataset path)
//! 4. first positional command-line argument (dataset path)

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::aggregate::DEFAULT_HISTOGRAM_BINS;
use crate::data::geo::{DEFAULT_MAP_ORIGIN, NEVADA_TEST_SITE};

pub const SETTINGS_ENV: &str = "RUSTY_FALLOUT_SETTINGS";
pub const DATA_ENV: &str = "RUSTY_FALLOUT_DATA";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Dataset to load at startup. When unset the user is asked for one.
    pub dataset_path: Option<PathBuf>,
    pub histogram_bins: NonZeroUsize,
    /// Source country plotted on the map page.
    pub map_origin: String,
    /// Map centre as (lat, lon).
    pub map_center: (f64, f64),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: None,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            map_origin: DEFAULT_MAP_ORIGIN.to_string(),
            map_center: NEVADA_TEST_SITE,
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing settings JSON")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Resolve settings from the process environment and arguments.
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            std::env::var_os(SETTINGS_ENV).map(PathBuf::from),
            std::env::var_os(DATA_ENV).map(PathBuf::from),
            std::env::args_os().nth(1).map(PathBuf::from),
        )
    }

    fn resolve(
        settings_file: Option<PathBuf>,
        env_dataset: Option<PathBuf>,
        arg_dataset: Option<PathBuf>,
    ) -> Result<Self> {
        let mut settings = match settings_file {
            Some(path) => {
                log::debug!("reading settings from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        if let Some(path) = arg_dataset.or(env_dataset) {
            settings.dataset_path = Some(path);
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "histogram_bins": 25 }"#).unwrap();
        assert_eq!(s.histogram_bins.get(), 25);
        assert_eq!(s.map_origin, "USA");
        assert_eq!(s.map_center, (37.04, -116.16));
        assert_eq!(s.dataset_path, None);
    }

    #[test]
    fn zero_bins_and_unknown_keys_are_rejected() {
        assert!(Settings::from_json(r#"{ "histogram_bins": 0 }"#).is_err());
        assert!(Settings::from_json(r#"{ "colour": "purple" }"#).is_err());
    }

    #[test]
    fn argument_beats_environment_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.json");
        std::fs::write(
            &file,
            r#"{ "dataset_path": "from_file.csv", "map_origin": "France" }"#,
        )
        .unwrap();

        let s = Settings::resolve(Some(file.clone()), None, None).unwrap();
        assert_eq!(s.dataset_path, Some(PathBuf::from("from_file.csv")));
        assert_eq!(s.map_origin, "France");

        let s = Settings::resolve(Some(file.clone()), Some("env.csv".into()), None).unwrap();
        assert_eq!(s.dataset_path, Some(PathBuf::from("env.csv")));

        let s = Settings::resolve(Some(file), Some("env.csv".into()), Some("arg.csv".into()))
            .unwrap();
        assert_eq!(s.dataset_path, Some(PathBuf::from("arg.csv")));
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        assert!(Settings::resolve(Some("/no/such/settings.json".into()), None, None).is_err());
    }
}
