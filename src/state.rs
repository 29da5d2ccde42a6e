use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rusty_fallout::color::TypeColors;
use rusty_fallout::config::Settings;
use rusty_fallout::data::{
    self, export, Criteria, Dataset, DeploymentType, FilteredRow, HistogramBin, MapPoint,
    OriginCount, SearchHit, SearchQuery, SummaryStatistics, YearCount,
};
use rusty_fallout::QueryError;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    ExplosionFinder,
    DataVisualizations,
    TestStatistics,
    InteractiveMap,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::ExplosionFinder,
        Page::DataVisualizations,
        Page::TestStatistics,
        Page::InteractiveMap,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home Page",
            Page::ExplosionFinder => "Explosion Finder",
            Page::DataVisualizations => "Data Visualizations",
            Page::TestStatistics => "Nuclear Test Statistics",
            Page::InteractiveMap => "Interactive Map",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Every derived view is
/// recomputed from `dataset` when the input that drives it changes.
pub struct AppState {
    /// Loaded once at startup, never mutated.
    pub dataset: Arc<Dataset>,
    pub settings: Settings,
    pub page: Page,

    /// Raw finder input, normalised before each query.
    pub criteria: Criteria,
    /// Rows passing the current criteria.
    pub filtered: Vec<FilteredRow>,

    pub yearly: Vec<YearCount>,
    pub histogram: Vec<HistogramBin>,
    pub summary: SummaryStatistics,
    pub origins: Vec<OriginCount>,

    pub search_term: String,
    pub search_as_pattern: bool,
    /// `None` until the first search is run.
    pub search_result: Option<Result<Vec<SearchHit>, QueryError>>,

    pub map_points: Vec<MapPoint>,
    pub type_colors: TypeColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, settings: Settings) -> Self {
        let records = dataset.records();
        let yearly = data::fill_year_gaps(&data::count_by_year(records));
        let histogram = data::magnitude_histogram(dataset.magnitudes(), settings.histogram_bins);
        let summary = data::summary_statistics(records);
        let origins = data::count_by_origin(records);
        let map_points = data::extract_by_origin(records, &settings.map_origin);
        let type_colors = TypeColors::new(dataset.deployment_types());

        let mut state = Self {
            dataset,
            settings,
            page: Page::Home,
            criteria: Criteria::default(),
            filtered: Vec::new(),
            yearly,
            histogram,
            summary,
            origins,
            search_term: String::new(),
            search_as_pattern: false,
            search_result: None,
            map_points,
            type_colors,
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Recompute `filtered` after a criteria change.
    pub fn refilter(&mut self) {
        self.criteria = self.criteria.clone().normalized();
        match self.criteria.validate() {
            Ok(()) => {
                self.filtered = data::filter(&self.dataset, &self.criteria);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("rejected criteria: {e}");
                self.filtered.clear();
                self.status_message = Some(format!("Invalid filter: {e}"));
            }
        }
    }

    /// Toggle a single deployment type in the finder's selection.
    pub fn toggle_type(&mut self, kind: &DeploymentType) {
        if !self.criteria.types.remove(kind) {
            self.criteria.types.insert(kind.clone());
        }
        self.refilter();
    }

    /// Clear the type selection (no type restriction).
    pub fn clear_types(&mut self) {
        self.criteria.types.clear();
        self.refilter();
    }

    pub fn run_search(&mut self) {
        let term = self.search_term.trim().to_string();
        let query = if self.search_as_pattern {
            SearchQuery::Pattern(term)
        } else {
            SearchQuery::Literal(term)
        };
        self.search_result = Some(data::text_search(self.dataset.records(), &query));
    }

    /// Write the current finder rows; format chosen by extension.
    pub fn export_filtered(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            export::write_json(&self.filtered, file)?;
        } else {
            export::write_csv(&self.filtered, file)?;
        }
        log::info!("Exported {} rows to {}", self.filtered.len(), path.display());
        Ok(())
    }
}
