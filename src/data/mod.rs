/// Data layer: core types, loading, querying and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ Arc<Dataset>  │  Vec<ExplosionRecord>, type/country index
///   └──────────────┘
///        │
///        ├──────────────┬────────────────┐
///        ▼              ▼                ▼
///   ┌──────────┐  ┌───────────┐   ┌──────────┐
///   │  filter   │  │ aggregate  │   │   geo     │
///   └──────────┘  └───────────┘   └──────────┘
///   Criteria →     yearly counts,   origin →
///   sorted rows    histogram,       map points
///                  stats, search
/// ```

pub mod aggregate;
pub mod criteria;
pub mod export;
pub mod filter;
pub mod geo;
pub mod loader;
pub mod model;

pub use aggregate::{
    count_by_origin, count_by_year, fill_year_gaps, magnitude_histogram, summary_statistics,
    text_search, HistogramBin, OriginCount, SearchHit, SearchQuery, SummaryStatistics, YearCount,
    DEFAULT_HISTOGRAM_BINS,
};
pub use criteria::Criteria;
pub use filter::{filter, FilteredRow};
pub use geo::{extract_by_origin, map_view_bounds, MapPoint};
pub use loader::load_file;
pub use model::{Dataset, DeploymentType, ExplosionRecord};
