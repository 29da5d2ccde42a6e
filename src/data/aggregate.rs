//! Derived summaries for the charts and statistics pages.
//!
//! Every function here recomputes from the records it is handed and
//! never keeps state between calls.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use chrono::Datelike;
use regex::RegexBuilder;
use serde::Serialize;

use super::model::{DeploymentType, ExplosionRecord};
use crate::error::QueryError;

/// Bin count used by the magnitude distribution chart.
pub const DEFAULT_HISTOGRAM_BINS: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Explosions per calendar year, oldest first. Only populated years are
/// reported; records without a valid date are left out.
pub fn count_by_year(records: &[ExplosionRecord]) -> Vec<YearCount> {
    let mut buckets: BTreeMap<i32, usize> = BTreeMap::new();
    for date in records.iter().filter_map(ExplosionRecord::date) {
        *buckets.entry(date.year()).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Dense version of a sparse yearly series for plotting: every year
/// between the first and last bucket, missing ones as zero.
pub fn fill_year_gaps(series: &[YearCount]) -> Vec<YearCount> {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Vec::new();
    };
    let known: BTreeMap<i32, usize> = series.iter().map(|b| (b.year, b.count)).collect();
    (first.year..=last.year)
        .map(|year| YearCount {
            year,
            count: known.get(&year).copied().unwrap_or(0),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub low: f64,
    pub high: f64,
    pub count: usize,
}

/// Equal-width histogram over `[min, max]` of the non-null values.
///
/// Bins are `[low, high)` except the last, which also takes `max`. When
/// every value is the same the range is widened to `v ± 0.5`. No values
/// gives no bins.
pub fn magnitude_histogram(
    values: impl IntoIterator<Item = Option<f64>>,
    bins: NonZeroUsize,
) -> Vec<HistogramBin> {
    let values: Vec<f64> = values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();
    let Some((mut lo, mut hi)) = min_max(values.iter().copied()) else {
        return Vec::new();
    };
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let n = bins.get();
    let width = (hi - lo) / n as f64;
    let edges: Vec<f64> = (0..=n)
        .map(|i| if i == n { hi } else { lo + width * i as f64 })
        .collect();

    let mut counts = vec![0usize; n];
    for v in values {
        let mut idx = (((v - lo) / width) as usize).min(n - 1);
        // Floating point can put a value one bin off its edges.
        if idx > 0 && v < edges[idx] {
            idx -= 1;
        } else if idx + 1 < n && v >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            low: edges[i],
            high: edges[i + 1],
            count,
        })
        .collect()
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// All records, measured or not.
    pub count: usize,
    pub min_magnitude: Option<f64>,
    pub max_magnitude: Option<f64>,
    pub mean_magnitude: Option<f64>,
}

pub fn summary_statistics(records: &[ExplosionRecord]) -> SummaryStatistics {
    let magnitudes = || records.iter().filter_map(|r| r.magnitude_body);
    let range = min_max(magnitudes());
    let measured = magnitudes().count();
    let mean_magnitude = (measured > 0).then(|| magnitudes().sum::<f64>() / measured as f64);

    SummaryStatistics {
        count: records.len(),
        min_magnitude: range.map(|(lo, _)| lo),
        max_magnitude: range.map(|(_, hi)| hi),
        mean_magnitude,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OriginCount {
    pub country: String,
    pub count: usize,
}

/// Records per source country, most active first, ties by name.
pub fn count_by_origin(records: &[ExplosionRecord]) -> Vec<OriginCount> {
    let mut buckets: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        *buckets.entry(r.source_country.as_str()).or_default() += 1;
    }
    let mut out: Vec<OriginCount> = buckets
        .into_iter()
        .map(|(country, count)| OriginCount {
            country: country.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

// ---------------------------------------------------------------------------
// Name search
// ---------------------------------------------------------------------------

/// How the search term is matched against test names. Both modes ignore case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Plain substring.
    Literal(String),
    /// Regular expression.
    Pattern(String),
}

impl SearchQuery {
    pub fn term(&self) -> &str {
        match self {
            SearchQuery::Literal(t) | SearchQuery::Pattern(t) => t,
        }
    }
}

/// Projected row of the search results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub source_country: String,
    pub deployment_location: String,
    pub magnitude_body: Option<f64>,
    pub name: String,
    pub purpose: String,
    pub deployment_type: DeploymentType,
}

impl From<&ExplosionRecord> for SearchHit {
    fn from(r: &ExplosionRecord) -> Self {
        SearchHit {
            source_country: r.source_country.clone(),
            deployment_location: r.deployment_location.clone(),
            magnitude_body: r.magnitude_body,
            name: r.name.clone(),
            purpose: r.purpose.clone(),
            deployment_type: r.deployment_type.clone(),
        }
    }
}

/// Records whose name matches `query`, in dataset order.
///
/// An empty term matches everything. `Ok` with no hits means nothing
/// matched; `Err` means the pattern itself is unusable.
pub fn text_search(
    records: &[ExplosionRecord],
    query: &SearchQuery,
) -> Result<Vec<SearchHit>, QueryError> {
    let hits: Vec<SearchHit> = match query {
        SearchQuery::Literal(term) => {
            let needle = term.to_lowercase();
            records
                .iter()
                .filter(|r| r.name.to_lowercase().contains(&needle))
                .map(SearchHit::from)
                .collect()
        }
        SearchQuery::Pattern(expr) => {
            let re = RegexBuilder::new(expr)
                .case_insensitive(true)
                .build()
                .map_err(|e| QueryError::MalformedPattern(e.to_string()))?;
            records
                .iter()
                .filter(|r| re.is_match(&r.name))
                .map(SearchHit::from)
                .collect()
        }
    };
    log::debug!("search {:?} matched {} records", query.term(), hits.len());
    Ok(hits)
}
