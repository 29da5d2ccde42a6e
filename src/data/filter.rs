use chrono::NaiveDate;
use serde::Serialize;

use super::criteria::Criteria;
use super::model::{Dataset, DeploymentType, ExplosionRecord};

// ---------------------------------------------------------------------------
// FilteredRow – the projected columns of the finder table
// ---------------------------------------------------------------------------

/// One row of a filtered view. Magnitude and date are always present:
/// rows without them never pass the filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredRow {
    pub source_country: String,
    pub deployment_location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub magnitude_body: f64,
    pub deployment_type: DeploymentType,
    pub date: NaiveDate,
}

impl FilteredRow {
    fn project(record: &ExplosionRecord, magnitude_body: f64, date: NaiveDate) -> Self {
        FilteredRow {
            source_country: record.source_country.clone(),
            deployment_location: record.deployment_location.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            magnitude_body,
            deployment_type: record.deployment_type.clone(),
            date,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Apply `criteria` to the dataset and return the projected rows sorted
/// by deployment location.
///
/// A record passes when:
/// * it has a magnitude inside `[min_magnitude, max_magnitude]`
/// * it has a valid date inside `[start_date, end_date]`
/// * `types` is empty, or contains its deployment type
///
/// Records failing any check are dropped silently. Criteria that violate
/// their own bounds simply match nothing. The sort is stable, so rows at
/// the same location keep dataset order in either direction.
pub fn filter(dataset: &Dataset, criteria: &Criteria) -> Vec<FilteredRow> {
    let mut rows: Vec<FilteredRow> = dataset
        .records()
        .iter()
        .filter_map(|record| {
            let magnitude = record.magnitude_body?;
            if !(criteria.min_magnitude <= magnitude && magnitude <= criteria.max_magnitude) {
                return None;
            }
            let date = record.date()?;
            if date < criteria.start_date || date > criteria.end_date {
                return None;
            }
            if !criteria.types.is_empty() && !criteria.types.contains(&record.deployment_type) {
                return None;
            }
            Some(FilteredRow::project(record, magnitude, date))
        })
        .collect();

    if criteria.sort_ascending {
        rows.sort_by(|a, b| a.deployment_location.cmp(&b.deployment_location));
    } else {
        rows.sort_by(|a, b| b.deployment_location.cmp(&a.deployment_location));
    }

    log::debug!(
        "filter kept {} of {} records (magnitude {}..={}, {}..={}, {} types)",
        rows.len(),
        dataset.len(),
        criteria.min_magnitude,
        criteria.max_magnitude,
        criteria.start_date,
        criteria.end_date,
        criteria.types.len()
    );
    rows
}
