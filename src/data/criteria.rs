use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::DeploymentType;
use crate::error::QueryError;

/// Lowest body-wave magnitude a query may ask for.
pub const MAGNITUDE_FLOOR: f64 = 0.0;
/// Highest body-wave magnitude a query may ask for.
pub const MAGNITUDE_CEIL: f64 = 10.0;

/// First day covered by the dataset (Trinity).
pub fn era_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1945, 7, 16).unwrap_or(NaiveDate::MIN)
}

/// Last day covered by the dataset.
pub fn era_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(1969, 12, 29).unwrap_or(NaiveDate::MAX)
}

// ---------------------------------------------------------------------------
// Criteria – one filter request
// ---------------------------------------------------------------------------

/// A user's filter request. Constructed fresh for every query.
///
/// An empty `types` set means no restriction on deployment type.
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    pub min_magnitude: f64,
    pub max_magnitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub types: BTreeSet<DeploymentType>,
    pub sort_ascending: bool,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            min_magnitude: MAGNITUDE_FLOOR,
            max_magnitude: MAGNITUDE_CEIL,
            start_date: era_start(),
            end_date: era_end(),
            types: BTreeSet::new(),
            sort_ascending: true,
        }
    }
}

impl Criteria {
    pub fn with_magnitude(mut self, min: f64, max: f64) -> Self {
        self.min_magnitude = min;
        self.max_magnitude = max;
        self
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_types(mut self, types: impl IntoIterator<Item = DeploymentType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    pub fn descending(mut self) -> Self {
        self.sort_ascending = false;
        self
    }

    /// Check the bounds before the request reaches the filter engine.
    pub fn validate(&self) -> Result<(), QueryError> {
        for value in [self.min_magnitude, self.max_magnitude] {
            if !(MAGNITUDE_FLOOR..=MAGNITUDE_CEIL).contains(&value) {
                return Err(QueryError::MagnitudeOutOfBounds { value });
            }
        }
        if self.min_magnitude > self.max_magnitude {
            return Err(QueryError::InvertedMagnitudeRange {
                min: self.min_magnitude,
                max: self.max_magnitude,
            });
        }
        for date in [self.start_date, self.end_date] {
            if !(era_start()..=era_end()).contains(&date) {
                return Err(QueryError::DateOutOfBounds { date });
            }
        }
        if self.start_date > self.end_date {
            return Err(QueryError::InvertedDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Repair raw widget input: swap inverted bounds, clamp to the
    /// supported domain. The result always passes [`Criteria::validate`].
    pub fn normalized(mut self) -> Self {
        let clamp = |v: f64| {
            if v.is_nan() {
                MAGNITUDE_FLOOR
            } else {
                v.clamp(MAGNITUDE_FLOOR, MAGNITUDE_CEIL)
            }
        };
        let (lo, hi) = (clamp(self.min_magnitude), clamp(self.max_magnitude));
        self.min_magnitude = lo.min(hi);
        self.max_magnitude = lo.max(hi);

        let (start, end) = (
            self.start_date.clamp(era_start(), era_end()),
            self.end_date.clamp(era_start(), era_end()),
        );
        self.start_date = start.min(end);
        self.end_date = start.max(end);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_covers_the_whole_era() {
        let c = Criteria::default();
        assert_eq!(c.start_date, date(1945, 7, 16));
        assert_eq!(c.end_date, date(1969, 12, 29));
        assert!(c.types.is_empty());
        assert!(c.sort_ascending);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn inverted_magnitudes_are_rejected() {
        let c = Criteria::default().with_magnitude(7.0, 3.0);
        assert_eq!(
            c.validate(),
            Err(QueryError::InvertedMagnitudeRange { min: 7.0, max: 3.0 })
        );
    }

    #[test]
    fn out_of_domain_values_are_rejected() {
        let c = Criteria::default().with_magnitude(-1.0, 3.0);
        assert!(matches!(
            c.validate(),
            Err(QueryError::MagnitudeOutOfBounds { .. })
        ));
        let c = Criteria::default().with_magnitude(f64::NAN, 3.0);
        assert!(c.validate().is_err());
        let c = Criteria::default().with_dates(date(1944, 1, 1), date(1950, 1, 1));
        assert!(matches!(
            c.validate(),
            Err(QueryError::DateOutOfBounds { .. })
        ));
        let c = Criteria::default().with_dates(date(1960, 1, 1), date(1950, 1, 1));
        assert!(matches!(
            c.validate(),
            Err(QueryError::InvertedDateRange { .. })
        ));
    }

    #[test]
    fn normalized_repairs_raw_input() {
        let c = Criteria::default()
            .with_magnitude(12.0, 4.0)
            .with_dates(date(1970, 6, 1), date(1940, 1, 1))
            .normalized();
        assert_eq!((c.min_magnitude, c.max_magnitude), (4.0, 10.0));
        assert_eq!(c.start_date, era_start());
        assert_eq!(c.end_date, era_end());
        assert!(c.validate().is_ok());
    }
}
