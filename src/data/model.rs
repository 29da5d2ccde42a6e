use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Cell – a single raw value as it came out of the source file
// ---------------------------------------------------------------------------

/// A loosely-typed source value. Loaders produce these; the record builder
/// turns them into the strongly-typed fields of [`ExplosionRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Null => Ok(()),
        }
    }
}

impl Cell {
    /// Guess the type of a text cell the way a dataframe reader would.
    pub fn guess(s: &str) -> Cell {
        let s = s.trim();
        if s.is_empty() {
            return Cell::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Cell::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Cell::Float(f);
        }
        if s == "true" || s == "false" {
            return Cell::Bool(s == "true");
        }
        Cell::Text(s.to_string())
    }

    /// Interpret the value as a finite `f64`. NaN and non-numbers become `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Cell::Float(v) => *v,
            Cell::Integer(i) => *i as f64,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Bool(_) | Cell::Null => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Interpret the value as a whole number. Integral floats (`1962.0`) are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Integer(i) => Some(*i),
            Cell::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            Cell::Text(s) => match Cell::guess(s) {
                numeric @ (Cell::Integer(_) | Cell::Float(_)) => numeric.as_i64(),
                _ => None,
            },
            _ => None,
        }
    }

    /// Text form of the value; `Null` becomes an empty string.
    pub fn into_text(self) -> String {
        match self {
            Cell::Text(s) => s.trim().to_string(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// DeploymentType – how a device was emplaced
// ---------------------------------------------------------------------------

/// Deployment method recorded in the `Data.Type` column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeploymentType {
    Airdrop,
    Tower,
    Uw,
    Surface,
    Ship,
    Atmosph,
    Barge,
    Balloon,
    Shaft,
    Rocket,
    Tunnel,
    Space,
    Crater,
    Gallery,
    Ug,
    ShaftGr,
    Mine,
    /// A label outside the known set, kept verbatim.
    Other(String),
}

impl DeploymentType {
    /// Every known deployment type, in the order the finder lists them.
    pub const KNOWN: [DeploymentType; 17] = [
        DeploymentType::Airdrop,
        DeploymentType::Tower,
        DeploymentType::Uw,
        DeploymentType::Surface,
        DeploymentType::Ship,
        DeploymentType::Atmosph,
        DeploymentType::Barge,
        DeploymentType::Balloon,
        DeploymentType::Shaft,
        DeploymentType::Rocket,
        DeploymentType::Tunnel,
        DeploymentType::Space,
        DeploymentType::Crater,
        DeploymentType::Gallery,
        DeploymentType::Ug,
        DeploymentType::ShaftGr,
        DeploymentType::Mine,
    ];

    /// Parse a label case-insensitively; unknown labels become [`DeploymentType::Other`].
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        Self::KNOWN
            .iter()
            .find(|known| known.label().eq_ignore_ascii_case(label))
            .cloned()
            .unwrap_or_else(|| DeploymentType::Other(label.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            DeploymentType::Airdrop => "Airdrop",
            DeploymentType::Tower => "Tower",
            DeploymentType::Uw => "Uw",
            DeploymentType::Surface => "Surface",
            DeploymentType::Ship => "Ship",
            DeploymentType::Atmosph => "Atmosph",
            DeploymentType::Barge => "Barge",
            DeploymentType::Balloon => "Balloon",
            DeploymentType::Shaft => "Shaft",
            DeploymentType::Rocket => "Rocket",
            DeploymentType::Tunnel => "Tunnel",
            DeploymentType::Space => "Space",
            DeploymentType::Crater => "Crater",
            DeploymentType::Gallery => "Gallery",
            DeploymentType::Ug => "Ug",
            DeploymentType::ShaftGr => "Shaft/Gr",
            DeploymentType::Mine => "Mine",
            DeploymentType::Other(label) => label,
        }
    }
}

impl fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for DeploymentType {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl Serialize for DeploymentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ExplosionRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single recorded explosion. Numeric fields the source left blank or
/// garbled are `None`; text fields default to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplosionRecord {
    pub source_country: String,
    pub deployment_location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Body-wave magnitude.
    pub magnitude_body: Option<f64>,
    pub magnitude_surface: Option<f64>,
    pub depth: Option<f64>,
    /// Lower yield estimate in kilotons.
    pub yield_lower: Option<f64>,
    /// Upper yield estimate in kilotons.
    pub yield_upper: Option<f64>,
    pub deployment_type: DeploymentType,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub name: String,
    pub purpose: String,
    pub data_source: String,
}

impl ExplosionRecord {
    /// Calendar date built from year/month/day, `None` if any part is
    /// missing or the combination is not a real date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed value indices.
///
/// Built once and never mutated; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<ExplosionRecord>,
    deployment_types: BTreeSet<DeploymentType>,
    source_countries: BTreeSet<String>,
}

impl Dataset {
    /// Build value indices from the loaded records.
    pub fn from_records(records: Vec<ExplosionRecord>) -> Self {
        let deployment_types = records
            .iter()
            .map(|r| r.deployment_type.clone())
            .collect();
        let source_countries = records
            .iter()
            .filter(|r| !r.source_country.is_empty())
            .map(|r| r.source_country.clone())
            .collect();
        Dataset {
            records,
            deployment_types,
            source_countries,
        }
    }

    pub fn records(&self) -> &[ExplosionRecord] {
        &self.records
    }

    /// Deployment types present in the data.
    pub fn deployment_types(&self) -> &BTreeSet<DeploymentType> {
        &self.deployment_types
    }

    /// Source countries present in the data.
    pub fn source_countries(&self) -> &BTreeSet<String> {
        &self.source_countries
    }

    /// Body-wave magnitude column, nulls included.
    pub fn magnitudes(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.records.iter().map(|r| r.magnitude_body)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_guess_matches_dataframe_inference() {
        assert_eq!(Cell::guess(""), Cell::Null);
        assert_eq!(Cell::guess(" 42 "), Cell::Integer(42));
        assert_eq!(Cell::guess("5.2"), Cell::Float(5.2));
        assert_eq!(Cell::guess("Nevada"), Cell::Text("Nevada".into()));
    }

    #[test]
    fn cell_numeric_views_tolerate_junk() {
        assert_eq!(Cell::Float(1962.0).as_i64(), Some(1962));
        assert_eq!(Cell::Float(1962.5).as_i64(), None);
        assert_eq!(Cell::Text("n/a".into()).as_f64(), None);
        assert_eq!(Cell::Float(f64::NAN).as_f64(), None);
        assert_eq!(Cell::Text("3.5".into()).as_f64(), Some(3.5));
    }

    #[test]
    fn deployment_type_parses_case_insensitively() {
        assert_eq!(DeploymentType::parse("SHAFT"), DeploymentType::Shaft);
        assert_eq!(DeploymentType::parse("shaft/gr"), DeploymentType::ShaftGr);
        assert_eq!(
            DeploymentType::parse("Shaft/Lg"),
            DeploymentType::Other("Shaft/Lg".into())
        );
        assert_eq!(DeploymentType::ShaftGr.to_string(), "Shaft/Gr");
    }

    #[test]
    fn invalid_calendar_date_is_none() {
        let mut record = sample();
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(1955, 3, 1));
        record.month = Some(2);
        record.day = Some(30);
        assert_eq!(record.date(), None);
        record.day = None;
        assert_eq!(record.date(), None);
    }

    #[test]
    fn dataset_indexes_types_and_countries() {
        let mut other = sample();
        other.source_country = "USSR".into();
        other.deployment_type = DeploymentType::Airdrop;
        let ds = Dataset::from_records(vec![sample(), other, sample()]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.deployment_types().len(), 2);
        assert_eq!(
            ds.source_countries().iter().collect::<Vec<_>>(),
            vec!["USA", "USSR"]
        );
    }

    fn sample() -> ExplosionRecord {
        ExplosionRecord {
            source_country: "USA".into(),
            deployment_location: "Nevada".into(),
            latitude: Some(37.1),
            longitude: Some(-116.0),
            magnitude_body: Some(5.2),
            magnitude_surface: None,
            depth: None,
            yield_lower: None,
            yield_upper: None,
            deployment_type: DeploymentType::Tower,
            year: Some(1955),
            month: Some(3),
            day: Some(1),
            name: "Teapot".into(),
            purpose: "Wr".into(),
            data_source: "DOE".into(),
        }
    }
}
