//! Rusty Fallout – query and aggregation core for exploring historical
//! nuclear explosion records.
//!
//! The dataset is loaded once into an immutable [`data::Dataset`] and
//! every view (filtered table, yearly counts, histogram, statistics,
//! name search, map points) is recomputed from it on demand.
//!
//! ```ignore
//! use rusty_fallout::data::{self, Criteria, DeploymentType};
//!
//! let dataset = data::load_file("nuclear_explosions.csv".as_ref())?;
//! let criteria = Criteria::default()
//!     .with_magnitude(5.0, 10.0)
//!     .with_types([DeploymentType::Airdrop]);
//! criteria.validate()?;
//! for row in data::filter(&dataset, &criteria) {
//!     println!("{} {} {}", row.date, row.deployment_location, row.magnitude_body);
//! }
//! ```

pub mod color;
pub mod config;
pub mod data;
pub mod error;

pub use error::{ExportError, LoadError, QueryError};
