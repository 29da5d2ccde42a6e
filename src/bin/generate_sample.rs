//! Write a synthetic explosions dataset for trying the viewer without the
//! real file. Usage: `generate_sample [OUTPUT.csv|OUTPUT.parquet] [ROWS]`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rusty_fallout::data::loader::Column;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Site {
    country: &'static str,
    location: &'static str,
    lat: f64,
    lon: f64,
    types: &'static [&'static str],
    prefix: &'static str,
}

const SITES: &[Site] = &[
    Site {
        country: "USA",
        location: "Nts",
        lat: 37.1,
        lon: -116.05,
        types: &["Shaft", "Tower", "Tunnel", "Balloon", "Crater"],
        prefix: "Plumbbob",
    },
    Site {
        country: "USA",
        location: "Bikini",
        lat: 11.6,
        lon: 165.4,
        types: &["Barge", "Surface", "Airdrop"],
        prefix: "Castle",
    },
    Site {
        country: "USA",
        location: "Enewetak",
        lat: 11.4,
        lon: 162.3,
        types: &["Tower", "Barge", "Uw"],
        prefix: "Ivy",
    },
    Site {
        country: "USSR",
        location: "Semi Kazakh",
        lat: 50.0,
        lon: 78.0,
        types: &["Airdrop", "Tower", "Shaft", "Gallery"],
        prefix: "Joe",
    },
    Site {
        country: "USSR",
        location: "N2 Russ",
        lat: 73.4,
        lon: 54.9,
        types: &["Airdrop", "Atmosph", "Uw"],
        prefix: "Zemlya",
    },
    Site {
        country: "UK",
        location: "Christmas Is",
        lat: 1.9,
        lon: -157.4,
        types: &["Airdrop", "Balloon"],
        prefix: "Grapple",
    },
    Site {
        country: "FRANCE",
        location: "Reggane Alg",
        lat: 26.3,
        lon: 0.05,
        types: &["Tower", "Surface"],
        prefix: "Gerboise",
    },
    Site {
        country: "FRANCE",
        location: "Mururoa",
        lat: -21.8,
        lon: -138.9,
        types: &["Barge", "Balloon", "Airdrop"],
        prefix: "Aldebaran",
    },
    Site {
        country: "CHINA",
        location: "Lop Nor",
        lat: 41.5,
        lon: 88.7,
        types: &["Tower", "Airdrop", "Rocket", "Ug"],
        prefix: "Cth",
    },
];

/// One generated row, in `Column::ALL` order.
type Row = Vec<Option<String>>;

fn generate_rows(n: usize, rng: &mut SimpleRng) -> Vec<Row> {
    (0..n)
        .map(|i| {
            let site = &SITES[rng.below(SITES.len())];
            let kind = site.types[rng.below(site.types.len())];
            let year = 1945 + rng.below(25) as i64;
            let month = 1 + rng.below(12) as i64;
            let day = 1 + rng.below(28) as i64;
            // A few rows with gaps, like the real file.
            let magnitude = (rng.next_f64() > 0.05)
                .then(|| rng.gauss(4.5, 1.4).clamp(0.0, 10.0))
                .map(|m| format!("{m:.1}"));
            let yield_kt = rng.gauss(40.0, 30.0).abs();

            Column::ALL
                .iter()
                .map(|col| match col {
                    Column::SourceCountry => Some(site.country.to_string()),
                    Column::DeploymentLocation => Some(site.location.to_string()),
                    Column::DataSource => Some("SYN".to_string()),
                    Column::Latitude => Some(format!("{:.3}", site.lat + rng.gauss(0.0, 0.05))),
                    Column::Longitude => Some(format!("{:.3}", site.lon + rng.gauss(0.0, 0.05))),
                    Column::MagnitudeBody => magnitude.clone(),
                    Column::MagnitudeSurface => None,
                    Column::Depth => Some(format!("{:.2}", rng.gauss(0.0, 0.3))),
                    Column::YieldLower => Some(format!("{:.1}", yield_kt * 0.8)),
                    Column::YieldUpper => Some(format!("{:.1}", yield_kt * 1.2)),
                    Column::Purpose => Some("Wr".to_string()),
                    Column::Name => Some(format!("{} {}", site.prefix, i + 1)),
                    Column::DeploymentType => Some(kind.to_string()),
                    Column::Day => Some(day.to_string()),
                    Column::Month => Some(month.to_string()),
                    Column::Year => Some(year.to_string()),
                })
                .collect()
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    writer.write_record(Column::ALL.iter().map(|c| c.header()))?;
    for row in rows {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}

fn is_numeric(col: Column) -> bool {
    !matches!(
        col,
        Column::SourceCountry
            | Column::DeploymentLocation
            | Column::DataSource
            | Column::Purpose
            | Column::Name
            | Column::DeploymentType
    )
}

fn is_integer(col: Column) -> bool {
    matches!(col, Column::Day | Column::Month | Column::Year)
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let mut fields = Vec::new();
    let mut arrays: Vec<ArrayRef> = Vec::new();

    for (idx, col) in Column::ALL.iter().copied().enumerate() {
        let cells = rows.iter().map(|row| row[idx].as_deref());
        let (data_type, array): (DataType, ArrayRef) = if is_integer(col) {
            let values: Int64Array = cells.map(|c| c.and_then(|s| s.parse::<i64>().ok())).collect();
            (DataType::Int64, Arc::new(values))
        } else if is_numeric(col) {
            let values: Float64Array = cells.map(|c| c.and_then(|s| s.parse::<f64>().ok())).collect();
            (DataType::Float64, Arc::new(values))
        } else {
            let values: StringArray = cells.collect();
            (DataType::Utf8, Arc::new(values))
        };
        fields.push(Field::new(col.header(), data_type, true));
        arrays.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating Parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let output_path = PathBuf::from(args.next().unwrap_or_else(|| "sample_explosions.csv".into()));
    let n_rows: usize = match args.next() {
        Some(n) => n.parse().context("ROWS must be a positive integer")?,
        None => 500,
    };

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(n_rows, &mut rng);

    match output_path.extension().and_then(|e| e.to_str()) {
        Some("csv") => write_csv(&output_path, &rows)?,
        Some("parquet") | Some("pq") => write_parquet(&output_path, &rows)?,
        other => bail!("unsupported output extension: {other:?}"),
    }

    log::info!("Wrote {n_rows} explosions to {}", output_path.display());
    println!("Wrote {n_rows} explosions to {}", output_path.display());
    Ok(())
}
