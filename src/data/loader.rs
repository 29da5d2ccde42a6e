use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Cell, Dataset, DeploymentType, ExplosionRecord};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Column layout of the source file
// ---------------------------------------------------------------------------

const COLUMN_COUNT: usize = 16;

/// Known columns of the explosions file. Header spellings are the
/// dataset's own, typos included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    SourceCountry,
    DeploymentLocation,
    DataSource,
    Latitude,
    Longitude,
    MagnitudeBody,
    MagnitudeSurface,
    Depth,
    YieldLower,
    YieldUpper,
    Purpose,
    Name,
    DeploymentType,
    Day,
    Month,
    Year,
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::SourceCountry,
        Column::DeploymentLocation,
        Column::DataSource,
        Column::Latitude,
        Column::Longitude,
        Column::MagnitudeBody,
        Column::MagnitudeSurface,
        Column::Depth,
        Column::YieldLower,
        Column::YieldUpper,
        Column::Purpose,
        Column::Name,
        Column::DeploymentType,
        Column::Day,
        Column::Month,
        Column::Year,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::SourceCountry => "WEAPON SOURCE COUNTRY",
            Column::DeploymentLocation => "WEAPON DEPLOYMENT LOCATION",
            Column::DataSource => "Data.Source",
            Column::Latitude => "Location.Cordinates.Latitude",
            Column::Longitude => "Location.Cordinates.Longitude",
            Column::MagnitudeBody => "Data.Magnitude.Body",
            Column::MagnitudeSurface => "Data.Magnitude.Surface",
            Column::Depth => "Location.Cordinates.Depth",
            Column::YieldLower => "Data.Yeild.Lower",
            Column::YieldUpper => "Data.Yeild.Upper",
            Column::Purpose => "Data.Purpose",
            Column::Name => "Data.Name",
            Column::DeploymentType => "Data.Type",
            Column::Day => "Date.Day",
            Column::Month => "Date.Month",
            Column::Year => "Date.Year",
        }
    }

    /// Whether a file without this column is rejected.
    pub fn is_required(self) -> bool {
        !matches!(
            self,
            Column::DataSource
                | Column::MagnitudeSurface
                | Column::Depth
                | Column::YieldLower
                | Column::YieldUpper
        )
    }

    fn slot(self) -> usize {
        Self::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }
}

/// Position of each known column in a particular file.
#[derive(Debug, Clone)]
struct ColumnMap {
    positions: [Option<usize>; COLUMN_COUNT],
}

impl ColumnMap {
    /// Match header names to known columns, failing on a missing required one.
    fn resolve<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self, LoadError> {
        let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
        let mut positions = [None; COLUMN_COUNT];
        for col in Column::ALL {
            positions[col.slot()] = headers.iter().position(|h| *h == col.header());
            if positions[col.slot()].is_none() && col.is_required() {
                return Err(LoadError::missing_column(col.header()));
            }
        }
        Ok(ColumnMap { positions })
    }

    fn get(&self, col: Column) -> Option<usize> {
        self.positions[col.slot()]
    }
}

/// Assemble a record from a cell lookup. Anything unreadable becomes
/// `None`/empty rather than failing the load.
fn record_from_cells(mut cell: impl FnMut(Column) -> Cell) -> ExplosionRecord {
    let mut number = |col| cell(col).as_f64();
    let latitude = number(Column::Latitude);
    let longitude = number(Column::Longitude);
    let magnitude_body = number(Column::MagnitudeBody);
    let magnitude_surface = number(Column::MagnitudeSurface);
    let depth = number(Column::Depth);
    let yield_lower = number(Column::YieldLower);
    let yield_upper = number(Column::YieldUpper);

    let year = cell(Column::Year)
        .as_i64()
        .and_then(|v| i32::try_from(v).ok());
    let month = cell(Column::Month)
        .as_i64()
        .and_then(|v| u32::try_from(v).ok());
    let day = cell(Column::Day)
        .as_i64()
        .and_then(|v| u32::try_from(v).ok());

    ExplosionRecord {
        source_country: cell(Column::SourceCountry).into_text(),
        deployment_location: cell(Column::DeploymentLocation).into_text(),
        latitude,
        longitude,
        magnitude_body,
        magnitude_surface,
        depth,
        yield_lower,
        yield_upper,
        deployment_type: DeploymentType::parse(&cell(Column::DeploymentType).into_text()),
        year,
        month,
        day,
        name: cell(Column::Name).into_text(),
        purpose: cell(Column::Purpose).into_text(),
        data_source: cell(Column::DataSource).into_text(),
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the explosions dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the dataset as published, one row per explosion
/// * `.json`    – `[{ "WEAPON SOURCE COUNTRY": "USA", ... }, ...]`
/// * `.parquet` – flat columns with the same names as the CSV header
pub fn load_file(path: &Path) -> Result<Arc<Dataset>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = File::open(path).map_err(|e| LoadError::file_open(path, e))?;
    let dataset = match ext.as_str() {
        "csv" => read_csv(file)?,
        "json" => read_json(file)?,
        "parquet" | "pq" => read_parquet(file)?,
        other => {
            return Err(LoadError::UnsupportedFormat {
                extension: other.to_string(),
            })
        }
    };

    log::info!(
        "Loaded {} records ({} deployment types, {} origins) from {}",
        dataset.len(),
        dataset.deployment_types().len(),
        dataset.source_countries().len(),
        path.display()
    );
    let undated = dataset.records().iter().filter(|r| r.date().is_none()).count();
    let unmeasured = dataset.magnitudes().filter(Option::is_none).count();
    if undated > 0 || unmeasured > 0 {
        log::debug!("{undated} records without a valid date, {unmeasured} without a magnitude");
    }

    Ok(Arc::new(dataset))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read CSV with a header row. Short rows load with the missing trailing
/// fields as null, and an unreadable cell is null too.
pub fn read_csv<R: Read>(input: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    let columns = ColumnMap::resolve(reader.headers()?.iter())?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        records.push(record_from_cells(|col| {
            columns
                .get(col)
                .and_then(|idx| row.get(idx))
                .map(Cell::guess)
                .unwrap_or(Cell::Null)
        }));
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
pub fn read_json<R: Read>(input: R) -> Result<Dataset, LoadError> {
    let root: JsonValue = serde_json::from_reader(input)?;
    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level JSON array".into()))?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
        if i == 0 {
            ColumnMap::resolve(obj.keys().map(String::as_str))?;
        }
        records.push(record_from_cells(|col| {
            obj.get(col.header()).map(json_to_cell).unwrap_or(Cell::Null)
        }));
    }

    Ok(Dataset::from_records(records))
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
pub fn read_parquet(file: File) -> Result<Dataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns = schema_columns(builder.schema())?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            records.push(record_from_cells(|col| {
                columns
                    .get(col)
                    .map(|idx| arrow_cell(batch.column(idx), row))
                    .unwrap_or(Cell::Null)
            }));
        }
    }

    Ok(Dataset::from_records(records))
}

fn schema_columns(schema: &Schema) -> Result<ColumnMap, LoadError> {
    let columns = ColumnMap::resolve(schema.fields().iter().map(|f| f.name().as_str()))?;
    for col in Column::ALL {
        let Some(idx) = columns.get(col) else {
            continue;
        };
        let data_type = schema.field(idx).data_type();
        if !is_supported_type(data_type) {
            log::warn!(
                "column '{}' has unsupported type {data_type:?}, treating as null",
                col.header()
            );
        }
    }
    Ok(columns)
}

fn is_supported_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8
            | DataType::LargeUtf8
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
            | DataType::Boolean
    )
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &Arc<dyn Array>, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Null;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Cell::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Cell::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Cell::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Cell::Bool(col.as_boolean().value(row)),
        _ => Cell::Null,
    }
}
