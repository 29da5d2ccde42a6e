use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rusty_fallout::data::{self, Criteria, DeploymentType};
use tempfile::TempDir;

fn text(values: &[Option<&str>]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

fn float(values: &[Option<f64>]) -> ArrayRef {
    Arc::new(Float64Array::from(values.to_vec()))
}

fn int(values: &[Option<i32>]) -> ArrayRef {
    Arc::new(Int32Array::from(values.to_vec()))
}

#[test]
fn parquet_columns_map_onto_records() {
    let columns: Vec<(&str, ArrayRef)> = vec![
        ("WEAPON SOURCE COUNTRY", text(&[Some("CHINA"), Some("USA")])),
        ("WEAPON DEPLOYMENT LOCATION", text(&[Some("Lop Nor"), Some("Nts")])),
        ("Location.Cordinates.Latitude", float(&[Some(41.5), None])),
        ("Location.Cordinates.Longitude", float(&[Some(88.7), Some(-116.0)])),
        ("Data.Magnitude.Body", float(&[Some(5.3), None])),
        ("Data.Purpose", text(&[Some("Wr"), None])),
        ("Data.Name", text(&[Some("Chic-1"), Some("Sedan")])),
        ("Data.Type", text(&[Some("Tower"), Some("Crater")])),
        ("Date.Day", int(&[Some(16), Some(6)])),
        ("Date.Month", int(&[Some(10), Some(7)])),
        ("Date.Year", int(&[Some(1964), Some(1962)])),
    ];
    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(
        schema.clone(),
        columns.into_iter().map(|(_, array)| array).collect(),
    )
    .unwrap();
    assert_eq!(batch.schema().field(0).data_type(), &DataType::Utf8);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("explosions.parquet");
    let mut writer = ArrowWriter::try_new(std::fs::File::create(&path).unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let dataset = data::load_file(&path).unwrap();
    assert_eq!(dataset.len(), 2);

    let sedan = &dataset.records()[1];
    assert_eq!(sedan.deployment_type, DeploymentType::Crater);
    assert_eq!(sedan.latitude, None);
    assert_eq!(sedan.magnitude_body, None);
    assert_eq!(sedan.purpose, "");

    let rows = data::filter(&dataset, &Criteria::default());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].source_country, "CHINA");
}
