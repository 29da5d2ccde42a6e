use std::io::Write;

use serde::Serialize;

use crate::error::ExportError;

/// Write rows as CSV with a header taken from the field names.
pub fn write_csv<T: Serialize, W: Write>(rows: &[T], out: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write rows as a pretty-printed JSON array.
pub fn write_json<T: Serialize, W: Write>(rows: &[T], out: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(out, rows)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::filter::FilteredRow;
    use crate::data::model::DeploymentType;

    fn row() -> FilteredRow {
        FilteredRow {
            source_country: "France".into(),
            deployment_location: "Mururoa".into(),
            latitude: Some(-21.8),
            longitude: None,
            magnitude_body: 4.8,
            deployment_type: DeploymentType::Barge,
            date: NaiveDate::from_ymd_opt(1966, 7, 2).unwrap(),
        }
    }

    #[test]
    fn csv_has_header_and_blank_nulls() {
        let mut buf = Vec::new();
        write_csv(&[row()], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("source_country,deployment_location,latitude,longitude,magnitude_body,deployment_type,date")
        );
        assert_eq!(lines.next(), Some("France,Mururoa,-21.8,,4.8,Barge,1966-07-02"));
    }

    #[test]
    fn json_uses_type_labels_and_iso_dates() {
        let mut buf = Vec::new();
        write_json(&[row()], &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["deployment_type"], "Barge");
        assert_eq!(value[0]["date"], "1966-07-02");
        assert!(value[0]["longitude"].is_null());
    }
}
