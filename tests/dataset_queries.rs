use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rusty_fallout::data::{
    self, Criteria, DeploymentType, SearchQuery, DEFAULT_HISTOGRAM_BINS,
};
use rusty_fallout::LoadError;
use tempfile::TempDir;

const HEADER: &[&str] = &[
    "WEAPON SOURCE COUNTRY",
    "WEAPON DEPLOYMENT LOCATION",
    "Data.Source",
    "Location.Cordinates.Latitude",
    "Location.Cordinates.Longitude",
    "Data.Magnitude.Body",
    "Data.Magnitude.Surface",
    "Location.Cordinates.Depth",
    "Data.Yeild.Lower",
    "Data.Yeild.Upper",
    "Data.Purpose",
    "Data.Name",
    "Data.Type",
    "Date.Day",
    "Date.Month",
    "Date.Year",
];

fn write_csv(path: &Path, rows: &[&str]) {
    let mut out = HEADER.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    fs::write(path, out).unwrap();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Three records: a dated Nevada tower shot, a dated Novaya Zemlya
/// airdrop, and a Nevada shaft shot whose date does not exist.
fn three_record_file(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("explosions.csv");
    write_csv(
        &path,
        &[
            "USA,Nevada,DOE,37.1,-116.0,5.2,0,0,1,2,Wr,Teapot,Tower,1,3,1955",
            "USSR,Novaya Zemlya,DOE,73.8,54.5,9.1,0,0,50000,50000,Wr,Tsar Bomba,Airdrop,30,10,1961",
            "USA,Nevada,DOE,37.0,-116.1,3.0,0,0,0,1,Wr,Gnome,Shaft,31,2,1962",
        ],
    );
    path
}

#[test]
fn filter_drops_undated_record_and_sorts_by_location() {
    let dir = TempDir::new().unwrap();
    let dataset = data::load_file(&three_record_file(&dir)).unwrap();

    let criteria = Criteria::default()
        .with_magnitude(5.0, 10.0)
        .with_dates(date(1950, 1, 1), date(1965, 1, 1));
    criteria.validate().unwrap();

    let rows = data::filter(&dataset, &criteria);
    let got: Vec<(&str, f64)> = rows
        .iter()
        .map(|r| (r.deployment_location.as_str(), r.magnitude_body))
        .collect();
    assert_eq!(got, vec![("Nevada", 5.2), ("Novaya Zemlya", 9.1)]);
}

#[test]
fn summary_counts_undated_record() {
    let dir = TempDir::new().unwrap();
    let dataset = data::load_file(&three_record_file(&dir)).unwrap();

    let stats = data::summary_statistics(dataset.records());
    assert_eq!(stats.count, 3);
    assert_eq!(stats.min_magnitude, Some(3.0));
    assert_eq!(stats.max_magnitude, Some(9.1));
}

#[test]
fn every_filtered_row_respects_the_criteria() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("many.csv");
    let rows: Vec<String> = (0..120)
        .map(|i| {
            let magnitude = (i % 11) as f64 * 0.9;
            let kind = ["Tower", "Shaft", "Airdrop", "Barge"][i % 4];
            let location = ["Nts", "Bikini", "Amchitka", "Lop Nor", "Mururoa"][i % 5];
            format!(
                "USA,{location},DOE,1,1,{magnitude},,,,,Wr,Shot {i},{kind},{},{},{}",
                1 + i % 28,
                1 + i % 12,
                1945 + i % 25
            )
        })
        .collect();
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    write_csv(&path, &refs);
    let dataset = data::load_file(&path).unwrap();

    let criteria = Criteria::default()
        .with_magnitude(2.0, 7.5)
        .with_dates(date(1950, 6, 1), date(1966, 2, 1))
        .with_types([DeploymentType::Shaft, DeploymentType::Tower])
        .descending();
    let view = data::filter(&dataset, &criteria);

    assert!(!view.is_empty());
    for row in &view {
        assert!((2.0..=7.5).contains(&row.magnitude_body));
        assert!(row.date >= criteria.start_date && row.date <= criteria.end_date);
        assert!(criteria.types.contains(&row.deployment_type));
    }
    assert!(view
        .windows(2)
        .all(|w| w[0].deployment_location >= w[1].deployment_location));
    assert_eq!(view, data::filter(&dataset, &criteria));
}

#[test]
fn histogram_and_year_counts_cover_the_dataset() {
    let dir = TempDir::new().unwrap();
    let dataset = data::load_file(&three_record_file(&dir)).unwrap();

    let bins = data::magnitude_histogram(dataset.magnitudes(), DEFAULT_HISTOGRAM_BINS);
    assert_eq!(bins.len(), 10);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);

    let years: Vec<i32> = data::count_by_year(dataset.records())
        .iter()
        .map(|b| b.year)
        .collect();
    assert_eq!(years, vec![1955, 1961]);
}

#[test]
fn search_distinguishes_no_match_from_bad_pattern() {
    let dir = TempDir::new().unwrap();
    let dataset = data::load_file(&three_record_file(&dir)).unwrap();
    let records = dataset.records();

    let all = data::text_search(records, &SearchQuery::Literal(String::new())).unwrap();
    assert_eq!(all.len(), 3);

    let none = data::text_search(records, &SearchQuery::Literal("zzz_no_such_test".into()));
    assert_eq!(none, Ok(vec![]));

    let hits = data::text_search(records, &SearchQuery::Literal("tsar".into())).unwrap();
    assert_eq!(hits[0].deployment_location, "Novaya Zemlya");
    assert_eq!(hits[0].purpose, "Wr");

    assert!(data::text_search(records, &SearchQuery::Pattern("[".into())).is_err());
}

#[test]
fn map_extract_keeps_only_the_origin_country() {
    let dir = TempDir::new().unwrap();
    let dataset = data::load_file(&three_record_file(&dir)).unwrap();

    let points = data::extract_by_origin(dataset.records(), "USA");
    let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Teapot", "Gnome"]);
    assert_eq!(points[0].position(), Some([-116.0, 37.1]));
}

#[test]
fn json_file_loads_like_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("explosions.json");
    fs::write(
        &path,
        r#"[{"WEAPON SOURCE COUNTRY":"UK","WEAPON DEPLOYMENT LOCATION":"Malden Is",
             "Location.Cordinates.Latitude":-4.0,"Location.Cordinates.Longitude":-154.9,
             "Data.Magnitude.Body":0,"Data.Purpose":"Wr","Data.Name":"Short Granite",
             "Data.Type":"Airdrop","Date.Day":15,"Date.Month":5,"Date.Year":1957}]"#,
    )
    .unwrap();
    let dataset = data::load_file(&path).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].date(), Some(date(1957, 5, 15)));
}

#[test]
fn truncated_row_loads_and_is_filtered_out() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("truncated.csv");
    write_csv(
        &path,
        &[
            "USA,Nevada,DOE,37.1,-116.0,5.2,0,0,1,2,Wr,Teapot,Tower,1,3,1955",
            "USA,Nevada,DOE,37.0,-116.1,4.0,0,0,1,2,Wr,Cut",
        ],
    );
    let dataset = data::load_file(&path).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records()[1].date(), None);

    let rows = data::filter(&dataset, &Criteria::default());
    assert_eq!(rows.len(), 1);
    assert_eq!(data::summary_statistics(dataset.records()).count, 2);
}

#[test]
fn corrupt_file_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(&path, "Data.Name\nTrinity\n").unwrap();
    assert!(matches!(
        data::load_file(&path),
        Err(LoadError::MissingColumn { .. })
    ));

    let path = dir.path().join("broken.parquet");
    fs::write(&path, b"not parquet at all").unwrap();
    assert!(matches!(data::load_file(&path), Err(LoadError::Parquet(_))));
}
