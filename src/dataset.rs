//! Dataset acquisition.
//!
//! The reference dataset is a CSV table whose first row is a header and whose
//! columns are, by position:
//!
//! | column | field        | type   |
//! |--------|--------------|--------|
//! | 0      | `x`          | f64    |
//! | 1      | `y`          | f64    |
//! | 2      | `label`      | string |
//! | 3      | `region`     | string |
//! | 4      | `subregion`  | string |
//! | 5      | `risk_group` | string |
//!
//! Extra columns are ignored. Any malformed row fails the whole load, so a
//! caller either gets every record or none.

use crate::error::{Error, Result};
use crate::point::{Point, Record};
use actix_web::web;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the reference dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DatasetSource {
    /// A CSV file on the local filesystem.
    File(PathBuf),
    /// A CSV document fetched over HTTP(S).
    Url(String),
}

impl DatasetSource {
    /// Loads a fresh copy of the dataset.
    ///
    /// Local files are read on actix's blocking thread pool, so this must run
    /// inside an actix runtime.
    pub async fn load(&self) -> Result<Vec<Record>> {
        let records = match self {
            DatasetSource::File(path) => {
                let path = path.clone();
                web::block(move || load_file(path)).await??
            }
            DatasetSource::Url(url) => fetch_url(url).await?,
        };

        info!(source = %self, records = records.len(), "dataset loaded");
        Ok(records)
    }
}

impl From<&str> for DatasetSource {
    fn from(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            DatasetSource::Url(value.to_string())
        } else {
            DatasetSource::File(PathBuf::from(value))
        }
    }
}

impl From<String> for DatasetSource {
    fn from(value: String) -> Self {
        DatasetSource::from(value.as_str())
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::File(path) => write!(f, "{}", path.display()),
            DatasetSource::Url(url) => f.write_str(url),
        }
    }
}

/// Reads the dataset from a local CSV file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading dataset file");
    let file = File::open(path)?;
    parse_records(file)
}

/// Downloads the dataset and parses it. Non-2xx responses are faults.
pub async fn fetch_url(url: &str) -> Result<Vec<Record>> {
    debug!(url, "fetching dataset");
    let body = reqwest::get(url)
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    parse_records(body.as_ref())
}

/// Parses dataset rows from any CSV reader, discarding the header row.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut records = Vec::new();

    for row in rdr.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());

        let x = coordinate(&row, line, 0, "x")?;
        let y = coordinate(&row, line, 1, "y")?;
        let label = field(&row, line, 2, "label")?;
        let region = field(&row, line, 3, "region")?;
        let subregion = field(&row, line, 4, "subregion")?;
        let risk_group = field(&row, line, 5, "risk_group")?;

        records.push(Record::new(Point::new(x, y, label), region, subregion, risk_group));
    }

    Ok(records)
}

fn field<'r>(
    row: &'r StringRecord,
    line: u64,
    index: usize,
    column: &'static str,
) -> Result<&'r str> {
    row.get(index).ok_or(Error::MissingColumn { line, column })
}

fn coordinate(row: &StringRecord, line: u64, index: usize, column: &'static str) -> Result<f64> {
    let raw = field(row, line, index, column)?;
    let value: f64 = raw.parse().map_err(|_| Error::InvalidCoordinate {
        line,
        column,
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(Error::NonFiniteCoordinate { line, column, value });
    }

    Ok(value)
}

#[cfg(test)]
mod dataset_test {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "x,y,label,region,subregion,risk_group\n";

    #[test]
    fn test_parse_discards_header() {
        let csv = format!("{HEADER}1.5,2,A,Lima,Lince,high\n-3,4.25,B,Cusco,Wanchaq,low\n");
        let records = parse_records(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].point, Point::new(1.5, 2.0, "A"));
        assert_eq!(records[0].region, "Lima");
        assert_eq!(records[0].subregion, "Lince");
        assert_eq!(records[0].risk_group, "high");
        assert_eq!(records[1].point, Point::new(-3.0, 4.25, "B"));
        assert_eq!(records[1].distance, 0.0);
    }

    #[test]
    fn test_parse_header_only_is_empty() {
        assert!(parse_records(HEADER.as_bytes()).unwrap().is_empty());
        assert!(parse_records("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_non_numeric_coordinate_fails_whole_load() {
        let csv = format!("{HEADER}1,2,A,r,s,g\nabc,2,B,r,s,g\n3,4,C,r,s,g\n");
        let err = parse_records(csv.as_bytes()).unwrap_err();

        match err {
            Error::InvalidCoordinate { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "x");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_non_numeric_y() {
        let csv = format!("{HEADER}1,two,A,r,s,g\n");
        let err = parse_records(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::InvalidCoordinate { column: "y", .. }));
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        let csv = format!("{HEADER}NaN,2,A,r,s,g\n");
        let err = parse_records(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::NonFiniteCoordinate { column: "x", .. }));
    }

    #[test]
    fn test_parse_missing_column() {
        let csv = "x,y,label,region,subregion\n1,2,A,r,s\n";
        let err = parse_records(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::MissingColumn { line: 2, column: "risk_group" }));
    }

    #[test]
    fn test_parse_ragged_row_is_csv_error() {
        let csv = format!("{HEADER}1,2,A,r\n");
        let err = parse_records(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn test_parse_ignores_extra_columns() {
        let csv = "x,y,label,region,subregion,risk_group,note\n1,2,A,r,s,g,extra\n";
        let records = parse_records(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].risk_group, "g");
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{HEADER}0,0,A,r,s,g\n5,5,B,r,s,g\n").unwrap();

        let records = load_file(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].label(), "B");
    }

    #[test]
    fn test_load_bundled_sample() {
        let records = load_file(concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample.csv")).unwrap();

        assert_eq!(records.len(), 24);
        assert_eq!(records[0].point, Point::new(34.0, 1.0, "SINOPHARM"));
        assert_eq!(records[0].risk_group, "HEALTH WORKER");
    }

    #[actix_web::test]
    async fn test_source_load_file_off_worker() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{HEADER}0,0,A,r,s,g\n5,5,B,r,s,g\n1,1,A,r,s,g\n").unwrap();

        let source = DatasetSource::File(file.path().to_path_buf());
        let records = source.load().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].point, Point::new(1.0, 1.0, "A"));

        let missing = DatasetSource::from("/definitely/not/here.csv");
        assert!(matches!(missing.load().await.unwrap_err(), Error::Io(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_source_from_string() {
        assert_eq!(
            DatasetSource::from("http://example.com/data.csv"),
            DatasetSource::Url("http://example.com/data.csv".to_string())
        );
        assert_eq!(
            DatasetSource::from("https://example.com/data.csv"),
            DatasetSource::Url("https://example.com/data.csv".to_string())
        );
        assert_eq!(
            DatasetSource::from("data/sample.csv"),
            DatasetSource::File(PathBuf::from("data/sample.csv"))
        );
    }

    #[test]
    fn test_source_deserializes_from_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            dataset: DatasetSource,
        }

        let w: Wrapper = serde_json::from_str(r#"{"dataset": "https://host/x.csv"}"#).unwrap();
        assert_eq!(w.dataset, DatasetSource::Url("https://host/x.csv".to_string()));
    }
}
