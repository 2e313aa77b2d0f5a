use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Header names the loader requires in the input file.
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_CLASS: &str = "class";

pub const REQUIRED_COLUMNS: [&str; 4] = [COL_SITE, COL_PAYLOAD, COL_BOOSTER_CATEGORY, COL_CLASS];

/// Binary launch result, encoded as `0`/`1` on the wire and in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn as_class(&self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("launch class must be 0 or 1, got {0}")]
pub struct InvalidOutcome(pub u8);

impl TryFrom<u8> for Outcome {
    type Error = InvalidOutcome;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(InvalidOutcome(other)),
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.as_class()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_kg: f64,
    pub booster_category: String,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booster_version: Option<String>,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot open launch data {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),
    /// `row` counts data rows from 1, header excluded.
    #[error("row {row}: {source}")]
    InvalidOutcome {
        row: usize,
        #[source]
        source: InvalidOutcome,
    },
    #[error("row {row}: payload mass must be a finite non-negative number, got {value}")]
    InvalidPayload { row: usize, value: f64 },
    #[error("launch data contains no rows")]
    Empty,
}

/// Row shape of the source file. Extra columns (such as an unnamed index) are ignored.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<u32>,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
}

/// Immutable launch table, loaded once and shared read-only.
///
/// Cloning is cheap: records and the derived site list sit behind `Arc`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<LaunchRecord>", try_from = "Vec<LaunchRecord>")]
pub struct LaunchTable {
    records: Arc<[LaunchRecord]>,
    sites: Arc<[String]>,
}

impl LaunchTable {
    /// Validate and freeze a record set. Rejects empty sets and bad payloads.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, TableError> {
        if records.is_empty() {
            return Err(TableError::Empty);
        }
        for (idx, r) in records.iter().enumerate() {
            if !r.payload_kg.is_finite() || r.payload_kg < 0.0 {
                return Err(TableError::InvalidPayload {
                    row: idx + 1,
                    value: r.payload_kg,
                });
            }
        }

        let mut sites: Vec<String> = Vec::new();
        for r in &records {
            if !sites.iter().any(|s| s == &r.site) {
                sites.push(r.site.clone());
            }
        }

        Ok(Self {
            records: Arc::from(records),
            sites: Arc::from(sites),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TableError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            records = table.len(),
            sites = table.sites().len(),
            "launch table loaded"
        );
        Ok(table)
    }

    /// Parse CSV with a header row. Required columns are checked before any row is read.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        tracing::debug!(columns = ?headers.iter().collect::<Vec<_>>(), "launch data columns");
        for col in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == col) {
                return Err(TableError::MissingColumn(col));
            }
        }

        let mut records = Vec::new();
        for (idx, row) in rdr.deserialize::<CsvRow>().enumerate() {
            let row = row?;
            let outcome = Outcome::try_from(row.class)
                .map_err(|source| TableError::InvalidOutcome { row: idx + 1, source })?;
            records.push(LaunchRecord {
                site: row.site,
                payload_kg: row.payload_kg,
                booster_category: row.booster_category,
                outcome,
                flight_number: row.flight_number,
                booster_version: row.booster_version.filter(|v| !v.is_empty()),
            });
        }

        Self::from_records(records)
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct site names in order of first appearance.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Observed `(min, max)` payload. The table is never empty.
    pub fn payload_bounds(&self) -> (f64, f64) {
        self.records.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r.payload_kg), hi.max(r.payload_kg))
        })
    }

    pub fn total_successes(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_success()).count()
    }
}

impl TryFrom<Vec<LaunchRecord>> for LaunchTable {
    type Error = TableError;

    fn try_from(records: Vec<LaunchRecord>) -> Result<Self, Self::Error> {
        Self::from_records(records)
    }
}

impl From<LaunchTable> for Vec<LaunchRecord> {
    fn from(table: LaunchTable) -> Self {
        table.records.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,0.0,F9 v1.0  B0004,v1.0
2,3,VAFB SLC-4E,1,500.0,F9 v1.1  B1003,v1.1
3,4,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
4,5,CCAFS LC-40,1,5300.0,F9 FT B1030,FT
";

    #[test]
    fn parses_rows_and_ignores_extra_columns() {
        let table = LaunchTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 5);
        let first = &table.records()[0];
        assert_eq!(first.site, "CCAFS LC-40");
        assert_eq!(first.outcome, Outcome::Failure);
        assert_eq!(first.flight_number, Some(1));
        assert_eq!(first.booster_version.as_deref(), Some("F9 v1.0  B0003"));
        assert_eq!(table.records()[3].booster_category, "FT");
    }

    #[test]
    fn sites_keep_first_appearance_order() {
        let table = LaunchTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.sites(), ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert!(table.sites().iter().any(|s| s == "KSC LC-39A"));
        assert!(!table.sites().iter().any(|s| s == "ALL"));
    }

    #[test]
    fn payload_bounds_and_successes() {
        let table = LaunchTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.payload_bounds(), (0.0, 5300.0));
        assert_eq!(table.total_successes(), 3);
    }

    #[test]
    fn required_columns_only() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nKSC,5000,v1.0,1\n";
        let table = LaunchTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].flight_number, None);
        assert_eq!(table.records()[0].booster_version, None);
    }

    #[test]
    fn missing_column_is_rejected() {
        let csv = "Launch Site,Payload Mass (kg),class\nKSC,5000,1\n";
        let err = LaunchTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::MissingColumn(COL_BOOSTER_CATEGORY)));
    }

    #[test]
    fn class_outside_binary_is_rejected() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nKSC,5000,v1.0,1\nKSC,10,v1.0,2\n";
        let err = LaunchTable::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            TableError::InvalidOutcome { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(source, InvalidOutcome(2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_payload_is_rejected() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nKSC,-1,v1.0,1\n";
        let err = LaunchTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::InvalidPayload { row: 1, .. }));
    }

    #[test]
    fn json_payload_error_names_the_row() {
        let json = r#"[
            {"site":"KSC","payload_kg":1.0,"booster_category":"FT","outcome":1},
            {"site":"KSC","payload_kg":-5.0,"booster_category":"FT","outcome":0}
        ]"#;
        let records: Vec<LaunchRecord> = serde_json::from_str(json).unwrap();
        let err = LaunchTable::try_from(records).unwrap_err();
        assert!(matches!(err, TableError::InvalidPayload { row: 2, .. }));
        assert!(err.to_string().starts_with("row 2:"));
    }

    #[test]
    fn unparsable_payload_is_csv_error() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nKSC,heavy,v1.0,1\n";
        let err = LaunchTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::Csv(_)));
    }

    #[test]
    fn header_only_file_is_empty() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\n";
        let err = LaunchTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::Empty));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = LaunchTable::from_path("does/not/exist.csv").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.csv"));
    }

    #[test]
    fn json_uses_numeric_outcome() {
        let table = LaunchTable::from_reader(SAMPLE.as_bytes()).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json[0]["outcome"], 0);
        assert_eq!(json[2]["outcome"], 1);
        let back: LaunchTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn json_with_bad_outcome_fails() {
        let json = r#"[{"site":"KSC","payload_kg":1.0,"booster_category":"FT","outcome":3}]"#;
        assert!(serde_json::from_str::<LaunchTable>(json).is_err());
    }

    #[test]
    fn bundled_dataset_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/spacex_launch_dash.csv");
        let table = LaunchTable::from_path(path).unwrap();
        assert_eq!(table.len(), 56);
        assert_eq!(
            table.sites(),
            ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
        assert_eq!(table.payload_bounds(), (0.0, 9600.0));
        assert_eq!(table.total_successes(), 24);
    }
}
