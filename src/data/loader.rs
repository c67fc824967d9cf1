use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Column names of the published launch table
// ---------------------------------------------------------------------------

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";

const REQUIRED_COLUMNS: [&str; 4] = [COL_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER_CATEGORY];

/// Schema violations found while loading a launch table.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: no value in column '{column}'")]
    MissingValue { row: usize, column: &'static str },
    #[error("row {row}: payload mass {value} is not a non-negative number")]
    InvalidPayload { row: usize, value: f64 },
    #[error("row {row}: class {value} is neither 0 nor 1")]
    InvalidClass { row: usize, value: f64 },
    #[error("row {row}: flight number {value} is not a non-negative integer")]
    InvalidFlightNumber { row: usize, value: f64 },
    #[error("dataset contains no launches")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the published `spacex_launch_dash.csv` layout
/// * `.parquet` – same column names, any of the common numeric types
///
/// Fails on any row that breaks the dataset invariants, and on an empty table.
pub fn load_dataset(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading launch records from {}", path.display()))?;

    let dataset = LaunchDataset::from_records(records);
    if dataset.is_empty() {
        return Err(DatasetError::Empty)
            .with_context(|| format!("loading launch records from {}", path.display()));
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row validation (shared by both formats)
// ---------------------------------------------------------------------------

/// One row as read from the file, before invariants are checked.
#[derive(Debug, Default, Deserialize)]
struct RawLaunch {
    #[serde(rename = "Launch Site")]
    site: Option<String>,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: Option<f64>,
    #[serde(rename = "class")]
    class: Option<f64>,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: Option<String>,
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<u32>,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
}

impl RawLaunch {
    fn validate(self, row: usize) -> Result<LaunchRecord, DatasetError> {
        let site = non_empty(self.site).ok_or(DatasetError::MissingValue { row, column: COL_SITE })?;
        let booster_version_category = non_empty(self.booster_version_category).ok_or(
            DatasetError::MissingValue {
                row,
                column: COL_BOOSTER_CATEGORY,
            },
        )?;

        let payload_mass_kg = self
            .payload_mass_kg
            .ok_or(DatasetError::MissingValue { row, column: COL_PAYLOAD })?;
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(DatasetError::InvalidPayload {
                row,
                value: payload_mass_kg,
            });
        }

        let class = self
            .class
            .ok_or(DatasetError::MissingValue { row, column: COL_CLASS })?;
        let outcome = (class.fract() == 0.0)
            .then(|| Outcome::from_class(class as i64))
            .flatten()
            .ok_or(DatasetError::InvalidClass { row, value: class })?;

        Ok(LaunchRecord {
            site,
            payload_mass_kg,
            outcome,
            booster_version_category,
            flight_number: self.flight_number,
            booster_version: non_empty(self.booster_version),
        })
    }
}

/// Whole, non-negative and within `u32`; anything else names the row.
fn flight_number_from(value: f64, row: usize) -> Result<u32, DatasetError> {
    let invalid = DatasetError::InvalidFlightNumber { row, value };
    if value.fract() != 0.0 {
        return Err(invalid);
    }
    u32::try_from(value as i64).map_err(|_| invalid)
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn check_required_columns(mut present: impl FnMut(&str) -> bool) -> Result<(), DatasetError> {
    for column in REQUIRED_COLUMNS {
        if !present(column) {
            return Err(DatasetError::MissingColumn(column));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the column names above. Extra columns
/// (including the unnamed index column of the published file) are ignored.
fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_required_columns(|col| headers.iter().any(|h| h == col))?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunch>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.validate(row_no)?);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the launch table.
///
/// String columns may be `Utf8` or `LargeUtf8`; numeric columns may be any of
/// Int32 / Int64 / Float32 / Float64 (Pandas writes `class` as Int64).
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    // Checked on the file schema so a table without rows still reports its columns.
    let file_schema = builder.schema().clone();
    check_required_columns(|col| file_schema.index_of(col).is_ok())?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| schema.index_of(name).ok().map(|i| batch.column(i).clone());
        let site = column(COL_SITE);
        let payload = column(COL_PAYLOAD);
        let class = column(COL_CLASS);
        let category = column(COL_BOOSTER_CATEGORY);
        let flight = column(COL_FLIGHT_NUMBER);
        let version = column(COL_BOOSTER_VERSION);

        for row in 0..batch.num_rows() {
            let row_no = row_offset + row;
            let raw = RawLaunch {
                site: string_at(site.as_ref(), row).with_context(|| format!("Row {row_no}: '{COL_SITE}'"))?,
                payload_mass_kg: f64_at(payload.as_ref(), row)
                    .with_context(|| format!("Row {row_no}: '{COL_PAYLOAD}'"))?,
                class: f64_at(class.as_ref(), row).with_context(|| format!("Row {row_no}: '{COL_CLASS}'"))?,
                booster_version_category: string_at(category.as_ref(), row)
                    .with_context(|| format!("Row {row_no}: '{COL_BOOSTER_CATEGORY}'"))?,
                flight_number: f64_at(flight.as_ref(), row)
                    .with_context(|| format!("Row {row_no}: '{COL_FLIGHT_NUMBER}'"))?
                    .map(|v| flight_number_from(v, row_no))
                    .transpose()?,
                booster_version: string_at(version.as_ref(), row)
                    .with_context(|| format!("Row {row_no}: '{COL_BOOSTER_VERSION}'"))?,
            };
            records.push(raw.validate(row_no)?);
        }
        row_offset += batch.num_rows();
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Read a string cell; absent column or null cell → `None`.
fn string_at(col: Option<&ArrayRef>, row: usize) -> Result<Option<String>> {
    let Some(col) = col else {
        return Ok(None);
    };
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => Ok(Some(col.as_string::<i32>().value(row).to_string())),
        DataType::LargeUtf8 => Ok(Some(col.as_string::<i64>().value(row).to_string())),
        other => bail!("expected a string column, got {other:?}"),
    }
}

/// Read a numeric cell as `f64`; absent column or null cell → `None`.
fn f64_at(col: Option<&ArrayRef>, row: usize) -> Result<Option<f64>> {
    let Some(col) = col else {
        return Ok(None);
    };
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row) as f64,
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64,
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as f64,
        other => bail!("expected a numeric column, got {other:?}"),
    };
    Ok(Some(value))
}
