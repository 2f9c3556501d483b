//! CSV Data Loader Module
//! Reads the rental CSV with Polars and converts the used columns into typed records.

use super::record::{RentalRecord, RentalTable};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

pub const DATE_COL: &str = "dteday";
pub const WEATHER_COL: &str = "weathersit";
pub const COUNT_COL: &str = "cnt";

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("Unparseable date '{value}' in row {row}")]
    InvalidDate { row: usize, value: String },
    #[error("Empty '{column}' value in row {row}")]
    MissingValue { row: usize, column: &'static str },
    #[error("No data loaded")]
    NoData,
}

/// Loads the rental dataset from CSV.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file into an immutable rental table.
    pub fn load_csv(file_path: impl AsRef<Path>) -> Result<RentalTable, LoaderError> {
        let file_path = file_path.as_ref();

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        debug!(
            "Read {} rows, {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );

        let table = Self::table_from_frame(&df)?;
        if let Some((min, max)) = table.date_bounds() {
            info!(
                "Loaded {} rental records from {} ({} to {})",
                table.len(),
                file_path.display(),
                min,
                max
            );
        }
        Ok(table)
    }

    /// Convert the `dteday`, `weathersit` and `cnt` columns of a DataFrame into records.
    pub fn table_from_frame(df: &DataFrame) -> Result<RentalTable, LoaderError> {
        let date_col = Self::column(df, DATE_COL)?.cast(&DataType::String)?;
        let weather_col = Self::column(df, WEATHER_COL)?.cast(&DataType::Int64)?;
        let count_col = Self::column(df, COUNT_COL)?.cast(&DataType::Int64)?;

        let dates = date_col.str()?;
        let weathers = weather_col.i64()?;
        let counts = count_col.i64()?;

        let mut records = Vec::with_capacity(df.height());
        for (i, ((date, weather), count)) in dates
            .into_iter()
            .zip(weathers.into_iter())
            .zip(counts.into_iter())
            .enumerate()
        {
            let row = i + 1;
            let raw_date = date.unwrap_or_default();
            let date = Self::parse_date(raw_date).ok_or_else(|| LoaderError::InvalidDate {
                row,
                value: raw_date.to_string(),
            })?;
            let weather = weather.ok_or(LoaderError::MissingValue {
                row,
                column: WEATHER_COL,
            })?;
            let count = count.ok_or(LoaderError::MissingValue {
                row,
                column: COUNT_COL,
            })?;

            records.push(RentalRecord::new(date, weather, count));
        }

        if records.is_empty() {
            return Err(LoaderError::NoData);
        }

        Ok(RentalTable::new(records))
    }

    /// Parse an ISO-ish date string. Datetime values are truncated to their date.
    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        let value = value.trim();

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                    .map(|dt| dt.date())
            })
    }

    fn column<'a>(df: &'a DataFrame, name: &'static str) -> Result<&'a Column, LoaderError> {
        df.column(name).map_err(|_| LoaderError::MissingColumn(name))
    }
}
