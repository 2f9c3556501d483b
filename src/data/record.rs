//! Rental Record Module
//! Typed rows of the bike sharing dataset.

use chrono::NaiveDate;
use std::fmt;

/// Weather situation code as stored in the `weathersit` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeatherCode(pub i64);

impl WeatherCode {
    /// Display label for the code, `None` outside 1-4.
    pub fn label(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("Clear"),
            2 => Some("Mist + Cloudy"),
            3 => Some("Light Snow/Rain"),
            4 => Some("Heavy Rain/Snow"),
            _ => None,
        }
    }
}

impl fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Unmapped codes render blank
        f.write_str(self.label().unwrap_or(""))
    }
}

/// One day of rental data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalRecord {
    pub date: NaiveDate,
    pub weather: WeatherCode,
    pub count: i64,
}

impl RentalRecord {
    pub fn new(date: NaiveDate, weather: i64, count: i64) -> Self {
        Self {
            date,
            weather: WeatherCode(weather),
            count,
        }
    }
}

/// Immutable, owned table of rental records in source order.
#[derive(Debug, Clone, Default)]
pub struct RentalTable {
    records: Vec<RentalRecord>,
}

impl RentalTable {
    pub fn new(records: Vec<RentalRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Earliest and latest date in the table.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Sum of all ride counts.
    pub fn total_rides(&self) -> i64 {
        self.records.iter().map(|r| r.count).sum()
    }
}
