//! Data Processor Module
//! Date range filtering and group-and-sum aggregation of rental records.

use super::record::{RentalRecord, RentalTable, WeatherCode};
use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Clamp both ends into `bounds`, swapping them if they arrive reversed.
    pub fn clamped(start: NaiveDate, end: NaiveDate, bounds: DateRange) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            start: start.clamp(bounds.start, bounds.end),
            end: end.clamp(bounds.start, bounds.end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Total rides for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_rides: i64,
}

/// Total rides for one weather situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherTotal {
    pub code: WeatherCode,
    /// `None` for codes outside 1-4.
    pub label: Option<&'static str>,
    pub total_rides: i64,
}

/// Filtered range plus both summary tables for one pass of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RideReport {
    pub range: DateRange,
    pub record_count: usize,
    pub daily: Vec<DailyTotal>,
    pub weather: Vec<WeatherTotal>,
}

impl RideReport {
    /// Filter the table to `range` and derive both summaries.
    pub fn build(table: &RentalTable, range: DateRange, fill_missing_days: bool) -> Self {
        let filtered = DataProcessor::filter_by_date_range(table.records(), range);
        let mut daily = DataProcessor::daily_totals(&filtered);
        if fill_missing_days {
            daily = DataProcessor::fill_missing_days(&daily);
        }
        let weather = DataProcessor::weather_totals(&filtered);

        debug!(
            "Report for {} to {}: {} records, {} days, {} weather groups",
            range.start,
            range.end,
            filtered.len(),
            daily.len(),
            weather.len()
        );

        Self {
            range,
            record_count: filtered.len(),
            daily,
            weather,
        }
    }

    pub fn total_rides(&self) -> i64 {
        self.daily.iter().map(|d| d.total_rides).sum()
    }
}

/// Filtering and aggregation over rental records.
pub struct DataProcessor;

impl DataProcessor {
    /// Records whose date lies in `range`, in source order.
    pub fn filter_by_date_range(records: &[RentalRecord], range: DateRange) -> Vec<RentalRecord> {
        records
            .iter()
            .filter(|r| range.contains(r.date))
            .copied()
            .collect()
    }

    /// Sum ride counts per date, ascending by date.
    pub fn daily_totals(records: &[RentalRecord]) -> Vec<DailyTotal> {
        let mut by_date: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for record in records {
            *by_date.entry(record.date).or_default() += record.count;
        }

        by_date
            .into_iter()
            .map(|(date, total_rides)| DailyTotal { date, total_rides })
            .collect()
    }

    /// Insert zero rows for days missing between the first and last date.
    /// Input must be ascending by date.
    pub fn fill_missing_days(daily: &[DailyTotal]) -> Vec<DailyTotal> {
        let (Some(first), Some(last)) = (daily.first(), daily.last()) else {
            return Vec::new();
        };

        let mut present = daily.iter().peekable();
        first
            .date
            .iter_days()
            .take_while(|date| *date <= last.date)
            .map(|date| match present.next_if(|d| d.date == date) {
                Some(total) => *total,
                None => DailyTotal {
                    date,
                    total_rides: 0,
                },
            })
            .collect()
    }

    /// Sum ride counts per weather code, ascending by code.
    ///
    /// Codes outside 1-4 keep their row with a `None` label.
    pub fn weather_totals(records: &[RentalRecord]) -> Vec<WeatherTotal> {
        let mut by_code: BTreeMap<WeatherCode, i64> = BTreeMap::new();
        for record in records {
            *by_code.entry(record.weather).or_default() += record.count;
        }

        by_code
            .into_iter()
            .map(|(code, total_rides)| {
                let label = code.label();
                if label.is_none() {
                    warn!("Weather code {} has no label", code.0);
                }
                WeatherTotal {
                    code,
                    label,
                    total_rides,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_records() -> Vec<RentalRecord> {
        vec![
            RentalRecord::new(date(2023, 1, 1), 1, 10),
            RentalRecord::new(date(2023, 1, 1), 2, 5),
            RentalRecord::new(date(2023, 1, 2), 1, 20),
        ]
    }

    #[test]
    fn test_daily_totals_example() {
        let daily = DataProcessor::daily_totals(&sample_records());

        assert_eq!(
            daily,
            vec![
                DailyTotal {
                    date: date(2023, 1, 1),
                    total_rides: 15
                },
                DailyTotal {
                    date: date(2023, 1, 2),
                    total_rides: 20
                },
            ]
        );
    }

    #[test]
    fn test_weather_totals_example() {
        let weather = DataProcessor::weather_totals(&sample_records());

        let pairs: Vec<(Option<&str>, i64)> =
            weather.iter().map(|w| (w.label, w.total_rides)).collect();
        assert_eq!(pairs, vec![(Some("Clear"), 30), (Some("Mist + Cloudy"), 5)]);
    }

    #[test]
    fn test_empty_input_yields_empty_tables() {
        assert!(DataProcessor::daily_totals(&[]).is_empty());
        assert!(DataProcessor::weather_totals(&[]).is_empty());
        assert!(DataProcessor::fill_missing_days(&[]).is_empty());
    }

    #[test]
    fn test_weather_totals_follow_code_order() {
        let records = vec![
            RentalRecord::new(date(2023, 1, 1), 4, 1),
            RentalRecord::new(date(2023, 1, 2), 3, 2),
            RentalRecord::new(date(2023, 1, 3), 1, 3),
            RentalRecord::new(date(2023, 1, 4), 3, 4),
        ];

        let codes: Vec<i64> = DataProcessor::weather_totals(&records)
            .iter()
            .map(|w| w.code.0)
            .collect();
        assert_eq!(codes, vec![1, 3, 4]);
    }

    #[test]
    fn test_unmapped_weather_code_keeps_blank_row() {
        let records = vec![
            RentalRecord::new(date(2023, 1, 1), 1, 10),
            RentalRecord::new(date(2023, 1, 2), 7, 3),
            RentalRecord::new(date(2023, 1, 3), 0, 2),
        ];

        let weather = DataProcessor::weather_totals(&records);

        assert_eq!(weather.len(), 3);
        assert_eq!(weather[0].code, WeatherCode(0));
        assert_eq!(weather[0].label, None);
        assert_eq!(weather[1].label, Some("Clear"));
        assert_eq!(weather[2].code, WeatherCode(7));
        assert_eq!(weather[2].label, None);
        assert_eq!(weather[2].total_rides, 3);
    }

    #[test]
    fn test_filter_single_day() {
        let records = sample_records();
        let day = date(2023, 1, 1);

        let filtered = DataProcessor::filter_by_date_range(&records, DateRange::new(day, day));

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.date == day));
    }

    #[test]
    fn test_filter_full_range_is_identity() {
        let table = RentalTable::new(sample_records());
        let (min, max) = table.date_bounds().unwrap();

        let filtered =
            DataProcessor::filter_by_date_range(table.records(), DateRange::new(min, max));

        assert_eq!(filtered.as_slice(), table.records());
    }

    #[test]
    fn test_filter_range_outside_data_is_empty() {
        let filtered = DataProcessor::filter_by_date_range(
            &sample_records(),
            DateRange::new(date(2024, 1, 1), date(2024, 2, 1)),
        );
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_fill_missing_days_inserts_zero_rows() {
        let daily = vec![
            DailyTotal {
                date: date(2023, 1, 1),
                total_rides: 4,
            },
            DailyTotal {
                date: date(2023, 1, 4),
                total_rides: 6,
            },
        ];

        let filled = DataProcessor::fill_missing_days(&daily);

        let totals: Vec<i64> = filled.iter().map(|d| d.total_rides).collect();
        assert_eq!(totals, vec![4, 0, 0, 6]);
        assert_eq!(filled[1].date, date(2023, 1, 2));
        assert_eq!(filled[3].date, date(2023, 1, 4));
    }

    #[test]
    fn test_date_range_clamped() {
        let bounds = DateRange::new(date(2011, 1, 1), date(2012, 12, 31));

        let range = DateRange::clamped(date(2010, 6, 1), date(2013, 1, 1), bounds);
        assert_eq!(range, bounds);

        let range = DateRange::clamped(date(2012, 3, 1), date(2011, 3, 1), bounds);
        assert_eq!(range, DateRange::new(date(2011, 3, 1), date(2012, 3, 1)));

        let day = date(2011, 7, 4);
        assert_eq!(DateRange::clamped(day, day, bounds).num_days(), 1);
    }

    #[test]
    fn test_report_build() {
        let table = RentalTable::new(sample_records());
        let range = DateRange::new(date(2023, 1, 2), date(2023, 1, 2));

        let report = RideReport::build(&table, range, false);

        assert_eq!(report.record_count, 1);
        assert_eq!(report.total_rides(), 20);
        assert_eq!(report.weather.len(), 1);
        assert_eq!(report.weather[0].label, Some("Clear"));
    }

    #[test]
    fn test_report_build_with_gap_filling() {
        let table = RentalTable::new(vec![
            RentalRecord::new(date(2023, 1, 1), 1, 3),
            RentalRecord::new(date(2023, 1, 3), 1, 5),
        ]);
        let (min, max) = table.date_bounds().unwrap();

        let report = RideReport::build(&table, DateRange::new(min, max), true);

        assert_eq!(report.daily.len(), 3);
        assert_eq!(report.daily[1].total_rides, 0);
        assert_eq!(report.total_rides(), 8);
    }

    fn arb_record(valid_weather: bool) -> impl Strategy<Value = RentalRecord> {
        let weather = if valid_weather { 1i64..=4 } else { -2i64..=8 };
        (0i64..60, weather, 0i64..10_000).prop_map(|(offset, weather, count)| {
            let date = date(2011, 1, 1) + chrono::Duration::days(offset);
            RentalRecord::new(date, weather, count)
        })
    }

    proptest! {
        #[test]
        fn prop_daily_totals_preserve_sum(records in prop::collection::vec(arb_record(false), 1..200)) {
            let daily = DataProcessor::daily_totals(&records);
            let expected: i64 = records.iter().map(|r| r.count).sum();
            prop_assert_eq!(daily.iter().map(|d| d.total_rides).sum::<i64>(), expected);
        }

        #[test]
        fn prop_daily_totals_strictly_ascending_one_row_per_date(
            records in prop::collection::vec(arb_record(false), 0..200)
        ) {
            let daily = DataProcessor::daily_totals(&records);
            prop_assert!(daily.windows(2).all(|w| w[0].date < w[1].date));

            let distinct: BTreeSet<NaiveDate> = records.iter().map(|r| r.date).collect();
            prop_assert_eq!(daily.len(), distinct.len());
        }

        #[test]
        fn prop_weather_totals_one_row_per_valid_code(
            records in prop::collection::vec(arb_record(true), 0..200)
        ) {
            let weather = DataProcessor::weather_totals(&records);
            prop_assert!(weather.len() <= 4);

            let distinct: BTreeSet<i64> = records.iter().map(|r| r.weather.0).collect();
            prop_assert_eq!(weather.len(), distinct.len());
            prop_assert!(weather.iter().all(|w| w.label.is_some()));
            prop_assert!(weather.windows(2).all(|w| w[0].code < w[1].code));

            let expected: i64 = records.iter().map(|r| r.count).sum();
            prop_assert_eq!(weather.iter().map(|w| w.total_rides).sum::<i64>(), expected);
        }

        #[test]
        fn prop_weather_totals_for_mapped_codes_match_input(
            records in prop::collection::vec(arb_record(false), 0..200)
        ) {
            let weather = DataProcessor::weather_totals(&records);
            let mapped = |code: i64| (1..=4).contains(&code);

            let expected: i64 = records
                .iter()
                .filter(|r| mapped(r.weather.0))
                .map(|r| r.count)
                .sum();
            let mapped_totals: Vec<&WeatherTotal> =
                weather.iter().filter(|w| mapped(w.code.0)).collect();

            prop_assert!(mapped_totals.len() <= 4);
            prop_assert!(mapped_totals.iter().all(|w| w.label.is_some()));
            prop_assert_eq!(mapped_totals.iter().map(|w| w.total_rides).sum::<i64>(), expected);
            prop_assert!(weather
                .iter()
                .filter(|w| !mapped(w.code.0))
                .all(|w| w.label.is_none()));
        }

        #[test]
        fn prop_filter_single_day_matches_exact_date(
            records in prop::collection::vec(arb_record(false), 0..200),
            offset in 0i64..60,
        ) {
            let day = date(2011, 1, 1) + chrono::Duration::days(offset);
            let filtered = DataProcessor::filter_by_date_range(&records, DateRange::new(day, day));

            prop_assert!(filtered.iter().all(|r| r.date == day));
            prop_assert_eq!(filtered.len(), records.iter().filter(|r| r.date == day).count());
        }

        #[test]
        fn prop_filter_full_range_is_identity(records in prop::collection::vec(arb_record(false), 1..200)) {
            let table = RentalTable::new(records);
            let (min, max) = table.date_bounds().unwrap();
            let filtered = DataProcessor::filter_by_date_range(table.records(), DateRange::new(min, max));
            prop_assert_eq!(filtered.as_slice(), table.records());
        }

        #[test]
        fn prop_gap_filling_covers_every_day(records in prop::collection::vec(arb_record(false), 1..100)) {
            let daily = DataProcessor::daily_totals(&records);
            let filled = DataProcessor::fill_missing_days(&daily);

            let span = (daily.last().unwrap().date - daily[0].date).num_days() + 1;
            prop_assert_eq!(filled.len() as i64, span);
            prop_assert_eq!(
                filled.iter().map(|d| d.total_rides).sum::<i64>(),
                daily.iter().map(|d| d.total_rides).sum::<i64>()
            );
        }
    }
}
