//! Daily Spend Forecaster
//!
//! Projects the next 30 days of spending from the mean of historical daily
//! spend, with each day scaled by a random factor in [0.8, 1.2].
//!
//! Records whose date or amount does not parse are dropped. Only an input
//! with no usable rows is an error.
//!
//! The variation source and the clock are injectable so tests can pin both:
//!
//! ```rust,ignore
//! let mut forecaster = SpendForecaster::new()
//!     .with_variation(SeededVariation::new(7))
//!     .with_clock(FixedClock(today));
//! let points = forecaster.forecast(&records)?;
//! ```

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{DailySpendRecord, ForecastPoint, ValidSpend};
use crate::money::{mean, round2};

/// Number of days in a forecast
pub const FORECAST_DAYS: usize = 30;

/// Lower bound of the daily variation factor
pub const VARIATION_MIN: f64 = 0.8;

/// Upper bound of the daily variation factor
pub const VARIATION_MAX: f64 = 1.2;

/// Source of per-day variation factors
pub trait VariationSource: Send {
    /// Next factor, expected within [`VARIATION_MIN`, `VARIATION_MAX`]
    fn next_variation(&mut self) -> f64;
}

/// Variation drawn from the thread-local RNG
#[derive(Debug, Default)]
pub struct ThreadRngVariation;

impl VariationSource for ThreadRngVariation {
    fn next_variation(&mut self) -> f64 {
        rand::thread_rng().gen_range(VARIATION_MIN..=VARIATION_MAX)
    }
}

/// Reproducible variation from a seeded RNG
#[derive(Debug)]
pub struct SeededVariation {
    rng: StdRng,
}

impl SeededVariation {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl VariationSource for SeededVariation {
    fn next_variation(&mut self) -> f64 {
        self.rng.gen_range(VARIATION_MIN..=VARIATION_MAX)
    }
}

/// The same factor every day
#[derive(Debug, Clone, Copy)]
pub struct FixedVariation(pub f64);

impl VariationSource for FixedVariation {
    fn next_variation(&mut self) -> f64 {
        self.0
    }
}

/// Provides the first day of a forecast
pub trait Clock: Send {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A pinned date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Records split into usable rows and a count of dropped ones
#[derive(Debug, Clone, Default)]
pub struct ParsedSpends {
    pub valid: Vec<ValidSpend>,
    pub dropped: usize,
}

/// Parse a date in any of the accepted layouts
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `MM/DD/YYYY`, RFC 3339 timestamps, and
/// naive `YYYY-MM-DD[T ]HH:MM:SS[.f]` timestamps.
pub fn parse_spend_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    None
}

/// Parse an amount from a JSON number or numeric string
///
/// Negative and non-finite amounts are rejected.
pub fn parse_spend_amount(raw: &Value) -> Option<f64> {
    let amount = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if amount.is_finite() && amount >= 0.0 {
        Some(amount)
    } else {
        None
    }
}

impl DailySpendRecord {
    /// Parse into a usable row, `None` when either field is bad
    pub fn parse(&self) -> Option<ValidSpend> {
        let date = self.date.as_str().and_then(parse_spend_date)?;
        let amount = parse_spend_amount(&self.amount)?;
        Some(ValidSpend { date, amount })
    }
}

/// Split records into usable rows and dropped ones
pub fn parse_daily_spends(records: &[DailySpendRecord]) -> ParsedSpends {
    let mut parsed = ParsedSpends::default();
    for record in records {
        match record.parse() {
            Some(spend) => parsed.valid.push(spend),
            None => parsed.dropped += 1,
        }
    }
    parsed
}

/// Forecasts daily spend from a historical mean
pub struct SpendForecaster {
    variation: Box<dyn VariationSource>,
    clock: Box<dyn Clock>,
}

impl SpendForecaster {
    /// Forecaster using the thread RNG and the local date
    pub fn new() -> Self {
        Self {
            variation: Box::new(ThreadRngVariation),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_variation(mut self, variation: impl VariationSource + 'static) -> Self {
        self.variation = Box::new(variation);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Forecast the next [`FORECAST_DAYS`] days starting today
    pub fn forecast(&mut self, records: &[DailySpendRecord]) -> Result<Vec<ForecastPoint>> {
        if records.is_empty() {
            return Err(Error::InvalidInput("No spending data provided".to_string()));
        }

        let parsed = parse_daily_spends(records);
        if parsed.dropped > 0 {
            warn!(
                dropped = parsed.dropped,
                received = records.len(),
                "Dropped invalid daily spend records"
            );
        }

        let amounts: Vec<f64> = parsed.valid.iter().map(|s| s.amount).collect();
        let avg_daily_spend = mean(&amounts)
            .ok_or_else(|| Error::InsufficientData("All data was invalid or empty".to_string()))?;

        debug!(
            valid = amounts.len(),
            avg_daily_spend, "Projecting daily spend"
        );

        Ok(self.project(avg_daily_spend))
    }

    /// Project [`FORECAST_DAYS`] points around a known daily average
    pub fn project(&mut self, avg_daily_spend: f64) -> Vec<ForecastPoint> {
        let start = self.clock.today();
        (0..FORECAST_DAYS)
            .map(|offset| {
                let variation = self
                    .variation
                    .next_variation()
                    .clamp(VARIATION_MIN, VARIATION_MAX);
                ForecastPoint {
                    date: start + Duration::days(offset as i64),
                    amount: round2(avg_daily_spend * variation),
                }
            })
            .collect()
    }
}

impl Default for SpendForecaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_records() -> Vec<DailySpendRecord> {
        (0..30)
            .map(|i| {
                let date = day(2026, 1, 1) + Duration::days(i);
                DailySpendRecord::new(
                    date.format("%Y-%m-%d").to_string(),
                    1000 + (i % 7) * 200,
                )
            })
            .collect()
    }

    #[test]
    fn test_forecast_thirty_consecutive_days() {
        let today = day(2026, 10, 16);
        let mut forecaster = SpendForecaster::new()
            .with_variation(SeededVariation::new(42))
            .with_clock(FixedClock(today));

        let points = forecaster.forecast(&sample_records()).unwrap();

        assert_eq!(points.len(), FORECAST_DAYS);
        assert_eq!(points[0].date, today);
        for pair in points.windows(2) {
            assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
        }
        // Crosses the month boundary
        assert_eq!(points[29].date, day(2026, 11, 14));
    }

    #[test]
    fn test_forecast_amounts_within_envelope() {
        let records = sample_records();
        let amounts: Vec<f64> = records
            .iter()
            .filter_map(|r| r.parse())
            .map(|s| s.amount)
            .collect();
        let avg = mean(&amounts).unwrap();

        for seed in 0..20 {
            let mut forecaster = SpendForecaster::new().with_variation(SeededVariation::new(seed));
            for point in forecaster.forecast(&records).unwrap() {
                assert!(point.amount >= round2(avg * VARIATION_MIN));
                assert!(point.amount <= round2(avg * VARIATION_MAX));
            }
        }
    }

    #[test]
    fn test_default_forecaster_starts_today() {
        let mut forecaster = SpendForecaster::default();
        let points = forecaster
            .forecast(&[DailySpendRecord::new("2026-01-01", 50)])
            .unwrap();
        let today = Local::now().date_naive();
        // Tolerate a midnight rollover between the two clock reads
        assert!(points[0].date == today || points[0].date + Duration::days(1) == today);
        assert!(points.iter().all(|p| (40.0..=60.0).contains(&p.amount)));
    }

    #[test]
    fn test_fixed_variation_is_deterministic() {
        let mut forecaster = SpendForecaster::new()
            .with_variation(FixedVariation(1.1))
            .with_clock(FixedClock(day(2026, 1, 1)));

        let records = vec![
            DailySpendRecord::new("2025-12-01", 100),
            DailySpendRecord::new("2025-12-02", 300),
        ];
        let points = forecaster.forecast(&records).unwrap();
        assert!(points.iter().all(|p| p.amount == 220.0));
    }

    #[test]
    fn test_out_of_range_variation_is_clamped() {
        let mut forecaster = SpendForecaster::new().with_variation(FixedVariation(5.0));
        let points = forecaster.project(100.0);
        assert!(points.iter().all(|p| p.amount == 120.0));
    }

    #[test]
    fn test_seeded_variation_reproducible() {
        let clock = FixedClock(day(2026, 5, 1));
        let mut a = SpendForecaster::new()
            .with_variation(SeededVariation::new(9))
            .with_clock(clock);
        let mut b = SpendForecaster::new()
            .with_variation(SeededVariation::new(9))
            .with_clock(clock);
        assert_eq!(a.project(321.0), b.project(321.0));
    }

    #[test]
    fn test_invalid_rows_dropped() {
        let records = vec![
            DailySpendRecord::new("2026-01-01", 100),
            DailySpendRecord::new("not a date", 500),
            DailySpendRecord::new("2026-01-02", "abc"),
            DailySpendRecord::new("2026-01-03", "300"),
            DailySpendRecord::new(json!(null), 10),
            DailySpendRecord::new("2026-01-04", -50),
        ];

        let parsed = parse_daily_spends(&records);
        assert_eq!(parsed.valid.len(), 2);
        assert_eq!(parsed.dropped, 4);

        let mut forecaster = SpendForecaster::new().with_variation(FixedVariation(1.0));
        let points = forecaster.forecast(&records).unwrap();
        assert!(points.iter().all(|p| p.amount == 200.0));
    }

    #[test]
    fn test_all_invalid_is_insufficient_data() {
        let records = vec![
            DailySpendRecord::new("yesterday", 100),
            DailySpendRecord::new("2026-01-01", json!({"value": 1})),
        ];
        let err = SpendForecaster::new().forecast(&records).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let err = SpendForecaster::new().forecast(&[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_parse_spend_date_formats() {
        let expected = day(2026, 3, 9);
        for raw in [
            "2026-03-09",
            "2026/03/09",
            "03/09/2026",
            "2026-03-09T14:30:00Z",
            "2026-03-09T14:30:00+05:30",
            "2026-03-09T14:30:00.123",
            "2026-03-09 08:00:00",
            "  2026-03-09  ",
        ] {
            assert_eq!(parse_spend_date(raw), Some(expected), "format: {}", raw);
        }
        assert_eq!(parse_spend_date("2026-02-30"), None);
        assert_eq!(parse_spend_date(""), None);
    }

    #[test]
    fn test_parse_spend_amount() {
        assert_eq!(parse_spend_amount(&json!(12.5)), Some(12.5));
        assert_eq!(parse_spend_amount(&json!(" 7 ")), Some(7.0));
        assert_eq!(parse_spend_amount(&json!(0)), Some(0.0));
        assert_eq!(parse_spend_amount(&json!("NaN")), None);
        assert_eq!(parse_spend_amount(&json!(true)), None);
        assert_eq!(parse_spend_amount(&json!(-1)), None);
    }
}
