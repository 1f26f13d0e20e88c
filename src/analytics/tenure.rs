//! Tenure calculation.
//!
//! Tenure is elapsed service from the join date (taken as midnight) to the
//! measurement instant, expressed in years of a configurable length.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places shown for rates and tenures.
pub const DISPLAY_PRECISION: u32 = 1;

const SECONDS_PER_DAY: i64 = 86_400;

/// Computes tenure in years between `join_date` and `measured_at`.
///
/// The result is unrounded so that averages do not compound rounding error.
/// A join date after the measurement instant yields zero, as does a
/// non-positive `days_per_year`.
///
/// # Example
///
/// ```
/// use retention_engine::analytics::{round_for_display, tenure_years};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let joined = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let now = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let years = tenure_years(joined, now, Decimal::new(36525, 2));
/// assert_eq!(round_for_display(years).to_string(), "6.0");
/// ```
pub fn tenure_years(
    join_date: NaiveDate,
    measured_at: NaiveDateTime,
    days_per_year: Decimal,
) -> Decimal {
    let joined_at = join_date
        .and_hms_opt(0, 0, 0)
        .expect("Valid midnight time");
    let elapsed_seconds = (measured_at - joined_at).num_seconds();
    if elapsed_seconds <= 0 {
        return Decimal::ZERO;
    }

    let seconds_per_year = days_per_year * Decimal::from(SECONDS_PER_DAY);
    Decimal::from(elapsed_seconds)
        .checked_div(seconds_per_year)
        .filter(|years| *years >= Decimal::ZERO)
        .unwrap_or(Decimal::ZERO)
}

/// Rounds a value to [`DISPLAY_PRECISION`] places, half away from zero.
///
/// The result always carries exactly one decimal place, so `100` renders
/// as `100.0`.
pub fn round_for_display(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DISPLAY_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_PRECISION);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn julian_year() -> Decimal {
        dec("365.25")
    }

    #[test]
    fn test_exactly_one_julian_year() {
        // 365.25 days after 2021-01-01 00:00 is 2022-01-01 06:00.
        let years = tenure_years(
            make_date("2021-01-01"),
            make_datetime("2022-01-01", "06:00:00"),
            julian_year(),
        );
        assert_eq!(years, Decimal::ONE);
    }

    #[test]
    fn test_half_day_is_counted() {
        let years = tenure_years(
            make_date("2026-01-01"),
            make_datetime("2026-01-01", "12:00:00"),
            Decimal::ONE,
        );
        assert_eq!(years, dec("0.5"));
    }

    #[test]
    fn test_same_instant_is_zero() {
        let years = tenure_years(
            make_date("2026-01-01"),
            make_datetime("2026-01-01", "00:00:00"),
            julian_year(),
        );
        assert_eq!(years, Decimal::ZERO);
    }

    #[test]
    fn test_future_join_clamps_to_zero() {
        let years = tenure_years(
            make_date("2027-03-01"),
            make_datetime("2026-10-19", "09:00:00"),
            julian_year(),
        );
        assert_eq!(years, Decimal::ZERO);
    }

    #[test]
    fn test_zero_year_length_does_not_panic() {
        let years = tenure_years(
            make_date("2020-01-01"),
            make_datetime("2026-01-01", "00:00:00"),
            Decimal::ZERO,
        );
        assert_eq!(years, Decimal::ZERO);
    }

    #[test]
    fn test_tenure_is_unrounded() {
        let years = tenure_years(
            make_date("2020-01-01"),
            make_datetime("2026-01-01", "00:00:00"),
            julian_year(),
        );
        // 2192 days / 365.25
        assert!(years > dec("6.001") && years < dec("6.002"));
    }

    #[test]
    fn test_round_for_display_pads_whole_numbers() {
        assert_eq!(round_for_display(dec("100")).to_string(), "100.0");
        assert_eq!(round_for_display(Decimal::ZERO).to_string(), "0.0");
    }

    #[test]
    fn test_round_for_display_half_away_from_zero() {
        assert_eq!(round_for_display(dec("66.65")).to_string(), "66.7");
        assert_eq!(round_for_display(dec("66.64999")).to_string(), "66.6");
        assert_eq!(round_for_display(dec("0.05")).to_string(), "0.1");
    }
}
