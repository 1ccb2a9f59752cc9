pub mod consumption;
pub mod weather;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

pub use consumption::aggregate_region_consumption;
pub use weather::aggregate_department_weather;

/// What a single aggregation run did.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct AggregationReport {
    /// Raw records read for the period
    pub records_read: usize,
    /// Previously stored aggregates removed for the period
    pub aggregates_replaced: usize,
    pub days_aggregated: Vec<NaiveDate>,
    /// Days with raw records but no usable value
    pub days_skipped: Vec<NaiveDate>,
}

impl AggregationReport {
    pub fn saved(&self) -> bool {
        !self.days_aggregated.is_empty()
    }
}

/// First and last instants of an inclusive date range, to the second.
pub(crate) fn period_bounds(start: NaiveDate, end: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    (
        start.and_time(NaiveTime::MIN),
        end.and_hms_opt(23, 59, 59).unwrap_or_else(|| end.and_time(NaiveTime::MIN)),
    )
}

/// Rounds to `scale` decimal places, half-way cases going away from zero.
pub(crate) fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// Mean of `values` rounded half-up to `scale` decimal places, or `None` when there is no value.
pub(crate) fn rounded_mean(values: &[Decimal], scale: u32) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let total: Decimal = values.iter().sum();

    Some(round_half_up(total / Decimal::from(values.len()), scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn decimal(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[rstest]
    fn test_period_bounds_cover_whole_days() {
        let start = NaiveDate::from_ymd_opt(2014, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2014, 1, 31).unwrap();

        assert_eq!(
            period_bounds(start, end),
            (
                start.and_hms_opt(0, 0, 0).unwrap(),
                end.and_hms_opt(23, 59, 59).unwrap()
            )
        );
    }

    #[rstest]
    #[case("1.005", 2, "1.01")]
    #[case("-1.005", 2, "-1.01")]
    #[case("1.00005", 4, "1.0001")]
    #[case("1.23449", 2, "1.23")]
    fn test_round_half_up_on_exact_ties(
        #[case] value: &str,
        #[case] scale: u32,
        #[case] expected: &str,
    ) {
        assert_eq!(round_half_up(decimal(value), scale), decimal(expected));
    }

    #[rstest]
    fn test_rounded_mean() {
        assert_eq!(rounded_mean(&[], 2), None);
        // (1.0 + 1.01) / 2 = 1.005
        assert_eq!(
            rounded_mean(&[decimal("1.0"), decimal("1.01")], 2),
            Some(decimal("1.01"))
        );
        assert_eq!(
            rounded_mean(&[decimal("1"), decimal("1"), decimal("2")], 4),
            Some(decimal("1.3333"))
        );
    }
}
