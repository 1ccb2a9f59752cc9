use crate::core::aggregation::{period_bounds, rounded_mean, AggregationReport};
use crate::core::records::{ConsumptionMeasurement, DailyRegionConsumption, QualityIndicator};
use crate::core::store::{AggregateStore, MeasurementStore};
use chrono::NaiveDate;
use itertools::Itertools;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

/// A day holds 48 half-hourly readings; below this many valid ones the day is incomplete.
pub const VALID_MEASUREMENTS_FOR_OK: usize = 40;
/// Decimal places kept on the daily mean.
pub const CONSUMPTION_SCALE: u32 = 4;

/// Rebuilds the daily consumption aggregates of a region over an inclusive date range.
///
/// Stored aggregates for the period are only replaced when there is at least one raw measurement
/// in it; otherwise the store is left untouched. Readings that are missing or not strictly
/// positive are ignored, and days without any valid reading are skipped.
#[instrument(skip(measurements, aggregates))]
pub fn aggregate_region_consumption(
    measurements: &impl MeasurementStore,
    aggregates: &mut impl AggregateStore,
    region_code: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> AggregationReport {
    info!("starting daily consumption aggregation for region {region_code}, {start} to {end}");

    let (from, to) = period_bounds(start, end);
    let readings = measurements.consumption_measurements(region_code, from, to);
    let mut report = AggregationReport {
        records_read: readings.len(),
        ..Default::default()
    };

    if readings.is_empty() {
        warn!("no measurements for region {region_code} between {start} and {end}, nothing aggregated");
        return report;
    }
    info!("{} measurements read for region {region_code}", readings.len());

    report.aggregates_replaced = aggregates.delete_region_consumption(region_code, start, end);
    info!(
        "{} previous aggregates removed for region {region_code}",
        report.aggregates_replaced
    );

    let mut daily = vec![];
    let by_day = readings
        .into_iter()
        .chunk_by(|reading| reading.timestamp.date());
    for (day, readings_of_day) in &by_day {
        let readings_of_day: Vec<ConsumptionMeasurement> = readings_of_day.collect();
        match aggregate_day(region_code, day, &readings_of_day) {
            Some(aggregate) => {
                debug!(
                    "{day}: {}/{} valid measurements, mean {} MW, quality {}",
                    aggregate.valid_measurements,
                    readings_of_day.len(),
                    aggregate.consumption_mw,
                    aggregate.quality
                );
                report.days_aggregated.push(day);
                daily.push(aggregate);
            }
            None => {
                warn!("{day}: no valid measurement for region {region_code}, day skipped");
                report.days_skipped.push(day);
            }
        }
    }

    if daily.is_empty() {
        warn!("no daily aggregate to save for region {region_code} between {start} and {end}");
        return report;
    }

    aggregates.save_region_consumption(daily);
    info!(
        "consumption aggregation done, {} days saved for region {region_code}",
        report.days_aggregated.len()
    );

    report
}

fn aggregate_day(
    region_code: &str,
    day: NaiveDate,
    readings: &[ConsumptionMeasurement],
) -> Option<DailyRegionConsumption> {
    let valid: Vec<Decimal> = readings
        .iter()
        .filter_map(|reading| reading.consumption_mw)
        .filter(|value| *value > Decimal::ZERO)
        .collect();
    let consumption_mw = rounded_mean(&valid, CONSUMPTION_SCALE)?;

    Some(DailyRegionConsumption {
        region_code: region_code.to_string(),
        date: day,
        consumption_mw,
        valid_measurements: valid.len(),
        quality: QualityIndicator::from_valid_count(valid.len(), VALID_MEASUREMENTS_FOR_OK),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::InMemoryStore;
    use chrono::{Duration, NaiveDateTime};
    use pretty_assertions::assert_eq;
    use rstest::*;

    const REGION: &str = "44";

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2014, 1, day).unwrap()
    }

    fn mw(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn half_hours(day_of_month: u32, values: &[Option<&str>]) -> Vec<ConsumptionMeasurement> {
        let midnight: NaiveDateTime = day(day_of_month).and_hms_opt(0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, value)| ConsumptionMeasurement {
                region_code: REGION.into(),
                timestamp: midnight + Duration::minutes(30 * i as i64),
                consumption_mw: value.map(mw),
            })
            .collect()
    }

    #[fixture]
    fn store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        // full day with 48 readings
        store.insert_measurements(half_hours(1, &[Some("5000"); 48]));
        // partial day: 3 valid readings, one missing, one zero, one negative
        store.insert_measurements(half_hours(
            2,
            &[
                Some("4000"),
                None,
                Some("0"),
                Some("4500"),
                Some("-10"),
                Some("4200.5"),
            ],
        ));
        // a day with nothing usable
        store.insert_measurements(half_hours(3, &[None, Some("0.0")]));
        store
    }

    #[rstest]
    fn test_aggregates_each_day(store: InMemoryStore) {
        let mut aggregates = InMemoryStore::new();
        let report =
            aggregate_region_consumption(&store, &mut aggregates, REGION, day(1), day(3));

        assert_eq!(report.records_read, 56);
        assert_eq!(report.days_aggregated, vec![day(1), day(2)]);
        assert_eq!(report.days_skipped, vec![day(3)]);
        assert!(report.saved());

        let saved = aggregates.region_consumption(REGION, day(1), day(31));
        assert_eq!(saved.len(), 2);
        assert_eq!(
            saved[0],
            DailyRegionConsumption {
                region_code: REGION.into(),
                date: day(1),
                consumption_mw: mw("5000"),
                valid_measurements: 48,
                quality: QualityIndicator::Ok,
            }
        );
        assert_eq!(saved[1].valid_measurements, 3);
        assert_eq!(saved[1].quality, QualityIndicator::Incomplete);
        // (4000 + 4500 + 4200.5) / 3 = 4233.5
        assert_eq!(saved[1].consumption_mw, mw("4233.5"));
    }

    #[rstest]
    fn test_mean_is_rounded_to_four_places() {
        let mut store = InMemoryStore::new();
        store.insert_measurements(half_hours(5, &[Some("1"), Some("1"), Some("2")]));
        let mut aggregates = InMemoryStore::new();
        aggregate_region_consumption(&store, &mut aggregates, REGION, day(5), day(5));

        assert_eq!(
            aggregates.region_consumption(REGION, day(5), day(5))[0].consumption_mw,
            mw("1.3333")
        );
    }

    #[rstest]
    #[case(&["4200.0001", "4200.0002"], "4200.0002")]
    #[case(&["1.0001", "1.0002"], "1.0002")]
    #[case(&["0.00004", "0.00006"], "0.0001")]
    fn test_half_way_mean_rounds_up(#[case] readings: &[&str], #[case] expected: &str) {
        let mut store = InMemoryStore::new();
        store.insert_measurements(half_hours(
            6,
            &readings.iter().copied().map(Some).collect::<Vec<_>>(),
        ));
        let mut aggregates = InMemoryStore::new();
        aggregate_region_consumption(&store, &mut aggregates, REGION, day(6), day(6));

        assert_eq!(
            aggregates.region_consumption(REGION, day(6), day(6))[0].consumption_mw,
            mw(expected)
        );
    }

    #[rstest]
    fn test_empty_period_leaves_existing_aggregates(store: InMemoryStore) {
        let mut aggregates = InMemoryStore::new();
        aggregate_region_consumption(&store, &mut aggregates, REGION, day(1), day(2));

        let report =
            aggregate_region_consumption(&InMemoryStore::new(), &mut aggregates, REGION, day(1), day(2));

        assert_eq!(report, AggregationReport::default());
        assert!(!report.saved());
        assert_eq!(aggregates.region_consumption(REGION, day(1), day(2)).len(), 2);
    }

    #[rstest]
    fn test_rerun_replaces_previous_aggregates(store: InMemoryStore) {
        let mut aggregates = InMemoryStore::new();
        aggregate_region_consumption(&store, &mut aggregates, REGION, day(1), day(3));
        let report = aggregate_region_consumption(&store, &mut aggregates, REGION, day(1), day(3));

        assert_eq!(report.aggregates_replaced, 2);
        assert_eq!(aggregates.region_consumption(REGION, day(1), day(3)).len(), 2);
    }

    #[rstest]
    fn test_only_invalid_days_still_clear_the_period(store: InMemoryStore) {
        let mut aggregates = InMemoryStore::new();
        aggregates.save_region_consumption(vec![DailyRegionConsumption {
            region_code: REGION.into(),
            date: day(3),
            consumption_mw: Decimal::ONE,
            valid_measurements: 1,
            quality: QualityIndicator::Incomplete,
        }]);

        let report = aggregate_region_consumption(&store, &mut aggregates, REGION, day(3), day(3));

        assert_eq!(report.aggregates_replaced, 1);
        assert!(!report.saved());
        assert!(aggregates.region_consumption(REGION, day(3), day(3)).is_empty());
    }
}
