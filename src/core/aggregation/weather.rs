use crate::core::aggregation::{period_bounds, round_half_up, rounded_mean, AggregationReport};
use crate::core::records::{DailyDepartmentWeather, QualityIndicator, WeatherObservation};
use crate::core::store::{AggregateStore, MeasurementStore};
use chrono::NaiveDate;
use itertools::Itertools;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Below this many observations with a temperature, a day is incomplete.
pub const VALID_OBSERVATIONS_FOR_OK: usize = 18;
/// Decimal places kept on daily values.
pub const WEATHER_SCALE: u32 = 2;

/// Rebuilds the daily weather aggregates of a department over an inclusive date range.
///
/// Each metric is averaged over the observations that carry it; the temperature decides whether a
/// day is usable and how many observations count as valid. Missing precipitation counts as none.
#[instrument(skip(observations, aggregates))]
pub fn aggregate_department_weather(
    observations: &impl MeasurementStore,
    aggregates: &mut impl AggregateStore,
    department_code: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> AggregationReport {
    info!(
        "starting daily weather aggregation for department {department_code}, {start} to {end}"
    );

    let (from, to) = period_bounds(start, end);
    let records = observations.weather_observations(department_code, from, to);
    let mut report = AggregationReport {
        records_read: records.len(),
        ..Default::default()
    };

    if records.is_empty() {
        warn!(
            "no observations for department {department_code} between {start} and {end}, nothing aggregated"
        );
        return report;
    }
    info!(
        "{} observations read for department {department_code}",
        records.len()
    );

    report.aggregates_replaced =
        aggregates.delete_department_weather(department_code, start, end);
    info!(
        "{} previous aggregates removed for department {department_code}",
        report.aggregates_replaced
    );

    let mut daily = vec![];
    let by_day = records
        .into_iter()
        .chunk_by(|observation| observation.local_timestamp.date());
    for (day, observations_of_day) in &by_day {
        let observations_of_day: Vec<WeatherObservation> = observations_of_day.collect();
        match aggregate_day(department_code, day, &observations_of_day) {
            Some(aggregate) => {
                debug!(
                    "{day}: {}/{} observations with temperature, {} stations, temp {}°C, humidity {:?}%, precipitation {}mm, wind {:?}m/s, quality {}",
                    aggregate.valid_observations,
                    observations_of_day.len(),
                    aggregate.stations_used,
                    aggregate.mean_temperature_c,
                    aggregate.mean_humidity_pct,
                    aggregate.total_precipitation_mm,
                    aggregate.mean_wind_speed_ms,
                    aggregate.quality
                );
                report.days_aggregated.push(day);
                daily.push(aggregate);
            }
            None => {
                warn!(
                    "{day}: no temperature among {} observations for department {department_code}, day skipped",
                    observations_of_day.len()
                );
                report.days_skipped.push(day);
            }
        }
    }

    if daily.is_empty() {
        warn!(
            "no daily aggregate to save for department {department_code} between {start} and {end}"
        );
        return report;
    }

    aggregates.save_department_weather(daily);
    info!(
        "weather aggregation done, {} days saved for department {department_code}",
        report.days_aggregated.len()
    );

    report
}

fn present(
    observations: &[WeatherObservation],
    metric: fn(&WeatherObservation) -> Option<Decimal>,
) -> Vec<Decimal> {
    observations.iter().filter_map(metric).collect()
}

fn aggregate_day(
    department_code: &str,
    day: NaiveDate,
    observations: &[WeatherObservation],
) -> Option<DailyDepartmentWeather> {
    let temperatures = present(observations, |o| o.temperature_c);
    let mean_temperature_c = rounded_mean(&temperatures, WEATHER_SCALE)?;

    let total_precipitation_mm = round_half_up(
        observations
            .iter()
            .map(|o| o.precipitation_mm.unwrap_or_default())
            .sum(),
        WEATHER_SCALE,
    );
    // ids are compared as reported; only blank ones are left out
    let stations_used = observations
        .iter()
        .map(|o| o.station_id.as_str())
        .filter(|station_id| !station_id.trim().is_empty())
        .collect::<HashSet<_>>()
        .len();

    Some(DailyDepartmentWeather {
        department_code: department_code.to_string(),
        date: day,
        mean_temperature_c,
        mean_humidity_pct: rounded_mean(&present(observations, |o| o.humidity_pct), WEATHER_SCALE),
        total_precipitation_mm,
        mean_wind_speed_ms: rounded_mean(
            &present(observations, |o| o.wind_speed_ms),
            WEATHER_SCALE,
        ),
        valid_observations: temperatures.len(),
        stations_used,
        quality: QualityIndicator::from_valid_count(temperatures.len(), VALID_OBSERVATIONS_FOR_OK),
    })
}
