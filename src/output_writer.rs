use crate::core::records::{DailyDepartmentWeather, DailyRegionConsumption};
use crate::output::Output;
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;
use tracing::info;

const REGION_CONSUMPTION_HEADINGS: [(&str, &str); 5] = [
    ("Region", "[code]"),
    ("Date", "[yyyy-mm-dd]"),
    ("Consumption", "[MW]"),
    ("Valid measurements", "[count]"),
    ("Quality", "[indicator]"),
];

const DEPARTMENT_WEATHER_HEADINGS: [(&str, &str); 9] = [
    ("Department", "[code]"),
    ("Date", "[yyyy-mm-dd]"),
    ("Mean temperature", "[deg C]"),
    ("Mean humidity", "[%]"),
    ("Total precipitation", "[mm]"),
    ("Mean wind speed", "[m/s]"),
    ("Valid observations", "[count]"),
    ("Stations used", "[count]"),
    ("Quality", "[indicator]"),
];

fn optional(value: Option<Decimal>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn write_table<const N: usize>(
    writer: impl Write,
    headings: &[(&str, &str); N],
    rows: impl Iterator<Item = [String; N]>,
) -> anyhow::Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(headings.iter().map(|(heading, _)| heading))?;
    writer.write_record(headings.iter().map(|(_, unit)| unit))?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes daily regional consumption as CSV: a heading row, a units row, then one row per day.
pub fn write_region_consumption_csv(
    output: &impl Output,
    location_key: &str,
    aggregates: &[DailyRegionConsumption],
) -> anyhow::Result<()> {
    if output.is_noop() {
        return Ok(());
    }
    info!("writing {} daily consumption rows to {location_key}", aggregates.len());

    write_table(
        output.writer_for_location_key(location_key, "csv")?,
        &REGION_CONSUMPTION_HEADINGS,
        aggregates.iter().map(|aggregate| {
            [
                aggregate.region_code.clone(),
                aggregate.date.to_string(),
                aggregate.consumption_mw.to_string(),
                aggregate.valid_measurements.to_string(),
                aggregate.quality.to_string(),
            ]
        }),
    )
}

/// Writes daily departmental weather as CSV; metrics without any observation are left empty.
pub fn write_department_weather_csv(
    output: &impl Output,
    location_key: &str,
    aggregates: &[DailyDepartmentWeather],
) -> anyhow::Result<()> {
    if output.is_noop() {
        return Ok(());
    }
    info!("writing {} daily weather rows to {location_key}", aggregates.len());

    write_table(
        output.writer_for_location_key(location_key, "csv")?,
        &DEPARTMENT_WEATHER_HEADINGS,
        aggregates.iter().map(|aggregate| {
            [
                aggregate.department_code.clone(),
                aggregate.date.to_string(),
                aggregate.mean_temperature_c.to_string(),
                optional(aggregate.mean_humidity_pct),
                aggregate.total_precipitation_mm.to_string(),
                optional(aggregate.mean_wind_speed_ms),
                aggregate.valid_observations.to_string(),
                aggregate.stations_used.to_string(),
                aggregate.quality.to_string(),
            ]
        }),
    )
}

pub fn write_json(
    output: &impl Output,
    location_key: &str,
    value: &impl Serialize,
) -> anyhow::Result<()> {
    if output.is_noop() {
        return Ok(());
    }
    let mut writer = output.writer_for_location_key(location_key, "json")?;
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;

    Ok(())
}
