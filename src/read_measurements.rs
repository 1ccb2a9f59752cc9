use crate::core::records::{ConsumptionMeasurement, WeatherObservation};
use anyhow::Context;
use csv::ReaderBuilder as CsvReaderBuilder;
use serde::de::DeserializeOwned;
use std::io::Read;

/// Reads consumption measurements from CSV with the header
/// `region_code,timestamp,consumption_mw`. Timestamps are local and written
/// `YYYY-MM-DDTHH:MM:SS`; an empty consumption cell means the reading is missing.
pub fn consumption_measurements_from_csv(
    file: impl Read,
) -> anyhow::Result<Vec<ConsumptionMeasurement>> {
    records_from_csv(file)
}

/// Reads weather observations from CSV with the header
/// `department_code,station_id,local_timestamp,temperature_c,humidity_pct,precipitation_mm,wind_speed_ms`.
/// Any metric cell may be empty.
pub fn weather_observations_from_csv(file: impl Read) -> anyhow::Result<Vec<WeatherObservation>> {
    records_from_csv(file)
}

fn records_from_csv<T: DeserializeOwned>(file: impl Read) -> anyhow::Result<Vec<T>> {
    let mut reader = CsvReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    reader
        .deserialize::<T>()
        .enumerate()
        .map(|(i, record)| record.with_context(|| format!("could not parse data row {}", i + 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use rust_decimal::Decimal;
    use std::io::Cursor;

    #[rstest]
    fn test_reads_measurements_with_missing_values() {
        let csv = "region_code,timestamp,consumption_mw\n\
                   44,2014-01-01T00:00:00,5210.5\n\
                   44,2014-01-01T00:30:00,\n";
        let measurements = consumption_measurements_from_csv(Cursor::new(csv)).unwrap();

        assert_eq!(
            measurements,
            vec![
                ConsumptionMeasurement {
                    region_code: "44".into(),
                    timestamp: NaiveDate::from_ymd_opt(2014, 1, 1)
                        .unwrap()
                        .and_hms_opt(0, 0, 0)
                        .unwrap(),
                    consumption_mw: Some(Decimal::new(52105, 1)),
                },
                ConsumptionMeasurement {
                    region_code: "44".into(),
                    timestamp: NaiveDate::from_ymd_opt(2014, 1, 1)
                        .unwrap()
                        .and_hms_opt(0, 30, 0)
                        .unwrap(),
                    consumption_mw: None,
                },
            ]
        );
    }

    #[rstest]
    fn test_reads_observations() {
        let csv = "department_code,station_id,local_timestamp,temperature_c,humidity_pct,precipitation_mm,wind_speed_ms\n\
                   57,57463001,2014-02-01T06:00:00,-1.5,88,, 4.2\n";
        let observations = weather_observations_from_csv(Cursor::new(csv)).unwrap();

        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].station_id, "57463001");
        assert_eq!(observations[0].temperature_c, Some(Decimal::new(-15, 1)));
        assert_eq!(observations[0].precipitation_mm, None);
        assert_eq!(observations[0].wind_speed_ms, Some(Decimal::new(42, 1)));
    }

    #[rstest]
    fn test_reports_the_bad_row() {
        let csv = "region_code,timestamp,consumption_mw\n\
                   44,2014-01-01T00:00:00,1\n\
                   44,yesterday,2\n";
        let error = consumption_measurements_from_csv(Cursor::new(csv)).unwrap_err();

        assert_eq!(error.to_string(), "could not parse data row 2");
    }

    #[rstest]
    fn test_values_are_read_exactly() {
        let csv = "department_code,station_id,local_timestamp,temperature_c,humidity_pct,precipitation_mm,wind_speed_ms\n\
                   57,57463001,2014-02-01T06:00:00,1.005,70.015,0.10,\n";
        let observations = weather_observations_from_csv(Cursor::new(csv)).unwrap();

        assert_eq!(observations[0].temperature_c, Some(Decimal::new(1005, 3)));
        assert_eq!(observations[0].humidity_pct, Some(Decimal::new(70015, 3)));
        assert_eq!(observations[0].precipitation_mm, Some(Decimal::new(10, 2)));
        assert_eq!(observations[0].wind_speed_ms, None);
    }
}
