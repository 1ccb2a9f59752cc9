pub mod core;
pub mod errors;
pub mod input;
pub mod interface;
mod numbers;
pub mod output;
pub mod output_writer;
pub mod read_measurements;
pub mod request;
mod statistics;

use crate::core::aggregation::{
    aggregate_department_weather, aggregate_region_consumption, AggregationReport,
};
use crate::core::store::{AggregateStore, InMemoryStore};
use crate::errors::ElectroMeteoError;
use crate::input::ingest_scenario;
use crate::interface::estimation_view::EstimationView;
use crate::output::Output;
use crate::output_writer::{write_department_weather_csv, write_json, write_region_consumption_csv};
use crate::read_measurements::{consumption_measurements_from_csv, weather_observations_from_csv};
use crate::request::{AggregationKind, AggregationRequest};
use std::io::Read;
use tracing::info;

pub use crate::core::estimator::{estimate, EstimationResult, ScenarioInput};

/// Estimates the consumption of a scenario given as JSON. Missing fields take their defaults.
pub fn run_estimate(input: impl Read) -> Result<EstimationView, ElectroMeteoError> {
    let input = ingest_scenario(input).map_err(ElectroMeteoError::Ingestion)?;

    Ok(EstimationView::new(&estimate(&input)))
}

/// Aggregates the raw records of `raw_records` (CSV, measurements or observations depending on the
/// request) into daily figures, then writes the stored aggregates of the period and a run report
/// to `output`.
pub fn run_aggregation(
    request: &AggregationRequest,
    raw_records: impl Read,
    output: impl Output,
) -> Result<AggregationReport, ElectroMeteoError> {
    let mut raw = InMemoryStore::new();
    let mut store = InMemoryStore::new();
    let AggregationRequest {
        kind,
        code,
        start,
        end,
    } = request;
    let location_key = format!("{kind}_{code}");

    let report = match kind {
        AggregationKind::Consumption => {
            raw.insert_measurements(
                consumption_measurements_from_csv(raw_records)
                    .map_err(ElectroMeteoError::Ingestion)?,
            );
            let report = aggregate_region_consumption(&raw, &mut store, code, *start, *end);
            write_region_consumption_csv(
                &output,
                &location_key,
                &store.region_consumption(code, *start, *end),
            )
            .map_err(ElectroMeteoError::Output)?;
            report
        }
        AggregationKind::Weather => {
            raw.insert_observations(
                weather_observations_from_csv(raw_records).map_err(ElectroMeteoError::Ingestion)?,
            );
            let report = aggregate_department_weather(&raw, &mut store, code, *start, *end);
            write_department_weather_csv(
                &output,
                &location_key,
                &store.department_weather(code, *start, *end),
            )
            .map_err(ElectroMeteoError::Output)?;
            report
        }
    };
    write_json(&output, &format!("{location_key}_report"), &report)
        .map_err(ElectroMeteoError::Output)?;
    info!(
        days = report.days_aggregated.len(),
        skipped = report.days_skipped.len(),
        "{kind} aggregation for {code} finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::SinkOutput;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Cursor;

    #[rstest]
    fn test_run_estimate_with_partial_input() {
        let view = run_estimate(Cursor::new(r#"{"temperature": -5, "season": "winter"}"#)).unwrap();

        assert_eq!(view.consumption_mw, 1800);
        assert_eq!(view.season_label, "Hiver");
    }

    #[rstest]
    fn test_run_estimate_rejects_malformed_json() {
        assert!(matches!(
            run_estimate(Cursor::new("{temperature")),
            Err(ElectroMeteoError::Ingestion(_))
        ));
    }

    #[rstest]
    fn test_run_consumption_aggregation() {
        let request =
            AggregationRequest::parse(AggregationKind::Consumption, "44", "2014-01-01", "2014-01-02")
                .unwrap();
        let csv = "region_code,timestamp,consumption_mw\n\
                   44,2014-01-01T00:00:00,5000\n\
                   44,2014-01-01T00:30:00,5100\n\
                   44,2014-01-02T00:00:00,\n\
                   44,2014-01-03T00:00:00,4000\n";

        let report = run_aggregation(&request, Cursor::new(csv), SinkOutput).unwrap();

        assert_eq!(report.records_read, 3);
        assert_eq!(
            report.days_aggregated,
            vec![chrono::NaiveDate::from_ymd_opt(2014, 1, 1).unwrap()]
        );
        assert_eq!(report.days_skipped.len(), 1);
    }

    #[rstest]
    fn test_run_weather_aggregation_reports_bad_rows() {
        let request =
            AggregationRequest::parse(AggregationKind::Weather, "57", "2014-01-01", "2014-01-02")
                .unwrap();
        let csv = "department_code,station_id,local_timestamp,temperature_c,humidity_pct,precipitation_mm,wind_speed_ms\n\
                   57,57463001,not a date,1,,,\n";

        assert!(matches!(
            run_aggregation(&request, Cursor::new(csv), SinkOutput),
            Err(ElectroMeteoError::Ingestion(_))
        ));
    }
}
