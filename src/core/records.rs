use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// One raw (typically half-hourly) consumption reading for a region.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ConsumptionMeasurement {
    pub region_code: String,
    pub timestamp: NaiveDateTime,
    /// in MW; absent when the meter reported nothing
    #[serde(with = "rust_decimal::serde::str_option")]
    pub consumption_mw: Option<Decimal>,
}

/// One raw observation from a weather station, attached to the department it sits in.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct WeatherObservation {
    pub department_code: String,
    pub station_id: String,
    pub local_timestamp: NaiveDateTime,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub temperature_c: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub humidity_pct: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub precipitation_mm: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub wind_speed_ms: Option<Decimal>,
}

/// Whether a daily aggregate was built from enough raw values to be trusted.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq, Deserialize, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum QualityIndicator {
    Ok,
    Incomplete,
    /// Reserved for values flagged by later plausibility checks; never produced by aggregation.
    Suspect,
}

impl QualityIndicator {
    pub fn from_valid_count(valid: usize, threshold: usize) -> Self {
        if valid >= threshold {
            QualityIndicator::Ok
        } else {
            QualityIndicator::Incomplete
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DailyRegionConsumption {
    pub region_code: String,
    pub date: NaiveDate,
    /// Mean of the valid readings of the day, in MW
    pub consumption_mw: Decimal,
    pub valid_measurements: usize,
    pub quality: QualityIndicator,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DailyDepartmentWeather {
    pub department_code: String,
    pub date: NaiveDate,
    pub mean_temperature_c: Decimal,
    pub mean_humidity_pct: Option<Decimal>,
    pub total_precipitation_mm: Decimal,
    pub mean_wind_speed_ms: Option<Decimal>,
    pub valid_observations: usize,
    pub stations_used: usize,
    pub quality: QualityIndicator,
}
