use crate::core::codes::{Code, LookupCode};
use crate::core::departments::{Department, DepartmentCode};
use crate::numbers::round_to_nearest_multiple;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Consumption, in MW, at the comfort temperature before any adjustment.
pub const BASE_CONSUMPTION_MW: f64 = 1000.;
/// Temperature at which no heating or cooling effect is assumed.
pub const COMFORT_TEMPERATURE_C: f64 = 15.;
/// Extra consumption for each degree below the comfort temperature.
pub const MW_PER_DEGREE: f64 = 25.;
const ROUNDING_STEP_MW: f64 = 10.;

#[derive(
    Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Deserialize, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl LookupCode for Season {
    fn factor(&self) -> f64 {
        match self {
            Season::Winter => 1.2,
            Season::Spring => 0.95,
            Season::Summer => 0.82,
            Season::Autumn => 1.05,
        }
    }

    fn label(&self) -> String {
        match self {
            Season::Winter => "Hiver",
            Season::Spring => "Printemps",
            Season::Summer => "Été",
            Season::Autumn => "Automne",
        }
        .into()
    }
}

#[derive(
    Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Deserialize, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl LookupCode for DayType {
    fn factor(&self) -> f64 {
        match self {
            DayType::Weekday => 1.,
            DayType::Weekend => 0.9,
        }
    }

    fn label(&self) -> String {
        match self {
            DayType::Weekday => "Semaine",
            DayType::Weekend => "Week-end",
        }
        .into()
    }
}

/// Weather and calendar parameters of a "what-if" scenario. Every field is optional when
/// deserialising and falls back to a mild autumn weekday in Moselle.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioInput {
    /// Air temperature in °C
    pub temperature: f64,
    /// Wind speed in km/h
    pub wind: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Precipitation in mm
    pub precipitation: f64,
    pub department: DepartmentCode,
    pub season: Code<Season>,
    pub day_type: Code<DayType>,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self {
            temperature: 15.,
            wind: 15.,
            humidity: 70.,
            precipitation: 2.,
            department: Department::Moselle.into(),
            season: Season::Autumn.into(),
            day_type: DayType::Weekday.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EstimationResult {
    pub consumption_mw: i64,
    pub department: DepartmentCode,
    pub season: Code<Season>,
    pub day_type: Code<DayType>,
}

/// Estimated consumption before rounding, in MW.
///
/// Only temperature, season, day type and department take part; the other weather parameters are
/// accepted for display but have no weight in this model.
pub fn unrounded_estimate(input: &ScenarioInput) -> f64 {
    let mut consumption =
        BASE_CONSUMPTION_MW + (COMFORT_TEMPERATURE_C - input.temperature) * MW_PER_DEGREE;
    consumption *= input.season.factor();
    consumption *= input.day_type.factor();
    consumption *= input.department.factor();

    consumption
}

/// Estimates the consumption of a scenario, rounded to the nearest 10 MW.
pub fn estimate(input: &ScenarioInput) -> EstimationResult {
    let consumption_mw =
        round_to_nearest_multiple(unrounded_estimate(input), ROUNDING_STEP_MW) as i64;

    EstimationResult {
        consumption_mw,
        department: input.department.clone(),
        season: input.season.clone(),
        day_type: input.day_type.clone(),
    }
}
