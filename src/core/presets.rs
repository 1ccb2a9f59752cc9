use crate::core::estimator::{ScenarioInput, Season};
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

/// Named weather situations that pre-fill the scenario estimator.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, PartialEq, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Cold,
    Mild,
    Hot,
    Storm,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PresetWeather {
    pub temperature: f64,
    pub wind: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub season: Season,
}

impl Preset {
    pub fn weather(&self) -> PresetWeather {
        let (temperature, wind, humidity, precipitation, season) = match self {
            Preset::Cold => (-5., 25., 80., 0., Season::Winter),
            Preset::Mild => (18., 10., 65., 0., Season::Spring),
            Preset::Hot => (33., 5., 40., 0., Season::Summer),
            Preset::Storm => (8., 70., 95., 15., Season::Autumn),
        };

        PresetWeather {
            temperature,
            wind,
            humidity,
            precipitation,
            season,
        }
    }

    /// Overwrites the weather fields and season of `input`; department and day type are kept.
    pub fn apply_to(&self, input: &mut ScenarioInput) {
        let weather = self.weather();
        input.temperature = weather.temperature;
        input.wind = weather.wind;
        input.humidity = weather.humidity;
        input.precipitation = weather.precipitation;
        input.season = weather.season.into();
    }
}
