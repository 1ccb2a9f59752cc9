use crate::core::records::{
    ConsumptionMeasurement, DailyDepartmentWeather, DailyRegionConsumption, WeatherObservation,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Read access to raw measurements and observations.
pub trait MeasurementStore {
    /// Consumption measurements of a region between `start` and `end` (both inclusive), oldest
    /// first.
    fn consumption_measurements(
        &self,
        region_code: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<ConsumptionMeasurement>;

    /// Weather observations of a department between `start` and `end` (both inclusive), oldest
    /// first.
    fn weather_observations(
        &self,
        department_code: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<WeatherObservation>;

    fn count_weather_observations(
        &self,
        department_code: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> usize {
        self.weather_observations(department_code, start, end).len()
    }
}

/// Storage for daily aggregates, unique per (code, date).
pub trait AggregateStore {
    /// Removes the consumption aggregates of a region between `start` and `end` (inclusive),
    /// returning how many were removed.
    fn delete_region_consumption(&mut self, region_code: &str, start: NaiveDate, end: NaiveDate)
        -> usize;
    fn save_region_consumption(&mut self, aggregates: Vec<DailyRegionConsumption>);
    fn region_consumption(
        &self,
        region_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<DailyRegionConsumption>;

    fn delete_department_weather(
        &mut self,
        department_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> usize;
    fn save_department_weather(&mut self, aggregates: Vec<DailyDepartmentWeather>);
    fn department_weather(
        &self,
        department_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<DailyDepartmentWeather>;
}

/// Keeps everything in ordered maps so range queries come back chronologically.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    measurements: BTreeMap<(String, NaiveDateTime), Vec<ConsumptionMeasurement>>,
    observations: BTreeMap<(String, NaiveDateTime), Vec<WeatherObservation>>,
    region_consumption: BTreeMap<(String, NaiveDate), DailyRegionConsumption>,
    department_weather: BTreeMap<(String, NaiveDate), DailyDepartmentWeather>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn insert_measurements(
        &mut self,
        measurements: impl IntoIterator<Item = ConsumptionMeasurement>,
    ) {
        for measurement in measurements {
            self.measurements
                .entry((measurement.region_code.clone(), measurement.timestamp))
                .or_default()
                .push(measurement);
        }
    }

    pub fn insert_observations(
        &mut self,
        observations: impl IntoIterator<Item = WeatherObservation>,
    ) {
        for observation in observations {
            self.observations
                .entry((observation.department_code.clone(), observation.local_timestamp))
                .or_default()
                .push(observation);
        }
    }
}

fn in_range<K: Ord + Copy, V: Clone>(
    map: &BTreeMap<(String, K), V>,
    code: &str,
    start: K,
    end: K,
) -> Vec<V> {
    if start > end {
        return vec![];
    }
    map.range((code.to_string(), start)..=(code.to_string(), end))
        .map(|(_, value)| value.clone())
        .collect()
}

fn remove_range<K: Ord + Copy, V>(
    map: &mut BTreeMap<(String, K), V>,
    code: &str,
    start: K,
    end: K,
) -> usize {
    let before = map.len();
    map.retain(|(entry_code, key), _| !(entry_code == code && *key >= start && *key <= end));
    before - map.len()
}

impl MeasurementStore for InMemoryStore {
    fn consumption_measurements(
        &self,
        region_code: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<ConsumptionMeasurement> {
        in_range(&self.measurements, region_code, start, end)
            .into_iter()
            .flatten()
            .collect()
    }

    fn weather_observations(
        &self,
        department_code: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<WeatherObservation> {
        in_range(&self.observations, department_code, start, end)
            .into_iter()
            .flatten()
            .collect()
    }
}

impl AggregateStore for InMemoryStore {
    fn delete_region_consumption(
        &mut self,
        region_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> usize {
        remove_range(&mut self.region_consumption, region_code, start, end)
    }

    fn save_region_consumption(&mut self, aggregates: Vec<DailyRegionConsumption>) {
        for aggregate in aggregates {
            self.region_consumption
                .insert((aggregate.region_code.clone(), aggregate.date), aggregate);
        }
    }

    fn region_consumption(
        &self,
        region_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<DailyRegionConsumption> {
        in_range(&self.region_consumption, region_code, start, end)
    }

    fn delete_department_weather(
        &mut self,
        department_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> usize {
        remove_range(&mut self.department_weather, department_code, start, end)
    }

    fn save_department_weather(&mut self, aggregates: Vec<DailyDepartmentWeather>) {
        for aggregate in aggregates {
            self.department_weather
                .insert((aggregate.department_code.clone(), aggregate.date), aggregate);
        }
    }

    fn department_weather(
        &self,
        department_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<DailyDepartmentWeather> {
        in_range(&self.department_weather, department_code, start, end)
    }
}
