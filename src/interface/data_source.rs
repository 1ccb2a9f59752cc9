use crate::core::departments::DepartmentCode;
use crate::core::store::AggregateStore;
use crate::interface::filters::FilterState;
use crate::statistics::{mean, pearson_correlation};
use chrono::NaiveDate;
use indexmap::IndexMap;
use itertools::Itertools;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::debug;

/// Code of the Grand Est region, the only region consumption is recorded for.
pub const GRAND_EST_REGION_CODE: &str = "44";

/// Envelope every data call answers with.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// One day of the consumption chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConsumptionPoint {
    pub date: NaiveDate,
    pub consumption: f64,
    pub temperature: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DepartmentStats {
    pub avg_consumption: f64,
    pub max_consumption: f64,
    pub min_consumption: f64,
    /// Consumption/temperature correlation; absent when fewer than two days line up.
    pub correlation: Option<f64>,
}

impl DepartmentStats {
    /// Statistics over consumption and temperature series aligned by day. Returns `None` when
    /// there is no day at all.
    pub fn from_daily_series(consumption: &[f64], temperature: &[f64]) -> Option<Self> {
        Some(Self {
            avg_consumption: mean(consumption)?,
            max_consumption: consumption.iter().copied().reduce(f64::max)?,
            min_consumption: consumption.iter().copied().reduce(f64::min)?,
            correlation: pearson_correlation(consumption, temperature),
        })
    }
}

/// Where the explorer views get their figures from.
pub trait DataSource {
    fn consumption(&self, filters: &FilterState) -> ApiResponse<Vec<ConsumptionPoint>>;
    fn department_stats(&self, department: &DepartmentCode) -> ApiResponse<DepartmentStats>;
}

/// Fixed placeholder figures, whatever is asked.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleDataSource;

impl DataSource for SampleDataSource {
    fn consumption(&self, filters: &FilterState) -> ApiResponse<Vec<ConsumptionPoint>> {
        debug!(departments = filters.departments.len(), "serving sample consumption");
        let first_day = NaiveDate::from_ymd_opt(2014, 1, 1).unwrap_or_default();

        ApiResponse::ok(vec![
            ConsumptionPoint {
                date: first_day,
                consumption: 1200.,
                temperature: -2.,
            },
            ConsumptionPoint {
                date: first_day.succ_opt().unwrap_or(first_day),
                consumption: 1150.,
                temperature: -1.,
            },
        ])
    }

    fn department_stats(&self, department: &DepartmentCode) -> ApiResponse<DepartmentStats> {
        debug!(%department, "serving sample statistics");

        ApiResponse::ok(DepartmentStats {
            avg_consumption: 950.,
            max_consumption: 1500.,
            min_consumption: 600.,
            correlation: Some(-0.82),
        })
    }
}

/// Figures computed from stored daily aggregates: regional consumption joined, day by day, with
/// the mean temperature of a department.
#[derive(Debug)]
pub struct StoreDataSource<'a, S: AggregateStore> {
    store: &'a S,
}

impl<'a, S: AggregateStore> StoreDataSource<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn daily_points(
        &self,
        department: &DepartmentCode,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<ConsumptionPoint> {
        let temperatures: IndexMap<NaiveDate, f64> = self
            .store
            .department_weather(&department.to_string(), start, end)
            .into_iter()
            .filter_map(|day| Some((day.date, day.mean_temperature_c.to_f64()?)))
            .collect();

        self.store
            .region_consumption(GRAND_EST_REGION_CODE, start, end)
            .into_iter()
            .filter_map(|day| {
                Some(ConsumptionPoint {
                    date: day.date,
                    consumption: day.consumption_mw.to_f64()?,
                    temperature: *temperatures.get(&day.date)?,
                })
            })
            .collect()
    }
}

impl<S: AggregateStore> DataSource for StoreDataSource<'_, S> {
    /// Days are averaged over the selected departments' temperatures; a day is kept when at least
    /// one selected department has weather for it.
    fn consumption(&self, filters: &FilterState) -> ApiResponse<Vec<ConsumptionPoint>> {
        let points = filters
            .departments
            .iter()
            .flat_map(|department| {
                self.daily_points(department, filters.date_start, filters.date_end)
            })
            .sorted_by_key(|point| point.date)
            .chunk_by(|point| point.date)
            .into_iter()
            .filter_map(|(date, day)| {
                let day = day.collect_vec();
                let temperatures = day.iter().map(|point| point.temperature).collect_vec();
                Some(ConsumptionPoint {
                    date,
                    consumption: day.first()?.consumption,
                    temperature: mean(&temperatures)?,
                })
            })
            .collect();

        ApiResponse::ok(points)
    }

    fn department_stats(&self, department: &DepartmentCode) -> ApiResponse<DepartmentStats> {
        let points = self.daily_points(department, NaiveDate::MIN, NaiveDate::MAX);
        let consumption = points.iter().map(|point| point.consumption).collect_vec();
        let temperature = points.iter().map(|point| point.temperature).collect_vec();

        match DepartmentStats::from_daily_series(&consumption, &temperature) {
            Some(stats) => ApiResponse::ok(stats),
            None => ApiResponse {
                success: false,
                data: DepartmentStats {
                    avg_consumption: 0.,
                    max_consumption: 0.,
                    min_consumption: 0.,
                    correlation: None,
                },
            },
        }
    }
}
