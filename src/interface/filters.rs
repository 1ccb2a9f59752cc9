use crate::core::codes::Code;
use crate::core::departments::{Department, DepartmentCode, MOUNTAIN_DEPARTMENTS};
use crate::core::estimator::{DayType, Season};
use crate::interface::notifications::Notification;
use crate::numbers::{format_grouped_fr, max_of_2};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum::IntoEnumIterator;

pub const DEFAULT_DEPARTMENTS: [Department; 4] = [
    Department::Ardennes,
    Department::Marne,
    Department::MeurtheEtMoselle,
    Department::Moselle,
];

const NO_DEPARTMENT_SELECTED: &str = "Aucun département sélectionné";

fn default_date_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2014, 1, 1).expect("valid date")
}

fn default_date_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2014, 12, 31).expect("valid date")
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SeasonFilter {
    #[default]
    All,
    Only(Season),
}

impl FromStr for SeasonFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SeasonFilter::All),
            other => other.parse().map(SeasonFilter::Only),
        }
    }
}

impl Display for SeasonFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SeasonFilter::All => f.write_str("all"),
            SeasonFilter::Only(season) => write!(f, "{season}"),
        }
    }
}

impl Serialize for SeasonFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DayTypeFilter {
    #[default]
    All,
    Only(DayType),
}

impl FromStr for DayTypeFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DayTypeFilter::All),
            other => other.parse().map(DayTypeFilter::Only),
        }
    }
}

impl Display for DayTypeFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DayTypeFilter::All => f.write_str("all"),
            DayTypeFilter::Only(day_type) => write!(f, "{day_type}"),
        }
    }
}

impl Serialize for DayTypeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Values read from the filter panel when the user applies it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterForm {
    pub departments: Vec<DepartmentCode>,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub season: SeasonFilter,
    pub day_type: DayTypeFilter,
}

/// The filters currently driving the explorer views. Owned by the caller and passed explicitly to
/// whatever renders from it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilterState {
    pub departments: Vec<DepartmentCode>,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub season: SeasonFilter,
    pub day_type: DayTypeFilter,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            departments: DEFAULT_DEPARTMENTS.into_iter().map(Code::from).collect(),
            date_start: default_date_start(),
            date_end: default_date_end(),
            season: SeasonFilter::All,
            day_type: DayTypeFilter::All,
        }
    }
}

impl FilterState {
    /// Replaces the filters with the form values. Dates missing from the form keep their current
    /// value.
    pub fn apply(&mut self, form: FilterForm) -> Notification {
        *self = FilterState {
            departments: form.departments,
            date_start: form.date_start.unwrap_or(self.date_start),
            date_end: form.date_end.unwrap_or(self.date_end),
            season: form.season,
            day_type: form.day_type,
        };
        tracing::info!(
            departments = self.departments.len(),
            start = %self.date_start,
            end = %self.date_end,
            season = %self.season,
            day_type = %self.day_type,
            "filters applied"
        );

        Notification::success("Filtres appliqués ! Actualisation des données...")
    }

    pub fn reset(&mut self) -> Notification {
        *self = Default::default();

        Notification::info("Filtres réinitialisés")
    }

    /// Number of days covered by the period, counting both ends; never less than one.
    pub fn days(&self) -> i64 {
        max_of_2((self.date_end - self.date_start).num_days() + 1, 1)
    }

    pub fn data_points(&self) -> i64 {
        self.days() * self.departments.len() as i64
    }

    pub fn summary(&self) -> FilterSummary {
        let departments = self
            .departments
            .iter()
            .map(|code| match code {
                Code::Known(department) => format!("{code} - {}", department.name()),
                Code::Unknown(raw) => format!("{raw} - {raw}"),
            })
            .collect::<Vec<_>>()
            .join(", ");

        FilterSummary {
            departments: if departments.is_empty() {
                NO_DEPARTMENT_SELECTED.to_string()
            } else {
                departments
            },
            period: format!(
                "{} - {}",
                self.date_start.format("%d/%m/%Y"),
                self.date_end.format("%d/%m/%Y")
            ),
            data_points: format!("{} points", format_grouped_fr(self.data_points())),
        }
    }
}

/// Text of the "current selection" panel.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FilterSummary {
    pub departments: String,
    pub period: String,
    pub data_points: String,
}

/// The department checkboxes of the filter panel, in display order.
#[derive(Clone, Debug, PartialEq)]
pub struct DepartmentCheckboxes {
    checked: IndexMap<Department, bool>,
}

impl Default for DepartmentCheckboxes {
    fn default() -> Self {
        Self {
            checked: Department::iter()
                .map(|department| (department, DEFAULT_DEPARTMENTS.contains(&department)))
                .collect(),
        }
    }
}

impl DepartmentCheckboxes {
    pub fn set(&mut self, department: Department, checked: bool) {
        self.checked.insert(department, checked);
    }

    pub fn select_all(&mut self) -> Notification {
        self.checked.values_mut().for_each(|checked| *checked = true);

        Notification::success("Tous les départements sélectionnés")
    }

    pub fn select_none(&mut self) -> Notification {
        self.checked.values_mut().for_each(|checked| *checked = false);

        Notification::info("Aucun département sélectionné")
    }

    pub fn select_mountain(&mut self) -> Notification {
        for (department, checked) in self.checked.iter_mut() {
            *checked = MOUNTAIN_DEPARTMENTS.contains(department);
        }

        Notification::success("Départements montagneux sélectionnés")
    }

    pub fn reset(&mut self) {
        *self = Default::default();
    }

    pub fn checked(&self) -> Vec<DepartmentCode> {
        self.checked
            .iter()
            .filter(|(_, checked)| **checked)
            .map(|(department, _)| Code::from(*department))
            .collect()
    }
}
