use crate::core::codes::{Code, LookupCode};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The ten departments of the Grand Est region, identified by their two-digit code.
#[derive(
    Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize,
)]
pub enum Department {
    #[strum(to_string = "08")]
    #[serde(rename = "08")]
    Ardennes,
    #[strum(to_string = "10")]
    #[serde(rename = "10")]
    Aube,
    #[strum(to_string = "51")]
    #[serde(rename = "51")]
    Marne,
    #[strum(to_string = "52")]
    #[serde(rename = "52")]
    HauteMarne,
    #[strum(to_string = "54")]
    #[serde(rename = "54")]
    MeurtheEtMoselle,
    #[strum(to_string = "55")]
    #[serde(rename = "55")]
    Meuse,
    #[strum(to_string = "57")]
    #[serde(rename = "57")]
    Moselle,
    #[strum(to_string = "67")]
    #[serde(rename = "67")]
    BasRhin,
    #[strum(to_string = "68")]
    #[serde(rename = "68")]
    HautRhin,
    #[strum(to_string = "88")]
    #[serde(rename = "88")]
    Vosges,
}

pub type DepartmentCode = Code<Department>;

/// Departments with significant upland terrain, used by the "mountain" filter shortcut.
pub const MOUNTAIN_DEPARTMENTS: [Department; 4] = [
    Department::Vosges,
    Department::HautRhin,
    Department::HauteMarne,
    Department::MeurtheEtMoselle,
];

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum WeatherSensitivity {
    #[strum(to_string = "Faible")]
    Low,
    #[strum(to_string = "Moyenne-basse")]
    MediumLow,
    #[strum(to_string = "Moyenne")]
    Medium,
    #[strum(to_string = "Moyenne-haute")]
    MediumHigh,
    #[strum(to_string = "Élevée")]
    High,
}

/// Placeholder figures shown on the department card.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DepartmentProfile {
    pub population: u32,
    pub average_consumption_mw: u32,
    pub sensitivity: WeatherSensitivity,
}

impl Department {
    pub fn name(&self) -> &'static str {
        match self {
            Department::Ardennes => "Ardennes",
            Department::Aube => "Aube",
            Department::Marne => "Marne",
            Department::HauteMarne => "Haute-Marne",
            Department::MeurtheEtMoselle => "Meurthe-et-Moselle",
            Department::Meuse => "Meuse",
            Department::Moselle => "Moselle",
            Department::BasRhin => "Bas-Rhin",
            Department::HautRhin => "Haut-Rhin",
            Department::Vosges => "Vosges",
        }
    }

    /// Multiplier applied by the scenario estimator, relative to Moselle.
    pub fn consumption_factor(&self) -> f64 {
        match self {
            Department::Ardennes => 0.85,
            Department::Aube => 0.75,
            Department::Marne => 0.9,
            Department::HauteMarne => 0.65,
            Department::MeurtheEtMoselle => 0.95,
            Department::Meuse => 0.6,
            Department::Moselle => 1.0,
            Department::BasRhin => 0.92,
            Department::HautRhin => 0.8,
            Department::Vosges => 0.7,
        }
    }

    pub fn profile(&self) -> DepartmentProfile {
        use WeatherSensitivity::*;

        let (population, average_consumption_mw, sensitivity) = match self {
            Department::Ardennes => (273_000, 850, Low),
            Department::Aube => (310_000, 750, Low),
            Department::Marne => (568_000, 900, Low),
            Department::HauteMarne => (175_000, 650, MediumLow),
            Department::MeurtheEtMoselle => (733_000, 950, Medium),
            Department::Meuse => (189_000, 600, MediumLow),
            Department::Moselle => (1_043_000, 1_000, Medium),
            Department::BasRhin => (1_133_000, 920, MediumHigh),
            Department::HautRhin => (767_000, 800, High),
            Department::Vosges => (366_000, 700, High),
        };

        DepartmentProfile {
            population,
            average_consumption_mw,
            sensitivity,
        }
    }

    pub fn is_mountainous(&self) -> bool {
        MOUNTAIN_DEPARTMENTS.contains(self)
    }
}

impl LookupCode for Department {
    fn factor(&self) -> f64 {
        self.consumption_factor()
    }

    /// e.g. "57 - Moselle"
    fn label(&self) -> String {
        format!("{self} - {}", self.name())
    }
}
