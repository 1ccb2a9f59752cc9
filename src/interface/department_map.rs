use crate::core::codes::Code;
use crate::core::departments::{Department, DepartmentCode};
use crate::interface::notifications::Notification;
use crate::numbers::format_grouped_fr;
use serde::Serialize;

const NOT_AVAILABLE: &str = "N/A";

/// Inline style of one clickable area of the region map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AreaStyle {
    pub opacity: f64,
    pub brightness: f64,
    pub stroke_width: Option<f64>,
}

const HIGHLIGHTED: AreaStyle = AreaStyle {
    opacity: 1.,
    brightness: 1.2,
    stroke_width: None,
};

const DIMMED: AreaStyle = AreaStyle {
    opacity: 0.7,
    brightness: 1.,
    stroke_width: None,
};

/// Selection and hover state of the region map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DepartmentMap {
    selected: Option<Department>,
    hovered: Option<Department>,
}

impl DepartmentMap {
    pub fn selected(&self) -> Option<Department> {
        self.selected
    }

    /// Selects a department and returns the card to show for it. Codes outside the region leave
    /// the current highlight untouched but still produce a card.
    pub fn select(&mut self, code: &DepartmentCode) -> (DepartmentCard, Notification) {
        if let Code::Known(department) = code {
            self.selected = Some(*department);
        }
        let card = DepartmentCard::new(code);
        let notification = Notification::info(format!("Département {} sélectionné", card.title));

        (card, notification)
    }

    pub fn hover(&mut self, department: Department) {
        self.hovered = Some(department);
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    pub fn area_style(&self, department: Department) -> AreaStyle {
        if self.selected == Some(department) {
            AreaStyle {
                stroke_width: Some(3.),
                ..HIGHLIGHTED
            }
        } else if self.hovered == Some(department) {
            HIGHLIGHTED
        } else {
            DIMMED
        }
    }
}

/// Details panel shown next to the map for the selected department.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DepartmentCard {
    pub title: String,
    pub population: String,
    pub average_consumption: String,
    pub sensitivity: String,
    pub analysis_link: String,
}

impl DepartmentCard {
    pub fn new(code: &DepartmentCode) -> Self {
        let analysis_link = format!("explorer.html?dept={code}");

        match code {
            Code::Known(department) => {
                let profile = department.profile();
                Self {
                    title: format!("{department} - {}", department.name()),
                    population: format_grouped_fr(profile.population.into()),
                    average_consumption: format!(
                        "{} MW",
                        format_grouped_fr(profile.average_consumption_mw.into())
                    ),
                    sensitivity: profile.sensitivity.to_string(),
                    analysis_link,
                }
            }
            Code::Unknown(raw) => Self {
                title: raw.clone(),
                population: NOT_AVAILABLE.into(),
                average_consumption: NOT_AVAILABLE.into(),
                sensitivity: NOT_AVAILABLE.into(),
                analysis_link,
            },
        }
    }
}

/// Checks that two different departments were picked for a side-by-side comparison.
pub fn compare_departments(
    first: Option<&DepartmentCode>,
    second: Option<&DepartmentCode>,
) -> Result<(DepartmentCode, DepartmentCode), Notification> {
    match (first, second) {
        (Some(first), Some(second)) if first == second => Err(Notification::warning(
            "Veuillez sélectionner deux départements différents",
        )),
        (Some(first), Some(second)) => {
            tracing::info!("comparing {first} vs {second}");
            Ok((first.clone(), second.clone()))
        }
        _ => Err(Notification::warning(
            "Veuillez sélectionner deux départements",
        )),
    }
}
