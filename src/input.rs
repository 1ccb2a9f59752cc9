use crate::core::codes::{Code, LookupCode};
use crate::core::estimator::ScenarioInput;
use crate::interface::filters::{DayTypeFilter, FilterForm, SeasonFilter};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;

/// Reads a scenario from JSON; any field left out takes its default value.
pub fn ingest_scenario(json: impl Read) -> anyhow::Result<ScenarioInput> {
    Ok(serde_json::from_reader(json)?)
}

/// Raw values of the scenario form, as typed by the user. Blank or non-numeric entries fall back
/// to the defaults of [`ScenarioInput`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScenarioForm {
    pub temperature: Option<String>,
    pub wind: Option<String>,
    pub humidity: Option<String>,
    pub precipitation: Option<String>,
    pub department: Option<String>,
    pub season: Option<String>,
    pub day_type: Option<String>,
}

impl ScenarioForm {
    pub fn to_input(&self) -> ScenarioInput {
        let defaults = ScenarioInput::default();

        ScenarioInput {
            temperature: number_or(self.temperature.as_deref(), defaults.temperature),
            wind: number_or(self.wind.as_deref(), defaults.wind),
            humidity: number_or(self.humidity.as_deref(), defaults.humidity),
            precipitation: number_or(self.precipitation.as_deref(), defaults.precipitation),
            department: code_or(self.department.as_deref(), defaults.department),
            season: code_or(self.season.as_deref(), defaults.season),
            day_type: code_or(self.day_type.as_deref(), defaults.day_type),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn number_or(value: Option<&str>, default: f64) -> f64 {
    non_blank(value)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(default)
}

fn code_or<T: LookupCode>(value: Option<&str>, default: Code<T>) -> Code<T> {
    non_blank(value).map(Code::parse).unwrap_or(default)
}

/// Raw values of the explorer filter panel.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawFilterForm {
    pub checked_departments: Vec<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub season: Option<String>,
    pub day_type: Option<String>,
}

impl RawFilterForm {
    /// Unparseable dates count as absent; an unknown or missing season or day type means "all".
    pub fn to_form(&self) -> FilterForm {
        FilterForm {
            departments: self
                .checked_departments
                .iter()
                .map(|code| Code::parse(code.trim()))
                .collect(),
            date_start: parse_date(self.date_start.as_deref()),
            date_end: parse_date(self.date_end.as_deref()),
            season: non_blank(self.season.as_deref())
                .and_then(|season| season.parse::<SeasonFilter>().ok())
                .unwrap_or_default(),
            day_type: non_blank(self.day_type.as_deref())
                .and_then(|day_type| day_type.parse::<DayTypeFilter>().ok())
                .unwrap_or_default(),
        }
    }
}

pub(crate) fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    non_blank(value).and_then(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::departments::{Department, DepartmentCode};
    use crate::core::estimator::{DayType, Season};
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Cursor;

    #[rstest]
    fn test_empty_form_gives_defaults() {
        assert_eq!(ScenarioForm::default().to_input(), ScenarioInput::default());
    }

    #[rstest]
    fn test_form_values_are_parsed() {
        let form = ScenarioForm {
            temperature: Some("-3.5".into()),
            wind: Some(" 40 ".into()),
            humidity: Some("".into()),
            precipitation: Some("lots".into()),
            department: Some("68".into()),
            season: Some("winter".into()),
            day_type: Some("weekend".into()),
        };

        assert_eq!(
            form.to_input(),
            ScenarioInput {
                temperature: -3.5,
                wind: 40.,
                humidity: 70.,
                precipitation: 2.,
                department: Department::HautRhin.into(),
                season: Season::Winter.into(),
                day_type: DayType::Weekend.into(),
            }
        );
    }

    #[rstest]
    fn test_non_finite_numbers_fall_back_to_default() {
        let form = ScenarioForm {
            temperature: Some("NaN".into()),
            wind: Some("inf".into()),
            ..Default::default()
        };
        let input = form.to_input();

        assert_eq!(input.temperature, 15.);
        assert_eq!(input.wind, 15.);
    }

    #[rstest]
    fn test_unknown_codes_are_kept() {
        let form = ScenarioForm {
            department: Some("2A".into()),
            ..Default::default()
        };

        assert_eq!(form.to_input().department, Code::Unknown("2A".into()));
    }

    #[rstest]
    fn test_ingest_scenario_json() {
        let input = ingest_scenario(Cursor::new(r#"{"temperature": 33, "season": "summer"}"#))
            .unwrap();

        assert_eq!(input.temperature, 33.);
        assert_eq!(input.season, Season::Summer.into());
        assert_eq!(input.department, Department::Moselle.into());
    }

    #[rstest]
    fn test_ingest_scenario_rejects_unknown_fields() {
        assert!(ingest_scenario(Cursor::new(r#"{"temp": 33}"#)).is_err());
    }

    #[rstest]
    fn test_raw_filter_form() {
        let raw = RawFilterForm {
            checked_departments: vec!["57".into(), "67".into()],
            date_start: Some("2014-03-01".into()),
            date_end: Some("31/03/2014".into()),
            season: Some("spring".into()),
            day_type: Some("whenever".into()),
        };
        let form = raw.to_form();

        assert_eq!(
            form.departments,
            vec![
                DepartmentCode::from(Department::Moselle),
                DepartmentCode::from(Department::BasRhin)
            ]
        );
        assert_eq!(form.date_start, NaiveDate::from_ymd_opt(2014, 3, 1));
        assert_eq!(form.date_end, None);
        assert_eq!(form.season, SeasonFilter::Only(Season::Spring));
        assert_eq!(form.day_type, DayTypeFilter::All);
    }
}
