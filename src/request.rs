use crate::errors::RequestError;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use strum_macros::Display;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// What an aggregation run is asked to cover.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AggregationKind {
    Consumption,
    Weather,
}

impl AggregationKind {
    /// Name of the parameter carrying the area code: a region for consumption, a department for
    /// weather.
    pub fn code_field(&self) -> &'static str {
        match self {
            AggregationKind::Consumption => "region_code",
            AggregationKind::Weather => "department_code",
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            AggregationKind::Consumption => "Agrégation journalière effectuée avec succès.",
            AggregationKind::Weather => "Agrégation météo effectuée avec succès.",
        }
    }
}

/// A validated aggregation request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AggregationRequest {
    pub kind: AggregationKind,
    pub code: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AggregationRequest {
    pub fn parse(
        kind: AggregationKind,
        code: &str,
        start: &str,
        end: &str,
    ) -> Result<Self, RequestError> {
        if code.trim().is_empty() {
            return Err(RequestError::BlankCode {
                field: kind.code_field(),
            });
        }
        let start_date = parse_date("start", start, "2014-01-01")?;
        let end_date = parse_date("end", end, "2014-12-31")?;
        if start_date > end_date {
            return Err(RequestError::StartAfterEnd {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self {
            kind,
            code: code.to_string(),
            start: start_date,
            end: end_date,
        })
    }

    /// Body returned once the aggregation ran.
    pub fn success_response(&self) -> IndexMap<&'static str, String> {
        IndexMap::from([
            ("message", self.kind.success_message().to_string()),
            (self.kind.code_field(), self.code.clone()),
            ("start", self.start.to_string()),
            ("end", self.end.to_string()),
        ])
    }
}

pub fn error_response(error: &RequestError) -> IndexMap<&'static str, String> {
    IndexMap::from([("error", error.to_string())])
}

fn parse_date(
    field: &'static str,
    value: &str,
    example: &'static str,
) -> Result<NaiveDate, RequestError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| RequestError::InvalidDate {
        field,
        value: value.to_string(),
        example,
    })
}
