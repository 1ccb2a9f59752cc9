use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A closed table of codes, each carrying a multiplier and a human-readable label.
pub trait LookupCode: FromStr + Display + Copy {
    fn factor(&self) -> f64;
    fn label(&self) -> String;
}

/// A code as entered by a user: either one of the known table entries, or anything else kept
/// verbatim. Unknown codes never fail; they count as a multiplier of 1 and are labelled with the
/// raw code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Code<T> {
    Known(T),
    Unknown(String),
}

impl<T: LookupCode> Code<T> {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<T>() {
            Ok(known) => Code::Known(known),
            Err(_) => Code::Unknown(raw.to_string()),
        }
    }

    pub fn known(&self) -> Option<T> {
        match self {
            Code::Known(known) => Some(*known),
            Code::Unknown(_) => None,
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            Code::Known(known) => known.factor(),
            Code::Unknown(_) => 1.0,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Code::Known(known) => known.label(),
            Code::Unknown(raw) => raw.clone(),
        }
    }
}

impl<T> From<T> for Code<T> {
    fn from(value: T) -> Self {
        Code::Known(value)
    }
}

impl<T: Display> Display for Code<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Code::Known(known) => write!(f, "{known}"),
            Code::Unknown(raw) => f.write_str(raw),
        }
    }
}

impl<T: Display> Serialize for Code<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: LookupCode> Deserialize<'de> for Code<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Code::parse(&raw))
    }
}
