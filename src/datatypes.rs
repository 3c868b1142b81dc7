use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use strum_macros::{Display, EnumString};

/// The data type of a frame column.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "snake_case")]
pub enum ColumnType {
    Int64,
    Float64,
    Bool,
    Date,
    Utf8,
}

/// A single cell of a data frame.
///
/// `Absent` marks a cell with no successfully parsed value; it is not an
/// error by itself.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Text(String),
    Absent,
}

impl Value {
    /// Returns the column type this value belongs to, or `None` for
    /// `Absent`.
    #[must_use]
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Self::Int(_) => Some(ColumnType::Int64),
            Self::Float(_) => Some(ColumnType::Float64),
            Self::Bool(_) => Some(ColumnType::Bool),
            Self::Date(_) => Some(ColumnType::Date),
            Self::Text(_) => Some(ColumnType::Utf8),
            Self::Absent => None,
        }
    }

    /// Converts this value into a JSON value.
    ///
    /// Returns `None` for a non-finite float, which JSON cannot represent.
    #[must_use]
    pub fn into_json_value(self) -> Option<serde_json::Value> {
        match self {
            Self::Int(x) => Some(serde_json::Value::Number(x.into())),
            Self::Float(x) => Number::from_f64(x).map(serde_json::Value::Number),
            Self::Bool(x) => Some(serde_json::Value::Bool(x)),
            Self::Date(x) => Some(serde_json::Value::String(x.to_string())),
            Self::Text(x) => Some(serde_json::Value::String(x)),
            Self::Absent => Some(serde_json::Value::Null),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => write!(f, "{}", x),
            Self::Float(x) => write!(f, "{}", x),
            Self::Bool(x) => write!(f, "{}", x),
            Self::Date(x) => write!(f, "{}", x),
            Self::Text(x) => write!(f, "{}", x),
            Self::Absent => Ok(()),
        }
    }
}
