//! Values a variable can hold.
//!
//! PatriLang only knows two kinds of values: calendar dates and numbers.
//! There is no implicit coercion between them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The declared type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    Date,
    Number,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Number => write!(f, "number"),
        }
    }
}

/// A typed variable value.
///
/// # Examples
///
/// ```
/// use patrilang::{Value, VariableType};
///
/// let n = Value::from(12.5);
/// assert_eq!(n.variable_type(), VariableType::Number);
/// assert_eq!(n.as_number(), Some(12.5));
/// assert!(n.as_date().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Date(NaiveDate),
    Number(f64),
}

impl Value {
    pub const fn variable_type(&self) -> VariableType {
        match self {
            Self::Date(_) => VariableType::Date,
            Self::Number(_) => VariableType::Number,
        }
    }

    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(v) => Some(*v),
            Self::Number(_) => None,
        }
    }

    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Date(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(v) => write!(f, "{v}"),
            Self::Number(v) => write!(f, "{v}"),
        }
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_checks() {
        let date = Value::from(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert!(date.is_date());
        assert!(!date.is_number());
        assert_eq!(date.variable_type(), VariableType::Date);
        assert!(date.as_number().is_none());

        let number = Value::from(3);
        assert!(number.is_number());
        assert_eq!(number.as_number(), Some(3.0));
    }

    #[test]
    fn test_value_display() {
        let date = Value::Date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(format!("{date}"), "2025-06-01");
        assert_eq!(format!("{}", Value::Number(1.5)), "1.5");
        assert_eq!(format!("{}", VariableType::Number), "number");
    }

    #[test]
    fn test_value_serialization() {
        let value = Value::Number(42.0);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"type":"number","value":42.0}"#);
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
