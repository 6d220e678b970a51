//! Decoded attribute (one content line).

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::{Parameters, Value, ValueType};
use crate::error::ConvertError;
use crate::rfc2425::parse::values::parse_date_or_date_time;

/// A decoded attribute: `[group.]NAME;params:value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Group prefix without the trailing dot (e.g. `item1` in `item1.TEL`).
    pub group: Option<String>,
    /// Attribute name (uppercased).
    pub name: String,
    pub params: Parameters,
    /// Type assigned by the decoder's table before any `VALUE` override.
    pub default_value_type: ValueType,
    pub value: Value,
}

impl Attribute {
    /// Creates an attribute with a raw value and no parameters.
    #[must_use]
    pub fn raw(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            group: None,
            name: name.into().to_ascii_uppercase(),
            params: Parameters::new(),
            default_value_type: ValueType::Raw,
            value: Value::Raw(value.into()),
        }
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.value(name)
    }

    /// Returns the effective value type: a recognized `VALUE` parameter, or
    /// the decoder default.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.params
            .value("VALUE")
            .and_then(ValueType::from_param)
            .unwrap_or(self.default_value_type)
    }

    /// Returns the value as text. Undecoded values are returned verbatim.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            Value::Text(s) | Value::Raw(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        self.value.as_integer()
    }

    /// Returns the value as a local date-time, decoding raw text on the fly.
    ///
    /// DATE values are taken at midnight.
    ///
    /// ## Errors
    /// Returns [`ConvertError`] if the value is neither a date nor a date-time.
    pub fn naive_date_time(&self) -> Result<NaiveDateTime, ConvertError> {
        match &self.value {
            Value::DateTime(dt) => Ok(dt.date_time),
            Value::Date(d) => Ok(d.and_time(chrono::NaiveTime::MIN)),
            Value::Raw(raw) => match parse_date_or_date_time(raw) {
                Ok(Value::DateTime(dt)) => Ok(dt.date_time),
                Ok(Value::Date(d)) => Ok(d.and_time(chrono::NaiveTime::MIN)),
                _ => Err(self.convert_error(ValueType::DateTime)),
            },
            _ => Err(self.convert_error(ValueType::DateTime)),
        }
    }

    /// Returns the calendar date of a DATE or DATE-TIME value.
    ///
    /// ## Errors
    /// Returns [`ConvertError`] if the value is neither a date nor a date-time.
    pub fn date(&self) -> Result<NaiveDate, ConvertError> {
        self.naive_date_time()
            .map(|dt| dt.date())
            .map_err(|e| ConvertError {
                to: ValueType::Date,
                ..e
            })
    }

    fn convert_error(&self, to: ValueType) -> ConvertError {
        ConvertError {
            attribute: self.name.clone(),
            from: self.value.kind(),
            to,
        }
    }
}
