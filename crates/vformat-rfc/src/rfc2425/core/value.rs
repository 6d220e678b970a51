//! Attribute value types.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serialize;

/// The type an attribute value is decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueType {
    /// Kept verbatim (structured values, recurrence rules, cal-addresses).
    Raw,
    /// Escaped text.
    Text,
    Date,
    DateTime,
    /// DATE-TIME when the value contains `T`, otherwise DATE.
    DateOrDateTime,
    Time,
    Integer,
    /// Inline BASE64 data.
    Binary,
    Url,
    /// Content-id reference to a MIME part.
    Cid,
}

impl ValueType {
    /// Maps a `VALUE` parameter to a value type.
    ///
    /// Returns `None` for `INLINE` and for names without a decoded
    /// representation, meaning the attribute keeps its default type.
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TEXT" => Some(Self::Text),
            "DATE" => Some(Self::Date),
            "DATE-TIME" => Some(Self::DateTime),
            "TIME" => Some(Self::Time),
            "INTEGER" => Some(Self::Integer),
            "BINARY" => Some(Self::Binary),
            "URI" | "URL" => Some(Self::Url),
            "CID" | "CONTENT-ID" => Some(Self::Cid),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Text => "text",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::DateOrDateTime => "date-or-date-time",
            Self::Time => "time",
            Self::Integer => "integer",
            Self::Binary => "binary",
            Self::Url => "url",
            Self::Cid => "cid",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time zone designation carried by DATE-TIME and TIME literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// No designator; interpreted in whatever zone the context implies.
    Floating,
    /// `Z` suffix.
    Utc,
    /// Numeric `±HH[:]MM` suffix.
    Offset { seconds: i32 },
}

impl Zone {
    /// Returns the zone as a chrono offset, or `None` when floating.
    #[must_use]
    pub fn fixed_offset(self) -> Option<FixedOffset> {
        match self {
            Self::Floating => None,
            Self::Utc => FixedOffset::east_opt(0),
            Self::Offset { seconds } => FixedOffset::east_opt(seconds),
        }
    }
}

/// DATE-TIME value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateTimeValue {
    pub date_time: NaiveDateTime,
    pub zone: Zone,
}

impl DateTimeValue {
    /// Converts to an absolute instant. Floating values have none.
    #[must_use]
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let offset = self.zone.fixed_offset()?;
        offset
            .from_local_datetime(&self.date_time)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// TIME value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeValue {
    pub time: NaiveTime,
    pub zone: Zone,
}

/// An attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Value {
    /// Undecoded text exactly as it appeared after unfolding.
    Raw(String),
    Text(String),
    Date(NaiveDate),
    DateTime(DateTimeValue),
    Time(TimeValue),
    Integer(i64),
    Binary(Vec<u8>),
    Url(String),
    Cid(String),
}

impl Value {
    /// Name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Raw(_) => "raw",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::DateTime(_) => "date-time",
            Self::Time(_) => "time",
            Self::Integer(_) => "integer",
            Self::Binary(_) => "binary",
            Self::Url(_) => "url",
            Self::Cid(_) => "cid",
        }
    }

    /// Returns whether the normalization pass has yet to run on this value.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Returns the textual payload of any string-backed value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Raw(s) | Self::Text(s) | Self::Url(s) | Self::Cid(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date_time(&self) -> Option<&DateTimeValue> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_time(&self) -> Option<&TimeValue> {
        match self {
            Self::Time(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }
}
