//! Per-format attribute type tables.

use serde::Serialize;

use crate::rfc2425::core::ValueType;

/// Default value types of one directory format.
///
/// The table decides which [`ValueType`] an attribute gets when no `VALUE`
/// parameter overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Plain RFC 2425; unknown names stay raw.
    Rfc2425,
    /// vCard 2.1.
    VCard21,
    /// vCard 3.0 (RFC 2426).
    VCard30,
    /// vCalendar 1.0.
    VCalendar10,
    /// iCalendar 2.0 (RFC 5545).
    VCalendar20,
}

impl Profile {
    /// Returns the default value type for an attribute name.
    #[must_use]
    pub fn value_type(self, name: &str) -> ValueType {
        let name = name.to_ascii_uppercase();
        match self {
            Self::Rfc2425 => rfc2425(&name),
            Self::VCard21 => vcard21(&name),
            Self::VCard30 => vcard30(&name),
            Self::VCalendar10 => vcalendar10(&name),
            Self::VCalendar20 => vcalendar20(&name),
        }
    }
}

fn rfc2425(name: &str) -> ValueType {
    match name {
        "SOURCE" => ValueType::Url,
        "NAME" | "PROFILE" => ValueType::Text,
        _ => ValueType::Raw,
    }
}

fn vcard21(name: &str) -> ValueType {
    match name {
        "PHOTO" | "LOGO" | "SOUND" | "KEY" => ValueType::Binary,
        "BDAY" | "REV" => ValueType::DateOrDateTime,
        "URL" => ValueType::Url,
        "N" | "ADR" | "ORG" | "GEO" | "TZ" | "AGENT" => ValueType::Raw,
        _ => ValueType::Text,
    }
}

fn vcard30(name: &str) -> ValueType {
    match name {
        "CATEGORIES" | "NICKNAME" => ValueType::Raw,
        _ => vcard21(name),
    }
}

fn vcalendar10(name: &str) -> ValueType {
    match name {
        "DTSTART" | "DTEND" | "DUE" | "COMPLETED" | "DCREATED" | "LAST-MODIFIED" => {
            ValueType::DateTime
        }
        "PRIORITY" | "SEQUENCE" => ValueType::Integer,
        "URL" => ValueType::Url,
        "RRULE" | "EXRULE" | "EXDATE" | "RDATE" | "AALARM" | "DALARM" | "MALARM" | "PALARM"
        | "ATTENDEE" | "CATEGORIES" | "TZ" | "GEO" | "DAYLIGHT" => ValueType::Raw,
        _ => ValueType::Text,
    }
}

fn vcalendar20(name: &str) -> ValueType {
    match name {
        "DTSTART" | "DTEND" | "DUE" | "RECURRENCE-ID" => ValueType::DateOrDateTime,
        "DTSTAMP" | "CREATED" | "LAST-MODIFIED" | "COMPLETED" => ValueType::DateTime,
        "PRIORITY" | "SEQUENCE" | "PERCENT-COMPLETE" | "REPEAT" => ValueType::Integer,
        "URL" | "TZURL" | "ATTACH" => ValueType::Url,
        "ORGANIZER" | "ATTENDEE" | "RRULE" | "EXRULE" | "EXDATE" | "RDATE" | "GEO"
        | "FREEBUSY" | "TRIGGER" | "DURATION" | "TZOFFSETFROM" | "TZOFFSETTO"
        | "REQUEST-STATUS" | "CATEGORIES" | "RESOURCES" => ValueType::Raw,
        _ => ValueType::Text,
    }
}
