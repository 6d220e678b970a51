//! Meeting summary extracted from a calendar invitation.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::rfc2425::{Attribute, Component, ParseOptions, WhitespacePolicy, registry};

/// The fields of the first VEVENT of a calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeetingInfo {
    /// `SUMMARY`.
    pub name: Option<String>,
    /// Calendar date of `DTSTART`.
    pub date: Option<NaiveDate>,
    /// `DTSTART` as local time; DATE values start at midnight.
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    /// `TZID` parameter of `DTSTART`, if any.
    pub time_zone: Option<String>,
    pub uid: Option<String>,
    pub status: Option<String>,
}

impl MeetingInfo {
    /// Decodes `text` and projects its first event.
    ///
    /// Folded lines keep their interior whitespace so summaries read as
    /// written. Returns `None` when the text holds no component or the first
    /// component has no VEVENT.
    #[must_use]
    pub fn from_calendar(text: &str) -> Option<Self> {
        let options = ParseOptions {
            whitespace: WhitespacePolicy::FoldOnly,
            ..ParseOptions::default()
        };
        let components = registry().decode_with(text, &options, None, None);
        let info = Self::from_component(components.first()?)?;

        tracing::debug!(
            name = info.name.as_deref().unwrap_or_default(),
            start = ?info.start,
            "Extracted meeting"
        );
        Some(info)
    }

    /// Projects the first VEVENT of an already decoded calendar.
    #[must_use]
    pub fn from_component(calendar: &Component) -> Option<Self> {
        let event = calendar.component("VEVENT")?;

        let start = event.attribute("DTSTART");
        let start_time = start.and_then(date_time);
        Some(Self {
            name: text(event, "SUMMARY"),
            date: start_time.map(|dt| dt.date()),
            start: start_time,
            end: event.attribute("DTEND").and_then(date_time),
            time_zone: start.and_then(|a| a.param("TZID")).map(str::to_string),
            uid: text(event, "UID"),
            status: text(event, "STATUS"),
        })
    }
}

fn text(event: &Component, name: &str) -> Option<String> {
    event
        .attribute(name)
        .and_then(Attribute::as_text)
        .map(str::to_string)
}

fn date_time(attribute: &Attribute) -> Option<NaiveDateTime> {
    attribute
        .naive_date_time()
        .inspect_err(|e| tracing::warn!(error = %e, "Meeting time is not a date"))
        .ok()
}
