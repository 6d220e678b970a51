//! Literal value parsers (RFC 2425 §5.8.4, RFC 2426 §4).
//!
//! All parsers are lenient about the separators the grammar makes optional
//! (`-` in dates, `:` in times and offsets) and strict about calendar
//! validity.

use chrono::{NaiveDate, NaiveTime};
use regex_lite::Captures;

use super::grammar::{DATE_RE, DATE_TIME_RE, INTEGER_RE, TIME_RE};
use crate::error::{DecodeError, DecodeErrorKind};
use crate::rfc2425::core::{DateTimeValue, TimeValue, Value, Zone};

/// Parses a DATE value: `YYYY[-]MM[-]DD`.
///
/// ## Errors
/// Returns [`DecodeErrorKind::InvalidDate`] if the literal does not match or
/// is not a calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DecodeError> {
    DATE_RE
        .captures(s)
        .and_then(|caps| date_from(&caps, 1))
        .ok_or_else(|| DecodeError::new(DecodeErrorKind::InvalidDate, s))
}

/// Parses a TIME value: `HH[:]MM[:]SS[.frac][Z|±HH[:]MM]`.
///
/// ## Errors
/// Returns [`DecodeErrorKind::InvalidTime`] if the literal does not match or
/// is out of range.
pub fn parse_time(s: &str) -> Result<TimeValue, DecodeError> {
    TIME_RE
        .captures(s)
        .and_then(|caps| time_from(&caps, 1))
        .map(|(time, zone)| TimeValue { time, zone })
        .ok_or_else(|| DecodeError::new(DecodeErrorKind::InvalidTime, s))
}

/// Parses a DATE-TIME value: `DATE "T" TIME`.
///
/// ## Errors
/// Returns [`DecodeErrorKind::InvalidDateTime`] if the literal does not
/// match or is out of range.
pub fn parse_date_time(s: &str) -> Result<DateTimeValue, DecodeError> {
    DATE_TIME_RE
        .captures(s)
        .and_then(|caps| {
            let date = date_from(&caps, 1)?;
            let (time, zone) = time_from(&caps, 4)?;
            Some(DateTimeValue {
                date_time: date.and_time(time),
                zone,
            })
        })
        .ok_or_else(|| DecodeError::new(DecodeErrorKind::InvalidDateTime, s))
}

/// Parses a DATE-TIME when the value contains `T`, otherwise a DATE.
///
/// ## Errors
/// Returns the error of whichever parser was chosen.
pub fn parse_date_or_date_time(s: &str) -> Result<Value, DecodeError> {
    if s.contains('T') {
        parse_date_time(s).map(Value::DateTime)
    } else {
        parse_date(s).map(Value::Date)
    }
}

/// Parses an INTEGER value: `[+-]digits`.
///
/// ## Errors
/// Returns [`DecodeErrorKind::InvalidInteger`] if the literal does not match
/// or does not fit in an `i64`.
pub fn parse_integer(s: &str) -> Result<i64, DecodeError> {
    INTEGER_RE
        .is_match(s)
        .then(|| s.trim_start_matches('+').parse::<i64>().ok())
        .flatten()
        .ok_or_else(|| DecodeError::new(DecodeErrorKind::InvalidInteger, s))
}

/// Unescapes a TEXT value.
///
/// Handles `\\`, `\n`/`\N`, `\,` and `\;`. Unknown escapes are kept as-is.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(',') => result.push(','),
            Some(';') => result.push(';'),
            Some('\\') | None => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
        }
    }

    result
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, index: usize) -> Option<T> {
    caps.get(index)?.as_str().parse().ok()
}

/// Builds a date from three consecutive capture groups starting at `first`.
fn date_from(caps: &Captures<'_>, first: usize) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        number(caps, first)?,
        number(caps, first + 1)?,
        number(caps, first + 2)?,
    )
}

/// Builds a time and zone from the five TIME capture groups starting at `first`.
fn time_from(caps: &Captures<'_>, first: usize) -> Option<(NaiveTime, Zone)> {
    let hour: u32 = number(caps, first)?;
    let minute: u32 = number(caps, first + 1)?;
    let mut second: u32 = number(caps, first + 2)?;
    let mut nano = caps.get(first + 3).map_or(Some(0), |m| fraction_nanos(m.as_str()))?;

    // A leap second is carried as 59 plus an extra second of nanoseconds.
    if second == 60 {
        second = 59;
        nano += 1_000_000_000;
    }

    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nano)?;
    let zone = caps.get(first + 4).map_or(Some(Zone::Floating), |m| zone(m.as_str()))?;
    Some((time, zone))
}

/// Converts fractional-second digits to nanoseconds, truncating past nine digits.
fn fraction_nanos(digits: &str) -> Option<u32> {
    let truncated = digits.get(..digits.len().min(9))?;
    let padded = format!("{truncated:0<9}");
    padded.parse().ok()
}

fn zone(s: &str) -> Option<Zone> {
    if s == "Z" {
        return Some(Zone::Utc);
    }

    let (sign, rest) = match s.split_at_checked(1)? {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let rest = rest.replace(':', "");
    let hours: i32 = rest.get(..2)?.parse().ok()?;
    let minutes: i32 = rest.get(2..4)?.parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    let seconds = sign * (hours * 3600 + minutes * 60);
    let zone = Zone::Offset { seconds };
    zone.fixed_offset().map(|_| zone)
}
