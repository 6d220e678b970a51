//! Content-line text for typed values.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveTime;

use crate::error::EncodeError;
use crate::rfc2425::core::{Value, Zone};

impl Value {
    /// Writes the value in its content-line form.
    ///
    /// TEXT is escaped, BINARY becomes BASE64 (the caller adds the
    /// `ENCODING` parameter) and dates use the basic format.
    ///
    /// ## Errors
    /// Returns [`EncodeError::LineBreak`] if a verbatim value (raw, URL or
    /// CID) contains a line break.
    pub fn encode(&self) -> Result<String, EncodeError> {
        match self {
            Self::Raw(s) | Self::Url(s) => verbatim(self.kind(), s),
            Self::Cid(s) => verbatim(self.kind(), s).map(|s| format!("cid:{s}")),
            Self::Text(s) => Ok(escape_text(s)),
            Self::Date(date) => Ok(date.format("%Y%m%d").to_string()),
            Self::DateTime(dt) => Ok(format!(
                "{}T{}",
                dt.date_time.format("%Y%m%d"),
                time_text(dt.date_time.time(), dt.zone)
            )),
            Self::Time(t) => Ok(time_text(t.time, t.zone)),
            Self::Integer(i) => Ok(i.to_string()),
            Self::Binary(bytes) => Ok(STANDARD.encode(bytes)),
        }
    }
}

/// Escapes backslash, newline, comma and semicolon.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

fn verbatim(kind: &'static str, s: &str) -> Result<String, EncodeError> {
    if s.contains(['\r', '\n']) {
        return Err(EncodeError::LineBreak { kind });
    }
    Ok(s.to_string())
}

fn time_text(time: NaiveTime, zone: Zone) -> String {
    // `%S` prints 60 for a leap second and `%.f` nothing for whole seconds.
    let mut out = time.format("%H%M%S%.f").to_string();
    match zone {
        Zone::Floating => {}
        Zone::Utc => out.push('Z'),
        Zone::Offset { seconds } => {
            let sign = if seconds < 0 { '-' } else { '+' };
            let abs = seconds.unsigned_abs();
            out.push_str(&format!("{sign}{:02}{:02}", abs / 3600, abs % 3600 / 60));
        }
    }
    out
}
