//! Attribute value normalization.
//!
//! Removes transfer encodings, transcodes character sets and converts raw
//! values into the type their decoder (or `VALUE` parameter) declares.

use super::transfer::{TransferEncoding, decode_charset};
use crate::error::{DecodeError, DecodeErrorKind};
use crate::rfc2425::core::{Attribute, Component, InvalidAttribute, Value, ValueType};
use crate::rfc2425::parse::values::{
    parse_date, parse_date_or_date_time, parse_date_time, parse_integer, parse_time,
    unescape_text,
};

impl Component {
    /// Normalizes every raw attribute of this component and its descendants.
    ///
    /// `ENCODING` and `CHARSET` parameters are applied and removed, and the
    /// value is converted to the attribute's effective [`ValueType`].
    /// Attributes that fail are moved to `invalid_attributes`. Values that
    /// are no longer raw are left alone, so running the pass twice changes
    /// nothing.
    pub fn normalize_attributes(&mut self) {
        let attributes = std::mem::take(&mut self.attributes);

        for attribute in attributes {
            if !attribute.value.is_raw() {
                self.attributes.push(attribute);
                continue;
            }

            match normalize_attribute(&attribute) {
                Ok(normalized) => self.attributes.push(normalized),
                Err(error) => {
                    let error = error.for_attribute(attribute.name.clone());
                    tracing::warn!(component = %self.name, %error, "Invalid attribute value");
                    self.invalid_attributes
                        .push(InvalidAttribute { attribute, error });
                }
            }
        }

        for child in &mut self.components {
            child.normalize_attributes();
        }
    }
}

fn normalize_attribute(attribute: &Attribute) -> Result<Attribute, DecodeError> {
    let raw = attribute.value.as_str().unwrap_or_default();
    let encoding = attribute
        .params
        .value("ENCODING")
        .map_or(Ok(TransferEncoding::Identity), TransferEncoding::from_param)?;

    let value_type = match attribute.value_type() {
        ValueType::DateOrDateTime if raw.contains('T') => ValueType::DateTime,
        ValueType::DateOrDateTime => ValueType::Date,
        other => other,
    };

    let value = if value_type == ValueType::Binary {
        if encoding != TransferEncoding::Base64 {
            return Err(DecodeError::new(
                DecodeErrorKind::MissingTransferEncoding,
                raw,
            ));
        }
        Value::Binary(encoding.decode(raw)?)
    } else {
        let text = match encoding {
            TransferEncoding::Identity => raw.to_string(),
            _ => decode_charset(&encoding.decode(raw)?, attribute.params.value("CHARSET"))?,
        };
        coerce(text, value_type)?
    };

    let mut normalized = attribute.clone();
    normalized.params.remove("ENCODING");
    normalized.params.remove("CHARSET");
    normalized.value = value;
    Ok(normalized)
}

fn coerce(text: String, value_type: ValueType) -> Result<Value, DecodeError> {
    Ok(match value_type {
        ValueType::Raw => Value::Raw(text),
        ValueType::Text => Value::Text(unescape_text(&text)),
        ValueType::Date => Value::Date(parse_date(&text)?),
        ValueType::DateTime => Value::DateTime(parse_date_time(&text)?),
        ValueType::DateOrDateTime => parse_date_or_date_time(&text)?,
        ValueType::Time => Value::Time(parse_time(&text)?),
        ValueType::Integer => Value::Integer(parse_integer(&text)?),
        ValueType::Url => Value::Url(text),
        ValueType::Cid => Value::Cid(strip_cid(&text).to_string()),
        ValueType::Binary => Value::Binary(text.into_bytes()),
    })
}

fn strip_cid(s: &str) -> &str {
    match s.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("cid:") => &s[4..],
        _ => s,
    }
}
