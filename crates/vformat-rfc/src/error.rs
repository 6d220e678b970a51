use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::rfc2425::ValueType;

/// Decoding, conversion and validation errors
#[derive(Error, Debug)]
pub enum VFormatError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("Invalid content line {line}: {text}")]
    InvalidLine { line: usize, text: String },
}

pub type VFormatResult<T> = std::result::Result<T, VFormatError>;

/// An attribute value that could not be decoded into its declared type.
///
/// Never raised by the decoder itself; it is recorded on the owning
/// component's `invalid_attributes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeError {
    /// Kind of error.
    pub kind: DecodeErrorKind,
    /// Name of the attribute the value belongs to, once known.
    pub attribute: Option<String>,
    /// The offending text.
    pub value: String,
}

impl DecodeError {
    /// Creates a new decode error for a raw value.
    #[must_use]
    pub fn new(kind: DecodeErrorKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            attribute: None,
            value: value.into(),
        }
    }

    /// Attaches the attribute name.
    #[must_use]
    pub fn for_attribute(mut self, name: impl Into<String>) -> Self {
        self.attribute = Some(name.into());
        self
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.value)?;
        if let Some(ref name) = self.attribute {
            write!(f, " in {name}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeError {}

/// Kinds of decode errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodeErrorKind {
    /// Value does not match the DATE literal or is not a calendar date.
    InvalidDate,
    /// Value does not match the TIME literal or is out of range.
    InvalidTime,
    /// Value does not match the DATE-TIME literal or is out of range.
    InvalidDateTime,
    /// Value does not match the INTEGER literal or overflows.
    InvalidInteger,
    /// BASE64 payload is malformed.
    InvalidBase64,
    /// Binary value carried without a BASE64 transfer encoding.
    MissingTransferEncoding,
    /// ENCODING parameter names an encoding the decoder does not know.
    UnsupportedEncoding,
    /// CHARSET parameter names an unknown character set.
    UnknownCharset,
    /// Bytes are not valid in the declared character set.
    InvalidCharacterData,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate => write!(f, "invalid date"),
            Self::InvalidTime => write!(f, "invalid time"),
            Self::InvalidDateTime => write!(f, "invalid date-time"),
            Self::InvalidInteger => write!(f, "invalid integer"),
            Self::InvalidBase64 => write!(f, "invalid base64 data"),
            Self::MissingTransferEncoding => write!(f, "binary value without base64 encoding"),
            Self::UnsupportedEncoding => write!(f, "unsupported encoding"),
            Self::UnknownCharset => write!(f, "unknown charset"),
            Self::InvalidCharacterData => write!(f, "malformed character data"),
        }
    }
}

/// A value that cannot be written back as content-line text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Verbatim values cannot carry a line break.
    #[error("{kind} value contains a line break")]
    LineBreak { kind: &'static str },
}

/// A typed accessor was asked for a representation the value cannot provide.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot convert {from} value of {attribute} to {to}")]
pub struct ConvertError {
    pub attribute: String,
    pub from: &'static str,
    pub to: ValueType,
}
