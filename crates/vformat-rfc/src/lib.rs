//! Decoder for RFC 2425 family directory formats (vCard 2.1/3.0,
//! vCalendar 1.0, iCalendar 2.0).
//!
//! ```rust
//! let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nSUMMARY:Demo\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
//!
//! let calendars = vformat_rfc::decode(input, None, None);
//! let event = calendars[0].component("VEVENT").unwrap();
//! assert_eq!(event.attribute("SUMMARY").unwrap().as_text(), Some("Demo"));
//! ```

pub mod error;
pub mod meeting;
pub mod rfc2425;

pub use error::{
    ConvertError, DecodeError, DecodeErrorKind, EncodeError, VFormatError, VFormatResult,
};
pub use meeting::MeetingInfo;
pub use rfc2425::{
    Attribute, Component, Decoder, DecoderRegistry, ParseOptions, Parsed, ParsedNode, Value,
    ValueType, decode, decode_raw, parse_structure, parse_structure_with, registry,
};
