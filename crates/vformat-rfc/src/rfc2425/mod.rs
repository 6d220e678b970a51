//! RFC 2425 directory format decoding.
//!
//! - `core`: decoded component, attribute and value types
//! - `parse`: grammar, line unfolding and the BEGIN/END structure builder
//! - `decode`: versioned decoder registry, dispatch and normalization
//! - `build`: writing typed values back as content-line text
//!
//! ## Example
//!
//! ```rust
//! use vformat_rfc::rfc2425::{decode_raw, parse_structure};
//!
//! let input = "BEGIN:VCARD\r\nVERSION:2.1\r\nN:Doe;John\r\nEND:VCARD\r\n";
//!
//! let parsed = parse_structure(input);
//! assert!(parsed.diagnostics.is_empty());
//!
//! let cards = decode_raw(input, None, None);
//! assert_eq!(cards[0].version.as_deref(), Some("2.1"));
//! ```

pub mod build;
pub mod core;
pub mod decode;
pub mod parse;

#[cfg(test)]
pub(crate) mod tests;

pub use self::core::{
    Attribute, Component, DateTimeValue, InvalidAttribute, InvalidLine, Parameters, TimeValue,
    Value, ValueType, Zone,
};
pub use decode::{Decoder, DecoderRegistry, Profile, decode, decode_raw, registry};
pub use parse::{
    Diagnostic, ParseOptions, Parsed, ParsedEntry, ParsedNode, RawAttributeLine, WhitespacePolicy,
    parse_structure, parse_structure_with,
};
