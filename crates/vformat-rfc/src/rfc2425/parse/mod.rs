//! Tokenizer and structure builder.
//!
//! - `grammar`: content-line and literal patterns
//! - `lexer`: line unfolding
//! - `structure`: BEGIN/END nesting into a [`ParsedNode`] tree
//! - `values`: DATE, TIME, DATE-TIME, INTEGER and TEXT parsers

mod diagnostic;
pub mod grammar;
pub mod lexer;
mod structure;
pub mod values;

pub use diagnostic::Diagnostic;
pub use structure::{
    ParseOptions, Parsed, ParsedEntry, ParsedNode, RawAttributeLine, parse_structure,
    parse_structure_with,
};
pub use vformat_core::config::WhitespacePolicy;
