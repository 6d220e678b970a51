//! Decoded component (BEGIN/END block).

use serde::Serialize;

use super::Attribute;
use crate::error::{DecodeError, VFormatError, VFormatResult};

/// A content line that did not match the content-line grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidLine {
    /// 1-based line number of the first physical line.
    pub line: usize,
    /// The unfolded line text.
    pub text: String,
}

/// An attribute whose value could not be converted during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidAttribute {
    /// The attribute exactly as it was before normalization.
    pub attribute: Attribute,
    pub error: DecodeError,
}

/// A decoded component.
///
/// Components own their attributes and nested components. Problems found
/// while decoding are recorded in `invalid_lines` and `invalid_attributes`
/// instead of being raised.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Component {
    /// Component name (uppercased), e.g. `VCALENDAR`.
    pub name: String,
    /// Resolved version of the enclosing top-level component.
    pub version: Option<String>,
    /// Attributes in order of appearance.
    pub attributes: Vec<Attribute>,
    /// Nested components in order of appearance.
    pub components: Vec<Component>,
    pub invalid_lines: Vec<InvalidLine>,
    pub invalid_attributes: Vec<InvalidAttribute>,
}

impl Component {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            ..Self::default()
        }
    }

    /// Returns the first attribute with the given name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Returns all attributes with the given name.
    #[must_use]
    pub fn attributes_named(&self, name: &str) -> Vec<&Attribute> {
        self.attributes
            .iter()
            .filter(|a| a.name.eq_ignore_ascii_case(name))
            .collect()
    }

    /// Returns the first nested component with the given name.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Returns all nested components with the given name.
    #[must_use]
    pub fn components_named(&self, name: &str) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| c.name.eq_ignore_ascii_case(name))
            .collect()
    }

    /// Returns whether neither this component nor any descendant recorded a problem.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.invalid_lines.is_empty()
            && self.invalid_attributes.is_empty()
            && self.components.iter().all(Self::is_valid)
    }

    /// Turns the first recorded problem (depth first, lines before attributes) into an error.
    ///
    /// ## Errors
    /// Returns [`VFormatError::InvalidLine`] or [`VFormatError::Decode`].
    pub fn ensure_valid(&self) -> VFormatResult<()> {
        if let Some(invalid) = self.invalid_lines.first() {
            return Err(VFormatError::InvalidLine {
                line: invalid.line,
                text: invalid.text.clone(),
            });
        }
        if let Some(invalid) = self.invalid_attributes.first() {
            return Err(invalid.error.clone().into());
        }
        self.components.iter().try_for_each(Self::ensure_valid)
    }
}
