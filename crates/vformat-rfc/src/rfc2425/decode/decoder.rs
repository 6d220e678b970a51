//! A versioned decoder and its previous-version chain.

use std::sync::Arc;

use super::Profile;
use crate::rfc2425::core::{Attribute, Component, InvalidLine, Value};
use crate::rfc2425::parse::grammar::parse_content_line;
use crate::rfc2425::parse::{ParsedEntry, ParsedNode, RawAttributeLine};

/// Converts untyped [`ParsedNode`]s of one component and version into
/// [`Component`]s.
#[derive(Debug)]
pub struct Decoder {
    id: String,
    component: Option<String>,
    version: Option<String>,
    profile: Profile,
    previous: Option<Arc<Decoder>>,
}

impl Decoder {
    pub(crate) fn new(
        id: &str,
        component: Option<&str>,
        version: Option<&str>,
        profile: Profile,
        previous: Option<Arc<Decoder>>,
    ) -> Self {
        Self {
            id: id.to_string(),
            component: component.map(str::to_ascii_uppercase),
            version: version.map(str::to_string),
            profile,
            previous,
        }
    }

    /// Registry identifier, e.g. `VCARD30`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Top-level component name this decoder is registered for.
    #[must_use]
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Version tag; `None` for the generic decoder.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    #[must_use]
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Decoder for the previous version of the same component.
    #[must_use]
    pub fn previous(&self) -> Option<&Decoder> {
        self.previous.as_deref()
    }

    /// Iterates from this decoder through its previous versions.
    pub fn chain(&self) -> impl Iterator<Item = &Decoder> {
        std::iter::successors(Some(self), |d| d.previous())
    }

    /// Decodes a top-level node and all of its descendants.
    ///
    /// The resolved version is the node's own `VERSION`, else `version`,
    /// else this decoder's tag. Nested components inherit it. Every value is
    /// left [`Value::Raw`]; lines that do not match the content-line grammar
    /// are collected in `invalid_lines`.
    #[must_use]
    pub fn decode_parsed(&self, node: &ParsedNode, version: Option<&str>) -> Component {
        let resolved = node
            .version
            .as_deref()
            .or(version)
            .or(self.version.as_deref())
            .map(str::to_string);

        tracing::debug!(
            decoder = %self.id,
            component = node.name.as_deref().unwrap_or_default(),
            version = resolved.as_deref().unwrap_or_default(),
            "Decoding component"
        );

        self.decode_node(node, resolved)
    }

    fn decode_node(&self, node: &ParsedNode, version: Option<String>) -> Component {
        let mut component = Component::new(node.name.clone().unwrap_or_default());

        for entry in &node.attributes {
            match entry {
                ParsedEntry::Line(line) => match self.decode_line(line) {
                    Some(attribute) => component.attributes.push(attribute),
                    None => {
                        tracing::warn!(line = line.line, text = %line.text, "Invalid content line");
                        component.invalid_lines.push(InvalidLine {
                            line: line.line,
                            text: line.text.clone(),
                        });
                    }
                },
                ParsedEntry::Component(child) => {
                    let child_version = child.version.clone().or_else(|| version.clone());
                    component.components.push(self.decode_node(child, child_version));
                }
            }
        }

        component.version = version;
        component
    }

    fn decode_line(&self, line: &RawAttributeLine) -> Option<Attribute> {
        let content = parse_content_line(&line.text)?;
        let default_value_type = self.profile.value_type(&content.name);

        Some(Attribute {
            group: content.group,
            name: content.name,
            params: content.params,
            default_value_type,
            value: Value::Raw(content.value),
        })
    }
}
