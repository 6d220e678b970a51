//! Decoder registry and dispatch.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use super::{Decoder, Profile};
use crate::rfc2425::core::Component;
use crate::rfc2425::parse::{ParseOptions, ParsedNode, parse_structure_with};

/// Decoders keyed by top-level component name.
///
/// Each name maps to its newest decoder; older versions hang off
/// [`Decoder::previous`]. The generic RFC 2425 decoder handles everything
/// no registered decoder claims.
#[derive(Debug)]
pub struct DecoderRegistry {
    decoders: HashMap<String, Arc<Decoder>>,
    generic: Arc<Decoder>,
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DecoderRegistry {
    /// Creates a registry holding only the generic decoder.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
            generic: Arc::new(Decoder::new("RFC2425", None, None, Profile::Rfc2425, None)),
        }
    }

    /// Creates a registry with the built-in decoders.
    ///
    /// Registration order: `VCARD21`, `VCARD30`, `VCALENDAR10`,
    /// `VCALENDAR20`. The later version of each component becomes its
    /// default.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("VCARD21", "VCARD", "2.1", Profile::VCard21);
        registry.register("VCARD30", "VCARD", "3.0", Profile::VCard30);
        registry.register("VCALENDAR10", "VCALENDAR", "1.0", Profile::VCalendar10);
        registry.register("VCALENDAR20", "VCALENDAR", "2.0", Profile::VCalendar20);
        registry
    }

    /// Registers a decoder as the new default for `component`.
    ///
    /// The decoder previously registered for the component becomes its
    /// previous version.
    pub fn register(&mut self, id: &str, component: &str, version: &str, profile: Profile) {
        let key = component.to_ascii_uppercase();
        let previous = self.decoders.remove(&key);
        let decoder = Decoder::new(id, Some(&key), Some(version), profile, previous);

        tracing::debug!(id, component = %key, version, "Registered decoder");
        self.decoders.insert(key, Arc::new(decoder));
    }

    /// Finds the decoder for a component name and version.
    ///
    /// Without a version this is the default decoder. Returns `None` if the
    /// name is unknown or no decoder in its chain has the version.
    #[must_use]
    pub fn decoder(&self, name: &str, version: Option<&str>) -> Option<&Decoder> {
        let newest = self.default_decoder(name)?;
        match version {
            Some(version) => newest.chain().find(|d| d.version() == Some(version)),
            None => Some(newest),
        }
    }

    /// Newest decoder registered for a component name.
    #[must_use]
    pub fn default_decoder(&self, name: &str) -> Option<&Decoder> {
        self.decoders
            .get(&name.to_ascii_uppercase())
            .map(Arc::as_ref)
    }

    /// Last-resort decoder for unregistered components.
    #[must_use]
    pub fn generic(&self) -> &Decoder {
        &self.generic
    }

    /// Picks the decoder for a top-level node.
    ///
    /// Exact version match in the name's chain, else the name's default,
    /// else the generic decoder.
    #[must_use]
    pub fn resolve(&self, name: &str, version: Option<&str>) -> &Decoder {
        version
            .and_then(|v| self.decoder(name, Some(v)))
            .or_else(|| self.default_decoder(name))
            .unwrap_or_else(|| self.generic())
    }

    /// Decodes every top-level component, leaving values raw.
    ///
    /// `version` stands in for components without a `VERSION` line.
    /// `decoder` bypasses resolution. Attribute lines outside any component
    /// are dropped.
    #[must_use]
    pub fn decode_raw(
        &self,
        input: &str,
        version: Option<&str>,
        decoder: Option<&Decoder>,
    ) -> Vec<Component> {
        self.decode_raw_with(input, &ParseOptions::default(), version, decoder)
    }

    /// [`Self::decode_raw`] with explicit parse options.
    #[tracing::instrument(skip(self, input, decoder), fields(input_len = input.len()))]
    #[must_use]
    pub fn decode_raw_with(
        &self,
        input: &str,
        options: &ParseOptions,
        version: Option<&str>,
        decoder: Option<&Decoder>,
    ) -> Vec<Component> {
        let parsed = parse_structure_with(input, options);

        let components: Vec<Component> = parsed
            .root
            .components()
            .map(|node| self.decode_node(node, version, decoder))
            .collect();

        tracing::debug!(count = components.len(), "Decoded components");
        components
    }

    /// Decodes every top-level component and normalizes attribute values.
    #[must_use]
    pub fn decode(
        &self,
        input: &str,
        version: Option<&str>,
        decoder: Option<&Decoder>,
    ) -> Vec<Component> {
        self.decode_with(input, &ParseOptions::default(), version, decoder)
    }

    /// [`Self::decode`] with explicit parse options.
    #[must_use]
    pub fn decode_with(
        &self,
        input: &str,
        options: &ParseOptions,
        version: Option<&str>,
        decoder: Option<&Decoder>,
    ) -> Vec<Component> {
        let mut components = self.decode_raw_with(input, options, version, decoder);
        for component in &mut components {
            component.normalize_attributes();
        }
        components
    }

    fn decode_node(
        &self,
        node: &ParsedNode,
        version: Option<&str>,
        decoder: Option<&Decoder>,
    ) -> Component {
        let name = node.name.as_deref().unwrap_or_default();
        let effective_version = node.version.as_deref().or(version);
        let decoder = decoder.unwrap_or_else(|| self.resolve(name, effective_version));

        decoder.decode_parsed(node, version)
    }
}

/// Process-wide registry with the built-in decoders.
#[must_use]
pub fn registry() -> &'static DecoderRegistry {
    static REGISTRY: OnceLock<DecoderRegistry> = OnceLock::new();
    REGISTRY.get_or_init(DecoderRegistry::builtin)
}

/// Decodes with the process-wide registry, leaving values raw.
///
/// See [`DecoderRegistry::decode_raw`].
#[must_use]
pub fn decode_raw(input: &str, version: Option<&str>, decoder: Option<&Decoder>) -> Vec<Component> {
    registry().decode_raw(input, version, decoder)
}

/// Decodes with the process-wide registry and normalizes values.
///
/// See [`DecoderRegistry::decode`].
#[must_use]
pub fn decode(input: &str, version: Option<&str>, decoder: Option<&Decoder>) -> Vec<Component> {
    registry().decode(input, version, decoder)
}
