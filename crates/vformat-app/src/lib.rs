//! Command-line front end for the vformat decoder.

use anyhow::Result;
use vformat_core::config::DecoderConfig;
use vformat_rfc::{Component, ParseOptions, registry};

/// Decodes `input` as configured.
///
/// `decoder.normalize` selects typed values over raw ones and
/// `decoder.default_version` stands in for components without a `VERSION`.
#[must_use]
pub fn decode(input: &str, config: &DecoderConfig) -> Vec<Component> {
    let options = ParseOptions::from(config);
    let version = config.default_version.as_deref();

    let components = if config.normalize {
        registry().decode_with(input, &options, version, None)
    } else {
        registry().decode_raw_with(input, &options, version, None)
    };

    for component in &components {
        report(component);
    }
    components
}

/// Renders decoded components as pretty-printed JSON.
///
/// ## Errors
/// Returns an error if serialization fails.
pub fn render(components: &[Component]) -> Result<String> {
    Ok(serde_json::to_string_pretty(components)?)
}

fn report(component: &Component) {
    for invalid in &component.invalid_attributes {
        tracing::warn!(
            component = %component.name,
            error = %invalid.error,
            "Attribute could not be decoded"
        );
    }
    for child in &component.components {
        report(child);
    }
}
