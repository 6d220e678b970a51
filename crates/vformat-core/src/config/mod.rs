use anyhow::Result;
use config::{Config, ConfigBuilder, FileFormat, builder::DefaultState};
use serde::Deserialize;

use crate::constants::{
    APP_NAME, CONFIG_FILE, DEFAULT_LOG_LEVEL, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub decoder: DecoderConfig,
    pub logging: LoggingConfig,
}

/// How intraline whitespace is treated when a folded line is joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitespacePolicy {
    /// Delete every space and tab from the joined line.
    #[default]
    StripAll,
    /// Delete only the single leading space or tab of each folded continuation.
    FoldOnly,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecoderConfig {
    pub max_depth: usize,
    pub whitespace: WhitespacePolicy,
    pub normalize: bool,
    pub default_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and the optional `vformat.toml`.
    /// Environment variables (`VFORMAT_DECODER__MAX_DEPTH`, ...) take precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing or validating it fails.
    pub fn load() -> Result<Self> {
        let settings = Self::builder()?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(&APP_NAME.to_ascii_uppercase())
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Loads configuration from a TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the TOML is malformed or the result fails validation.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = Self::builder()?
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        Ok(settings)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("decoder.max_depth", u64::try_from(DEFAULT_MAX_DEPTH)?)?
            .set_default("decoder.whitespace", "strip_all")?
            .set_default("decoder.normalize", true)?
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?)
    }

    /// ## Summary
    /// Rejects settings the decoder cannot honour.
    ///
    /// ## Errors
    /// Returns [`CoreError::ConfigError`] when `decoder.max_depth` is zero or
    /// above [`MAX_DEPTH_LIMIT`].
    pub fn validate(&self) -> CoreResult<()> {
        if !(1..=MAX_DEPTH_LIMIT).contains(&self.decoder.max_depth) {
            return Err(CoreError::ConfigError(format!(
                "decoder.max_depth must be between 1 and {MAX_DEPTH_LIMIT}, got {}",
                self.decoder.max_depth
            )));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` and `vformat.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::trace!(error = %e, "No .env file loaded");
    }

    Settings::load()
}
