use std::io::Read;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};
use vformat_core::config::load_config;
use vformat_core::constants::DEFAULT_LOG_LEVEL;

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping default");
    }

    let input = match std::env::args().nth(1) {
        Some(path) if path != "-" => {
            std::fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read standard input")?;
            buf
        }
    };

    tracing::info!(input_len = input.len(), "Decoding input");

    let components = vformat_app::decode(&input, &config.decoder);
    println!("{}", vformat_app::render(&components)?);

    Ok(())
}
