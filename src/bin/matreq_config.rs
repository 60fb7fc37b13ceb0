//! # Material Request Configuration Check
//!
//! Loads the configuration the way the service does, validates it and prints
//! the sanitized result.
//!
//! Usage: `matreq-config [CONFIG_DIR] [ENVIRONMENT]`
//! (defaults: `MATREQ_CONFIG_DIR` or `config`, and the detected environment)

use std::path::PathBuf;

use anyhow::Context;
use matreq_core::config::ConfigManager;
use matreq_core::logging::init_tracing;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let directory = args
        .next()
        .or_else(|| std::env::var("MATREQ_CONFIG_DIR").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config"));
    let environment = args
        .next()
        .unwrap_or_else(ConfigManager::detect_environment);

    let manager = ConfigManager::load_from_directory_with_env(&directory, &environment)
        .with_context(|| {
            format!(
                "failed to load configuration from {} ({environment})",
                directory.display()
            )
        })?;

    let config = manager.config();
    info!(
        environment = %manager.environment(),
        systems = config.systems.len(),
        plants = config.plants.len(),
        "Configuration valid"
    );

    let rendered = serde_json::to_string_pretty(&manager.debug_config())
        .context("failed to render configuration")?;
    println!("{rendered}");
    Ok(())
}
