//! Config command handlers

use std::path::PathBuf;

use anyhow::{Context, Result};

use atelier_core::Config;

use crate::output::{Output, OutputFormat};

/// Load configuration, keeping the core error for recovery hints
pub fn load(config_path: Option<&PathBuf>) -> Result<Config> {
    Config::load_with_cli_override(config_path)
        .map_err(atelier_core::Error::from)
        .context("Failed to load configuration")
}

/// Show the effective configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config = load(config_path)?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "project_id": config.project_id,
                    "dataset": config.dataset,
                    "api_version": config.api_version,
                    "environment": config.environment,
                    "use_cdn": config.use_cdn(),
                    "query_url": config.query_url(),
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.query_url());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  project_id:  {}", config.project_id);
            println!("  dataset:     {}", config.dataset);
            println!("  api_version: {}", config.api_version);
            println!("  environment: {:?}", config.environment);
            println!("  use_cdn:     {}", config.use_cdn());
            println!("  query_url:   {}", config.query_url());
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Print the config file location
pub fn path(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    output.print_value("path", &path.display().to_string())
}
