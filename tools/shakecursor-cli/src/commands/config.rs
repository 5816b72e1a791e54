//! Show or initialize the configuration file.

use std::path::PathBuf;

use shakecursor_common::config::{config_file_path, AppConfig};

pub fn show(config: &AppConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);

    let warnings = config.shake.check();
    if !warnings.is_empty() {
        eprintln!("\nWarnings:");
        for warning in &warnings {
            eprintln!("  - {warning}");
        }
    }
    Ok(())
}

pub fn init(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(config_file_path);
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::default().save_to(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
