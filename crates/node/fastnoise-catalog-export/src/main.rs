//! Print the engine's node catalog as JSON.
//!
//! Usage: `fastnoise-catalog-export [OUTPUT]`
//!
//! The engine library is located through `FASTNOISE_LIB` (see `EngineConfig::from_env`).
//! Without `OUTPUT` the catalog goes to stdout.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use fastnoise_core::{EngineConfig, Registry};
use log::info;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output = std::env::args_os().nth(1).map(PathBuf::from);
    let config = EngineConfig::from_env();
    let registry = Registry::from_config(&config).with_context(|| {
        format!(
            "failed to load FastNoise from {}",
            config.resolved_library_path().display()
        )
    })?;

    let json = registry
        .to_json()
        .context("failed to serialize node catalog")?;

    match output {
        Some(path) => {
            fs::write(&path, json.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {} node kinds to {}", registry.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
