mod config;

pub use config::{Config, OutputConfig, OutputFormat};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the tally data directory, creating it if needed.
///
/// `TALLY_HOME` overrides the location outright. Otherwise this is
/// `~/.config/tally/`, or `~/.config/tally-dev/` when `TALLY_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TALLY_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TALLY_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("tally-dev")
            } else {
                base_dir.join("tally")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
