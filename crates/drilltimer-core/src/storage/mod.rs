mod config;

pub use config::{AudioConfig, Config, DisplayConfig, WakeLockConfig};

use std::path::PathBuf;

use crate::error::{ConfigError, CoreError};

/// Returns `~/.config/drilltimer[-dev]/` based on DRILLTIMER_ENV.
///
/// Set DRILLTIMER_ENV=dev to use the development config directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(".config");

    let env = std::env::var("DRILLTIMER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("drilltimer-dev")
    } else {
        base_dir.join("drilltimer")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
