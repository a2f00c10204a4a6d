//! Server configuration parsed from environment variables.

use std::path::PathBuf;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_IMAGE_DIR: &str = "images";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_SYNC_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Directory whose image files become the image catalog.
    pub image_dir: PathBuf,
    /// Directory holding the page, the wasm bundle and the marker sprite.
    pub static_dir: PathBuf,
    /// Buffered snapshots per stream subscriber.
    pub sync_channel_capacity: usize,
}

impl Config {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 5000
    /// - `IMAGE_DIR`: default `images`
    /// - `STATIC_DIR`: default `static`
    /// - `SYNC_CHANNEL_CAPACITY`: default 64, must be at least 1
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a numeric variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_var(&lookup, "PORT", DEFAULT_PORT)?;
        let image_dir = lookup("IMAGE_DIR").map_or_else(|| PathBuf::from(DEFAULT_IMAGE_DIR), PathBuf::from);
        let static_dir = lookup("STATIC_DIR").map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);
        let sync_channel_capacity = parse_var(&lookup, "SYNC_CHANNEL_CAPACITY", DEFAULT_SYNC_CHANNEL_CAPACITY)?;
        if sync_channel_capacity == 0 {
            return Err(ConfigError::Invalid { var: "SYNC_CHANNEL_CAPACITY", value: "0".into() });
        }
        Ok(Self { port, image_dir, static_dir, sync_channel_capacity })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            sync_channel_capacity: DEFAULT_SYNC_CHANNEL_CAPACITY,
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
