//! # ps-config
//!
//! Runtime settings for the postsync binary.
//!
//! Values are layered: built-in defaults first, then environment variables
//! prefixed with `POSTSYNC_` (e.g. `POSTSYNC_DATABASE_URL`). A `.env` file in
//! the working directory is loaded into the environment beforehand if present.

use std::path::PathBuf;

use config::{Config, ConfigBuilder, ConfigError, Environment, builder::DefaultState};
use ps_core::error::{AppError, Result};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "POSTSYNC";

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://jsonplaceholder.typicode.com/";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// sqlx connection string, e.g. `sqlite://postsync.db` or `sqlite::memory:`
    pub database_url: String,
    pub max_connections: u32,
    pub upstream_base_url: String,
    pub host: String,
    pub port: u16,
    /// Run the fetch → store routine before serving.
    pub sync_on_startup: bool,
    /// Post fetched and logged after the startup sync. `0` skips the probe.
    pub probe_post_id: i64,
    /// Fallback filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Settings {
    /// Reads settings from the process environment on top of the defaults.
    /// Call [`load_dotenv`] first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_builder(Self::builder()?.add_source(env_source()))
    }

    /// A builder pre-populated with every default. Callers may layer further
    /// sources or overrides on top before calling [`Settings::from_builder`].
    pub fn builder() -> Result<ConfigBuilder<DefaultState>> {
        defaults().map_err(config_error)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error)
    }

    pub fn probe_id(&self) -> Option<i64> {
        (self.probe_post_id > 0).then_some(self.probe_post_id)
    }

    /// `host:port` pair for binding the HTTP server.
    pub fn bind_address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

/// Loads `.env` from the working directory into the process environment.
/// Returns the file's path when one was found.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// `POSTSYNC_*` variables, with numeric and boolean strings parsed.
fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .try_parsing(true)
}

fn defaults() -> std::result::Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("database_url", DEFAULT_DATABASE_URL)?
        .set_default("max_connections", 5)?
        .set_default("upstream_base_url", DEFAULT_UPSTREAM_BASE_URL)?
        .set_default("host", "127.0.0.1")?
        .set_default("port", 8080)?
        .set_default("sync_on_startup", true)?
        .set_default("probe_post_id", 1)?
        .set_default("log_level", "info")
}

fn config_error(err: ConfigError) -> AppError {
    AppError::Config(err.to_string())
}
