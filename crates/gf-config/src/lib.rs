//! # gf-config
//!
//! Layered settings for the gamer-feed binary: built-in defaults, then an
//! optional `gamer-feed.toml`, then `GF_*` environment variables
//! (`GF_MODE=live`, `GF_HTTP__PORT=9000`). A `.env` file is read first if present.

use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use gf_core::Mode;
use serde::Deserialize;
use thiserror::Error;

/// Base name of the optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "gamer-feed";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// demo or live, fixed for the process lifetime
    pub mode: Mode,
    pub http: HttpConfig,
    pub live: LiveConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

/// Storage locations used only in live mode.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveConfig {
    /// Directory holding one JSON file per document collection
    pub data_dir: PathBuf,
    /// Root directory for uploaded media
    pub media_dir: PathBuf,
    /// Public URL prefix the media directory is served under
    pub media_url_prefix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl FeedConfig {
    /// Loads `.env`, the optional settings file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }

        let builder = defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix("GF")
                    .prefix_separator("_")
                    .separator("__"),
            );
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Defaults overlaid with a TOML document.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let builder = defaults()?.add_source(File::from_str(toml, FileFormat::Toml));
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.http.host.clone(), self.http.port)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("mode", "demo")?
        .set_default("http.host", "127.0.0.1")?
        .set_default("http.port", 8080_i64)?
        .set_default("live.data_dir", "./data/documents")?
        .set_default("live.media_dir", "./data/uploads")?
        .set_default("live.media_url_prefix", "/static/uploads")?
        .set_default("log.format", "pretty")?
        .set_default("log.filter", "info")
}
