//! Layered service configuration.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults,
//! 2. `configuration/base.toml` (optional),
//! 3. environment variables prefixed `APP_`, with `__` between nested keys,
//!    e.g. `APP_SERVER__PORT=8080` or `APP_DATASET__DATA_DIR=/srv/hawaii`.

use crate::data_store::dataset_loader::{DEFAULT_MEASUREMENT_FILE, DEFAULT_STATION_FILE};
use crate::data_store::DatasetLoader;
use crate::utils::get_cache_dir;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "configuration/base.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub dataset: DatasetSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    /// Directory holding the measurement and station files.
    pub data_dir: PathBuf,
    pub measurement_file: String,
    pub station_file: String,
    /// Whether CSV tables are cached as Parquet.
    pub cache: bool,
    /// Cache location; the platform cache directory when unset.
    pub cache_dir: Option<PathBuf>,
}

impl DatasetSettings {
    pub fn resolved_cache_dir(&self) -> Option<PathBuf> {
        if !self.cache {
            return None;
        }
        self.cache_dir.clone().or_else(get_cache_dir)
    }

    pub fn loader(&self) -> DatasetLoader {
        DatasetLoader::builder()
            .data_dir(self.data_dir.clone())
            .maybe_cache_dir(self.resolved_cache_dir())
            .measurement_file(self.measurement_file.clone())
            .station_file(self.station_file.clone())
            .build()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Reads settings from `configuration/base.toml` and the environment.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    build_settings(Path::new(CONFIG_FILE), environment())
}

fn build_settings(config_file: &Path, env: Environment) -> Result<Settings, ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5000)?
        .set_default("dataset.data_dir", "Resources")?
        .set_default("dataset.measurement_file", DEFAULT_MEASUREMENT_FILE)?
        .set_default("dataset.station_file", DEFAULT_STATION_FILE)?
        .set_default("dataset.cache", true)?
        .add_source(File::from(config_file).required(false))
        .add_source(env)
        .build()?
        .try_deserialize()
}
