use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration for the itemshop server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Address the server binds to
    pub host: String,
    /// Port the server listens on
    pub port: u16,
    /// Directory for JSON log files; logs go to stdout only when unset
    pub log_dir: Option<String>,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub log_dir: Option<String>,
}

/// Command line arguments for the server
#[derive(Parser, Debug, Default)]
#[clap(name = "itemshop", about = "Item, offer and user schema demo server")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address to bind
    #[clap(long, env = "ITEMSHOP_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[clap(long, env = "ITEMSHOP_PORT")]
    pub port: Option<u16>,

    /// Directory for rolling JSON log files
    #[clap(long, env = "ITEMSHOP_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Debug mode
    #[clap(long, env = "ITEMSHOP_DEBUG", default_value_t = false)]
    pub debug: bool,
}

/// Errors raised while reading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            host: update.host.unwrap_or(self.host),
            port: update.port.unwrap_or(self.port),
            log_dir: update.log_dir.or(self.log_dir),
        }
    }

    /// The `host:port` pair to bind
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Returns the base (default) configuration
///
/// The database file lives in `data_dir` when one is known, otherwise in the
/// working directory.
pub fn base_config(data_dir: Option<&Path>) -> Config {
    let database_url = data_dir.map_or("itemshop.db".to_string(), |path| {
        path.join("itemshop.db").to_string_lossy().to_string()
    });

    Config {
        database_url,
        host: "127.0.0.1".to_string(),
        port: 3000,
        log_dir: None,
    }
}

/// Loads configuration from a TOML file
///
/// A missing file is not an error; it yields an empty update.
pub fn config_from_file(config_path: Option<&Path>) -> Result<ConfigUpdate, ConfigError> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    let content = fs::read_to_string(config_path)?;
    let update = toml::from_str::<ConfigUpdate>(&content)?;
    info!("Loaded configuration from {:?}", config_path);
    Ok(update)
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: &CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url.clone(),
        host: args.host.clone(),
        port: args.port,
        log_dir: args.log_dir.clone(),
    }
}

/// Returns the platform config directory, if it can be determined
pub fn get_config_dir_path() -> Option<PathBuf> {
    match ProjectDirs::from("com", "itemshop", "itemshop") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().to_path_buf()),
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    }
}

/// Gets the complete configuration by combining defaults with values from
/// the config file and from command line arguments / environment variables,
/// in order of increasing precedence
pub fn get_config(args: &CliArgs) -> Config {
    let config_dir = get_config_dir_path().filter(|path| {
        let exists = path.exists();
        if !exists {
            info!("Config path not found at {:?}, using defaults", path);
        }
        exists
    });

    let base = base_config(config_dir.as_deref());
    let config_file = config_dir.map(|dir| dir.join(CONFIG_FILE_NAME));

    let file_update = config_from_file(config_file.as_deref()).unwrap_or_else(|e| {
        warn!("{}", e);
        ConfigUpdate::default()
    });

    let config = base
        .apply_update(file_update)
        .apply_update(config_from_args(args));

    info!(
        "Final configuration: database_url={}, listen={}, log_dir={:?}",
        config.database_url,
        config.listen_addr(),
        config.log_dir
    );

    config
}
