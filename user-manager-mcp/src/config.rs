//! Environment-driven server configuration.
//!
//! Every setting has a default, so an empty environment yields a working
//! configuration. Values that are present but malformed are rejected.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

pub const APP_ENV: &str = "APP_ENV";
pub const PORT: &str = "PORT";
pub const MCP_SERVER_NAME: &str = "MCP_SERVER_NAME";
pub const MCP_SERVER_VERSION: &str = "MCP_SERVER_VERSION";
pub const DATA_FILE_PATH: &str = "DATA_FILE_PATH";
pub const DATA_BASE_DIR: &str = "DATA_BASE_DIR";
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENABLE_AUTH: &str = "ENABLE_AUTH";
pub const DANGEROUSLY_OMIT_AUTH: &str = "DANGEROUSLY_OMIT_AUTH";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SERVER_NAME: &str = "mcp-user-management";
const DEFAULT_DATA_FILE: &str = "data/users.json";

/// Environment abstraction for configuration lookups.
///
/// Lets tests supply variables without mutating the process environment.
pub trait ConfigEnv {
    /// Fetch a string value by name.
    fn string(&self, name: &str) -> Option<String>;
}

/// Environment access backed by the real process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl ConfigEnv for ProcessEnv {
    fn string(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// A configuration value that could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be one of {expected}, got \"{value}\"")]
    InvalidChoice {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{var} must be a port number (0-65535), got \"{value}\"")]
    InvalidPort { var: &'static str, value: String },

    #[error("Cannot determine the data directory: {0}")]
    BaseDir(String),
}

/// Runtime environment name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        })
    }
}

/// Minimum level for emitted log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(()),
        }
    }
}

/// Log line layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    #[default]
    Text,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(()),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub environment: Environment,
    /// Reserved for network transports; the stdio server never binds it.
    pub port: u16,
    pub server_name: String,
    pub server_version: String,
    /// Absolute path of the JSON user store.
    pub data_file: PathBuf,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
    /// Parsed and reported, never enforced.
    pub enable_auth: bool,
    /// Parsed and reported, never enforced.
    pub dangerously_omit_auth: bool,
}

impl Config {
    /// Load configuration from the real process environment.
    ///
    /// # Errors
    /// Returns `ConfigError` when a variable is set to an unsupported value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(&ProcessEnv)
    }

    /// Load configuration from a custom environment source.
    ///
    /// # Errors
    /// Returns `ConfigError` when a variable is set to an unsupported value.
    pub fn from_env_with(env: &impl ConfigEnv) -> Result<Self, ConfigError> {
        let lookup = |name: &str| env.string(name).filter(|v| !v.is_empty());

        let environment = parse_choice(
            APP_ENV,
            lookup(APP_ENV),
            "development, production, test",
        )?;
        let log_level = parse_choice(LOG_LEVEL, lookup(LOG_LEVEL), "debug, info, warn, error")?;
        let log_format = parse_choice(LOG_FORMAT, lookup(LOG_FORMAT), "json, text")?;

        let port = match lookup(PORT) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { var: PORT, value })?,
            None => DEFAULT_PORT,
        };

        let base_dir = match lookup(DATA_BASE_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir().map_err(|e| ConfigError::BaseDir(e.to_string()))?,
        };
        let data_file = resolve_data_file(
            &base_dir,
            lookup(DATA_FILE_PATH).as_deref().unwrap_or(DEFAULT_DATA_FILE),
        );

        Ok(Self {
            environment,
            port,
            server_name: lookup(MCP_SERVER_NAME).unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
            server_version: lookup(MCP_SERVER_VERSION)
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            data_file,
            log_level,
            log_format,
            enable_auth: lookup(ENABLE_AUTH).is_some_and(|v| v == "true"),
            dangerously_omit_auth: lookup(DANGEROUSLY_OMIT_AUTH).is_some_and(|v| v == "true"),
        })
    }
}

fn parse_choice<T: FromStr + Default>(
    var: &'static str,
    value: Option<String>,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let Some(value) = value else {
        return Ok(T::default());
    };
    value.parse().map_err(|_| ConfigError::InvalidChoice {
        var,
        expected,
        value,
    })
}

fn resolve_data_file(base_dir: &Path, data_file: &str) -> PathBuf {
    let path = Path::new(data_file);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
