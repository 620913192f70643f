//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `GRADER_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::evaluator::DEFAULT_PASS_THRESHOLD;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `GRADER_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Path to the question document. Default: `./questions.json`.
    pub questions_path: PathBuf,

    /// Directory holding the embedding model
    /// (`config.json`, `model.safetensors`, `tokenizer.json`).
    pub model_dir: Option<PathBuf>,

    /// Pass threshold applied when a request does not supply one.
    /// Default: `0.70`.
    pub pass_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            questions_path: PathBuf::from("./questions.json"),
            model_dir: None,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "GRADER_PORT";
    const ENV_BIND_ADDR: &'static str = "GRADER_BIND_ADDR";
    const ENV_QUESTIONS_PATH: &'static str = "GRADER_QUESTIONS_PATH";
    const ENV_MODEL_DIR: &'static str = "GRADER_MODEL_DIR";
    const ENV_PASS_THRESHOLD: &'static str = "GRADER_PASS_THRESHOLD";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let questions_path =
            Self::parse_path_from_env(Self::ENV_QUESTIONS_PATH, defaults.questions_path);
        let model_dir = Self::parse_optional_path_from_env(Self::ENV_MODEL_DIR);
        let pass_threshold = Self::parse_threshold_from_env(defaults.pass_threshold)?;

        Ok(Self {
            port,
            bind_addr,
            questions_path,
            model_dir,
            pass_threshold,
        })
    }

    /// Validates paths and basic invariants (does not create files).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.questions_path.exists() && !self.questions_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.questions_path.clone(),
            });
        }

        if let Some(ref path) = self.model_dir {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if !(0.0..=1.0).contains(&self.pass_threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.pass_threshold,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(default: f64) -> Result<f64, ConfigError> {
        match env::var(Self::ENV_PASS_THRESHOLD) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::ThresholdParseError { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}
