//! Configuration management module.
//!
//! This module handles loading and saving the client configuration: the
//! portal API address, the persisted session token, the HTTP timeout and the
//! log level.

mod error;

pub use error::ConfigError;

use crate::error::AppResult;
use log::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/news-portal";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub access_token: Option<String>,
    pub request_timeout_secs: u64,
    pub log_level: String,
    file_path: Option<PathBuf>,
}

/// On-disk shape of `config.yml`.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    "http://localhost:3030".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl FileSpec {
    /// Reject values that parse but cannot drive the client.
    ///
    fn check(&self) -> Result<(), ConfigError> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "api_url",
                reason: format!("'{}' must start with http:// or https://", self.api_url),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config {
            api_url: default_api_url(),
            access_token: None,
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
            file_path: None,
        }
    }

    /// Load `config.yml` from `custom_dir`, or from `~/.config/news-portal`
    /// when none is given. A missing file keeps the defaults; keys absent from
    /// the file take their defaults too. The directory is created so that a
    /// later `save` can write the token.
    ///
    pub fn load(&mut self, custom_dir: Option<&str>) -> AppResult<()> {
        let dir = match custom_dir {
            Some(dir) => PathBuf::from(dir),
            None => Config::default_path()?,
        };
        fs::create_dir_all(&dir).map_err(|source| ConfigError::Unwritable {
            path: dir.clone(),
            source,
        })?;

        let file_path = dir.join(FILE_NAME);
        if file_path.exists() {
            let contents =
                fs::read_to_string(&file_path).map_err(|source| ConfigError::Unreadable {
                    path: file_path.clone(),
                    source,
                })?;
            let spec: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::Malformed(e.to_string()))?;
            spec.check()?;
            self.api_url = spec.api_url.trim_end_matches('/').to_owned();
            self.access_token = spec.access_token.filter(|token| !token.is_empty());
            self.request_timeout_secs = spec.request_timeout_secs;
            self.log_level = spec.log_level;
        }
        self.file_path = Some(file_path);
        Ok(())
    }

    /// Write the current values back to the file selected by `load`.
    ///
    pub fn save(&self) -> AppResult<()> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let spec = FileSpec {
            api_url: self.api_url.clone(),
            access_token: self.access_token.clone(),
            request_timeout_secs: self.request_timeout_secs,
            log_level: self.log_level.clone(),
        };
        let content =
            serde_yaml::to_string(&spec).map_err(|e| ConfigError::Encoding(e.to_string()))?;
        fs::write(file_path, content).map_err(|source| ConfigError::Unwritable {
            path: file_path.clone(),
            source,
        })?;
        debug!("Saved configuration to {}", file_path.display());
        Ok(())
    }

    /// Persist a session token obtained at login.
    ///
    pub fn save_token(&mut self, token: String) -> AppResult<()> {
        self.access_token = Some(token);
        self.save()
    }

    /// Forget the persisted session token.
    ///
    pub fn clear_token(&mut self) -> AppResult<()> {
        self.access_token = None;
        self.save()
    }

    /// HTTP request timeout for the API client.
    ///
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> AppResult<PathBuf> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
