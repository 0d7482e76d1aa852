//! Errors raised while reading or writing the client configuration.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `save` was called before `load` located the file.
    #[error("No configuration file selected; load one first")]
    FilePathNotSet,

    #[error("Cannot locate the home directory for the default configuration")]
    HomeDirectoryNotFound,

    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Creating the directory or writing the file failed.
    #[error("Cannot write {path}: {source}")]
    Unwritable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed configuration file: {0}")]
    Malformed(String),

    #[error("Cannot encode configuration: {0}")]
    Encoding(String),

    /// A key parsed but holds a value the client cannot use.
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_key_or_path() {
        let error = ConfigError::InvalidValue {
            key: "api_url",
            reason: "must start with http:// or https://".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for 'api_url': must start with http:// or https://"
        );

        let error = ConfigError::Unwritable {
            path: PathBuf::from("/home/ivan/.config/news-portal/config.yml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = error.to_string();
        assert!(message.contains("news-portal/config.yml"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_malformed_keeps_parser_message() {
        let error = ConfigError::Malformed("line 1 column 24".to_string());
        assert!(error.to_string().ends_with("line 1 column 24"));
    }
}
