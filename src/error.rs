//! Crate-level error type.
//!
//! Configuration and API errors keep their own enums and convert into
//! `AppError` through `#[from]`. Failures inside the listing and form cores
//! are absorbed where they occur (redirects, outcomes, stored messages) and
//! never reach this type.

pub use crate::api::ApiError;
pub use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("News API error: {0}")]
    Api(#[from] ApiError),

    /// A global logger was already installed.
    #[error("Logger error: {0}")]
    Logger(String),
}

pub type AppResult<T> = Result<T, AppError>;
