//! Client library for a regional news portal.
//!
//! The crate covers the parts of the portal front-end that carry real state:
//! - `listing`: filter resolution, pagination and page fetching for news lists
//! - `form` and `validation`: generic form state with per-field validation
//! - `api`: HTTP client for the portal REST API
//! - `session` and `comments`: session store and comment list reducer
//! - `config`, `logger` and `error`: configuration, logging and error types

pub mod api;
pub mod app;
pub mod comments;
pub mod config;
pub mod error;
pub mod form;
pub mod listing;
pub mod logger;
pub mod session;
pub mod validation;
