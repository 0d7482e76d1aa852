//! HTTP client for news portal API requests.
//!
//! This module provides a low-level wrapper around `reqwest` that handles the
//! base URL, the bearer token from the session store, status checking and the
//! `{"data": ...}` response envelope.

use super::error::ApiError;
use crate::session::SessionStore;
use reqwest::{Method, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// Envelope around every successful response body.
///
#[derive(Deserialize)]
pub(crate) struct Wrapper<T> {
    pub data: T,
}

/// Body of a failed response.
///
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Makes requests to the portal API and conforms response data to the
/// requested type.
///
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
    pub(crate) session: SessionStore,
}

impl Client {
    /// Returns a new instance for the given base URL and session store.
    ///
    pub fn new(base_url: &str, session: SessionStore, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::builder().timeout(timeout).build()?,
            session,
        })
    }

    /// GET `path` with query parameters and return the unwrapped data.
    ///
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.call(Method::GET, path, params, None::<&()>).await?;
        Client::read(response).await
    }

    /// Send `body` with `method` to `path` and return the unwrapped data.
    ///
    pub async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.call(method, path, &[], Some(body)).await?;
        Client::read(response).await
    }

    /// DELETE `path`, ignoring any response body.
    ///
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.call(Method::DELETE, path, &[], None::<&()>).await?;
        Client::check(response).await?;
        Ok(())
    }

    /// Make request and return the raw response or a transport error.
    ///
    async fn call<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let request_url = format!("{}{}", self.base_url, path);
        log::debug!("{} {}", method, request_url);

        let mut request = self.http_client.request(method, &request_url);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(token) = self.session.access_token() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Turn a non-success status into `ApiError::Api`, preferring the
    /// backend's `message` field over the raw body.
    ///
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("Unable to read response"));
        let message = serde_json::from_str::<ErrorBody>(&response_text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                if response_text.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    response_text.clone()
                }
            });
        log::error!(
            "API request failed with status {}: {}",
            status,
            response_text
        );
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Check the status and deserialize the enveloped data.
    ///
    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Client::check(response).await?;
        let response_bytes = response.bytes().await?;
        match serde_json::from_slice::<Wrapper<T>>(&response_bytes) {
            Ok(model) => Ok(model.data),
            Err(e) => {
                log::error!(
                    "Failed to deserialize API response: {}. Response body: {}",
                    e,
                    String::from_utf8_lossy(&response_bytes)
                );
                Err(ApiError::Deserialization(e))
            }
        }
    }
}
