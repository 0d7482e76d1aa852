mod client;
mod error;
mod resource;

pub use error::ApiError;
pub use resource::*;

use crate::listing::{FilterType, NewsSource};
use crate::session::SessionStore;
use client::Client;
use log::*;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Responsible for asynchronous interaction with the news portal API and the
/// transformation of response data into the resource types.
///
pub struct NewsApi {
    client: Client,
}

#[derive(Deserialize)]
struct CountModel {
    count: u64,
}

impl NewsApi {
    /// Returns a new instance for the given API address and session store.
    ///
    pub fn new(base_url: &str, session: SessionStore, timeout: Duration) -> Result<Self, ApiError> {
        debug!("Initializing news API client for {}...", base_url);
        Ok(NewsApi {
            client: Client::new(base_url, session, timeout)?,
        })
    }

    /// Session store the client reads its bearer token from.
    ///
    pub fn session(&self) -> &SessionStore {
        &self.client.session
    }

    /// Returns the number of articles matching the filter.
    ///
    pub async fn count(
        &self,
        filter_type: FilterType,
        filter_id: Option<&str>,
    ) -> Result<u64, ApiError> {
        debug!("Requesting article count for {:?} {:?}...", filter_type, filter_id);
        let params = filter_params(filter_type, filter_id);
        let data: CountModel = self.client.get("/news/count", &params).await?;
        Ok(data.count)
    }

    /// Returns one page of article summaries matching the filter.
    ///
    pub async fn list(
        &self,
        page: u32,
        per_page: u32,
        filter_type: FilterType,
        filter_id: Option<&str>,
    ) -> Result<Vec<ArticleSummary>, ApiError> {
        debug!(
            "Requesting page {} ({} per page) for {:?} {:?}...",
            page, per_page, filter_type, filter_id
        );
        let mut params = vec![("page", page.to_string()), ("per_page", per_page.to_string())];
        params.extend(filter_params(filter_type, filter_id));
        let data: Vec<ArticleSummary> = self.client.get("/news", &params).await?;
        debug!("Retrieved {} articles for page {}", data.len(), page);
        Ok(data)
    }

    /// Returns the categories or regions whose slug equals `key`.
    ///
    pub async fn lookup(
        &self,
        filter_type: FilterType,
        key: &str,
    ) -> Result<Vec<FilterRecord>, ApiError> {
        let path = match filter_type {
            FilterType::Category => "/categories",
            FilterType::Region => "/regions",
            other => {
                return Err(ApiError::Other(format!(
                    "No lookup exists for filter type {:?}",
                    other
                )))
            }
        };
        debug!("Looking up {:?} with slug '{}'...", filter_type, key);
        self.client.get(path, &[("slug", key.to_owned())]).await
    }

    /// Returns the full article.
    ///
    pub async fn article(&self, id: &str) -> Result<Article, ApiError> {
        debug!("Requesting article {}...", id);
        self.client.get(&format!("/news/{}", urlencoding::encode(id)), &[]).await
    }

    /// Create an article.
    ///
    pub async fn create_article(&self, draft: &ArticleDraft) -> Result<Article, ApiError> {
        self.require_session()?;
        debug!("Creating article '{}'...", draft.title);
        self.client.send(Method::POST, "/news", draft).await
    }

    /// Update an existing article.
    ///
    pub async fn update_article(&self, id: &str, draft: &ArticleDraft) -> Result<Article, ApiError> {
        self.require_session()?;
        debug!("Updating article {}...", id);
        self.client
            .send(Method::PUT, &format!("/news/{}", urlencoding::encode(id)), draft)
            .await
    }

    /// Delete an article.
    ///
    pub async fn delete_article(&self, id: &str) -> Result<(), ApiError> {
        self.require_session()?;
        debug!("Deleting article {}...", id);
        self.client.delete(&format!("/news/{}", urlencoding::encode(id))).await
    }

    /// Returns the comments of an article, oldest first.
    ///
    pub async fn comments(&self, article_id: &str) -> Result<Vec<Comment>, ApiError> {
        debug!("Requesting comments for article {}...", article_id);
        self.client
            .get(&format!("/news/{}/comments", urlencoding::encode(article_id)), &[])
            .await
    }

    /// Post a comment.
    ///
    pub async fn create_comment(&self, draft: &CommentDraft) -> Result<Comment, ApiError> {
        self.require_session()?;
        debug!("Posting comment on article {}...", draft.article_id);
        self.client.send(Method::POST, "/comments", draft).await
    }

    /// Edit a comment.
    ///
    pub async fn update_comment(&self, id: &str, draft: &CommentDraft) -> Result<Comment, ApiError> {
        self.require_session()?;
        debug!("Editing comment {}...", id);
        self.client
            .send(Method::PUT, &format!("/comments/{}", urlencoding::encode(id)), draft)
            .await
    }

    /// Delete a comment.
    ///
    pub async fn delete_comment(&self, id: &str) -> Result<(), ApiError> {
        self.require_session()?;
        debug!("Deleting comment {}...", id);
        self.client.delete(&format!("/comments/{}", urlencoding::encode(id))).await
    }

    /// Authenticate and store the resulting session.
    ///
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        debug!("Logging in as {}...", email);
        let body = json!({ "email": email, "password": password });
        let session: Session = self.client.send(Method::POST, "/auth/login", &body).await?;
        self.client.session.set(session.clone());
        info!("Logged in as {}.", email);
        Ok(session)
    }

    /// Create an account and store the resulting session.
    ///
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        debug!("Registering {}...", email);
        let body = json!({ "username": username, "email": email, "password": password });
        let session: Session = self
            .client
            .send(Method::POST, "/auth/register", &body)
            .await?;
        self.client.session.set(session.clone());
        info!("Registered {}.", email);
        Ok(session)
    }

    /// Drop the current session.
    ///
    pub fn logout(&self) {
        self.client.session.clear();
        info!("Logged out.");
    }

    fn require_session(&self) -> Result<(), ApiError> {
        if self.client.session.is_authenticated() {
            Ok(())
        } else {
            Err(ApiError::NotAuthenticated)
        }
    }
}

/// Query parameters selecting the filter. Category and region take the
/// resolved id, search takes the raw term.
///
fn filter_params(filter_type: FilterType, filter_id: Option<&str>) -> Vec<(&'static str, String)> {
    match (filter_type.segment(), filter_id) {
        (Some(key), Some(id)) => vec![(key, id.to_owned())],
        _ => vec![],
    }
}

impl NewsSource for NewsApi {
    async fn count(&self, filter_type: FilterType, filter_id: Option<&str>) -> Result<u64, ApiError> {
        NewsApi::count(self, filter_type, filter_id).await
    }

    async fn list(
        &self,
        page: u32,
        per_page: u32,
        filter_type: FilterType,
        filter_id: Option<&str>,
    ) -> Result<Vec<ArticleSummary>, ApiError> {
        NewsApi::list(self, page, per_page, filter_type, filter_id).await
    }

    async fn lookup(&self, filter_type: FilterType, key: &str) -> Result<Vec<FilterRecord>, ApiError> {
        NewsApi::lookup(self, filter_type, key).await
    }
}
