use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Defines user data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Defines an authenticated session.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Defines the list entry of an article.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>, // ISO 8601
}

/// Defines article data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String, // category id
    pub region: String,   // region id
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub views: u64,
}

/// Defines a category or region record used as a listing filter target.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Defines comment data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub article_id: String,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of an add/edit article request.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Body of an add/edit comment request.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentDraft {
    pub article_id: String,
    pub content: String,
}
