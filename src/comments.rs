//! Comment list reducer.
//!
//! The comment section of an article is a list folded over these actions.

use crate::api::Comment;

/// Specifying comment list actions.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum CommentAction {
    /// Replace the list with freshly fetched comments.
    GetAll(Vec<Comment>),
    Add(Comment),
    /// Replace the comment with the same id.
    Edit(Comment),
    /// Remove the comment with this id.
    Remove(String),
    Clear,
}

/// Apply `action` to `comments`.
///
pub fn reduce(comments: Vec<Comment>, action: CommentAction) -> Vec<Comment> {
    match action {
        CommentAction::GetAll(fetched) => fetched,
        CommentAction::Add(comment) => {
            let mut comments = comments;
            comments.push(comment);
            comments
        }
        CommentAction::Edit(edited) => comments
            .into_iter()
            .map(|c| if c.id == edited.id { edited.clone() } else { c })
            .collect(),
        CommentAction::Remove(id) => comments.into_iter().filter(|c| c.id != id).collect(),
        CommentAction::Clear => vec![],
    }
}
