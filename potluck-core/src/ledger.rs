//! Per-recipe comment list and rating submission.
//!
//! Comments are newest-first; that ordering is a hard invariant of the
//! list. Deletion is never optimistic.

use crate::catalog::CatalogApi;
use crate::error::EngageError;
use crate::identity::Session;
use crate::types::Comment;

pub struct CommentLedger {
    recipe_id: String,
    comments: Vec<Comment>,
}

impl CommentLedger {
    pub fn new(recipe_id: impl Into<String>) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            comments: Vec::new(),
        }
    }

    /// Replace the list with a fetched comment list (already newest-first
    /// as returned by the backend).
    pub fn load(&mut self, comments: Vec<Comment>) {
        self.comments = comments;
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Post a comment. Whitespace-only text is rejected locally and no
    /// request is made; unauthenticated attempts are rejected likewise.
    /// The server-returned comment is prepended.
    pub async fn post(
        &mut self,
        api: &CatalogApi,
        session: &Session,
        text: &str,
    ) -> Result<&Comment, EngageError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(EngageError::Validation("comment text is empty".to_string()));
        }
        if !session.is_authenticated() {
            return Err(EngageError::Unauthenticated);
        }

        let comment = api.post_comment(&self.recipe_id, trimmed).await?;
        self.comments.insert(0, comment);
        Ok(&self.comments[0])
    }

    /// Delete a comment. The local list changes only after the server
    /// confirms.
    pub async fn delete(&mut self, api: &CatalogApi, comment_id: &str) -> Result<(), EngageError> {
        api.delete_comment(comment_id).await?;
        self.comments.retain(|c| c.id != comment_id);
        Ok(())
    }
}

/// Submit a rating for a recipe. Values outside 1..=5 are a local
/// validation error and are never sent.
///
/// The caller recomputes the displayed average from a fresh ratings
/// fetch afterwards; the store does not merge the new rating into a
/// stale average.
pub async fn rate(
    api: &CatalogApi,
    session: &Session,
    recipe_id: &str,
    value: u32,
) -> Result<(), EngageError> {
    if !session.is_authenticated() {
        return Err(EngageError::Unauthenticated);
    }
    if !(1..=5).contains(&value) {
        return Err(EngageError::Validation(format!(
            "rating must be between 1 and 5, got {}",
            value
        )));
    }

    api.post_rating(recipe_id, value).await
}
