//! Per-creator follow relationship state.
//!
//! Unlike the like/favorite toggles, follow flips optimistically and
//! reverts on failure. The asymmetry is deliberate and matches the
//! observable behavior of the catalog's clients; see DESIGN.md.

use std::collections::HashMap;

use crate::catalog::CatalogApi;
use crate::error::EngageError;
use crate::identity::Session;

#[derive(Debug, Default)]
pub struct FollowTracker {
    following: HashMap<String, bool>,
}

impl FollowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the relationship state from a fetched recipe's
    /// `isFollowing` field.
    pub fn seed(&mut self, creator_id: impl Into<String>, following: bool) {
        self.following.insert(creator_id.into(), following);
    }

    pub fn is_following(&self, creator_id: &str) -> bool {
        self.following.get(creator_id).copied().unwrap_or(false)
    }

    /// Flip the follow state for a creator. The flag flips before the
    /// request goes out and reverts if the request fails. Self-follow is
    /// not guarded; the backend does not enforce it either.
    pub async fn toggle(
        &mut self,
        api: &CatalogApi,
        session: &Session,
        creator_id: &str,
    ) -> Result<bool, EngageError> {
        if !session.is_authenticated() {
            return Err(EngageError::Unauthenticated);
        }

        let was_following = self.is_following(creator_id);
        self.following
            .insert(creator_id.to_string(), !was_following);

        let result = if was_following {
            api.unfollow(creator_id).await
        } else {
            api.follow(creator_id).await
        };

        match result {
            Ok(()) => Ok(!was_following),
            Err(e) => {
                tracing::debug!(creator_id, error = %e, "follow toggle failed, reverting");
                self.following
                    .insert(creator_id.to_string(), was_following);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_creator_is_not_followed() {
        let tracker = FollowTracker::new();
        assert!(!tracker.is_following("u1"));
    }

    #[test]
    fn seed_sets_initial_state() {
        let mut tracker = FollowTracker::new();
        tracker.seed("u1", true);
        assert!(tracker.is_following("u1"));
        assert!(!tracker.is_following("u2"));
    }
}
