//! In-memory recipe collection with per-user engagement flags.
//!
//! Like and favorite toggles are NOT optimistic: the request is sent
//! first and the server's receipt dictates the new flag and count.
//! Applying the receipt verbatim (instead of inverting locally) keeps
//! the store consistent when a concurrent toggle landed first, and a
//! retried request can never double-count.

use crate::catalog::CatalogApi;
use crate::error::EngageError;
use crate::identity::Session;
use crate::types::{FavoriteReceipt, LikeReceipt, Recipe};

/// A recipe plus the acting user's derived engagement flags.
#[derive(Debug, Clone)]
pub struct RecipeCard {
    pub recipe: Recipe,
    pub liked: bool,
    pub favorited: bool,
    /// Authoritative like count. Seeded from the `like` set on load and
    /// overwritten by every like receipt.
    pub likes_count: u32,
}

pub struct EngagementStore {
    session: Session,
    cards: Vec<RecipeCard>,
}

impl EngagementStore {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            cards: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replace the collection wholesale. `liked` is recomputed from the
    /// like sets; `favorited` starts false until [`apply_favorites`]
    /// runs with the favorites response.
    ///
    /// [`apply_favorites`]: EngagementStore::apply_favorites
    pub fn load(&mut self, recipes: Vec<Recipe>) {
        let user_id = self.session.user_id();
        self.cards = recipes
            .into_iter()
            .map(|recipe| {
                let liked = user_id.is_some_and(|u| recipe.like.iter().any(|id| id == u));
                let likes_count = recipe.likes_count() as u32;
                RecipeCard {
                    recipe,
                    liked,
                    favorited: false,
                    likes_count,
                }
            })
            .collect();
    }

    /// Mark the recipes in `favorite_ids` as favorited.
    pub fn apply_favorites(&mut self, favorite_ids: &[String]) {
        for card in &mut self.cards {
            card.favorited = favorite_ids.contains(&card.recipe.id);
        }
    }

    pub fn cards(&self) -> &[RecipeCard] {
        &self.cards
    }

    pub fn get(&self, recipe_id: &str) -> Option<&RecipeCard> {
        self.cards.iter().find(|c| c.recipe.id == recipe_id)
    }

    /// Case-insensitive substring filter over titles.
    pub fn search(&self, term: &str) -> Vec<&RecipeCard> {
        let needle = term.to_lowercase();
        self.cards
            .iter()
            .filter(|c| c.recipe.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Toggle the acting user's like on a recipe.
    ///
    /// An unknown recipe id still issues the call (the server decides
    /// validity); only the local application is a no-op. On failure the
    /// local state is untouched.
    pub async fn toggle_like(
        &mut self,
        api: &CatalogApi,
        recipe_id: &str,
    ) -> Result<LikeReceipt, EngageError> {
        let user_id = self
            .session
            .user_id()
            .ok_or(EngageError::Unauthenticated)?
            .to_string();

        let receipt = api.toggle_like(recipe_id).await?;

        if let Some(card) = self.cards.iter_mut().find(|c| c.recipe.id == recipe_id) {
            card.liked = receipt.liked;
            card.likes_count = receipt.likes_count;
            // Keep the like set in step so a reload derives the same flag.
            if receipt.liked {
                if !card.recipe.like.iter().any(|id| *id == user_id) {
                    card.recipe.like.push(user_id);
                }
            } else {
                card.recipe.like.retain(|id| *id != user_id);
            }
        }

        Ok(receipt)
    }

    /// Toggle the acting user's favorite on a recipe. Same shape as
    /// [`toggle_like`] against the separate favorites relation.
    ///
    /// [`toggle_like`]: EngagementStore::toggle_like
    pub async fn toggle_favorite(
        &mut self,
        api: &CatalogApi,
        recipe_id: &str,
    ) -> Result<FavoriteReceipt, EngageError> {
        if !self.session.is_authenticated() {
            return Err(EngageError::Unauthenticated);
        }

        let receipt = api.toggle_favorite(recipe_id).await?;

        if let Some(card) = self.cards.iter_mut().find(|c| c.recipe.id == recipe_id) {
            card.favorited = receipt.favorited;
        }

        Ok(receipt)
    }
}
