//! Recipe-detail composition: one recipe plus its comments and ratings,
//! fetched concurrently.

use crate::catalog::CatalogApi;
use crate::error::EngageError;
use crate::types::{Comment, RatingSummary, Recipe};

/// A section of the detail view that failed to populate and degraded to
/// empty/zero instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Comments,
    Ratings,
}

/// Everything the recipe-detail view needs, assembled from three
/// concurrent fetches.
#[derive(Debug)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub comments: Vec<Comment>,
    pub ratings: RatingSummary,
    /// Sections whose fetch failed. The rest of the view stays usable.
    pub degraded: Vec<Section>,
}

impl RecipeDetail {
    /// Fetch recipe, comments, and ratings concurrently. The view is
    /// ready once all three resolve. Only the recipe fetch is fatal; a
    /// failed comment or rating fetch degrades that section to
    /// empty/zero and is recorded in `degraded`.
    pub async fn fetch(api: &CatalogApi, recipe_id: &str) -> Result<Self, EngageError> {
        let (recipe, comments, ratings) = tokio::join!(
            api.get_recipe(recipe_id),
            api.comments_for(recipe_id),
            api.ratings_for(recipe_id),
        );

        let recipe = recipe?;
        let mut degraded = Vec::new();

        let comments = comments.unwrap_or_else(|e| {
            tracing::debug!(recipe_id, error = %e, "comment fetch failed, section degraded");
            degraded.push(Section::Comments);
            Vec::new()
        });
        let ratings = ratings.unwrap_or_else(|e| {
            tracing::debug!(recipe_id, error = %e, "rating fetch failed, section degraded");
            degraded.push(Section::Ratings);
            RatingSummary::default()
        });

        Ok(Self {
            recipe,
            comments,
            ratings,
            degraded,
        })
    }

    pub fn average_rating(&self) -> f64 {
        self.ratings.average()
    }
}
