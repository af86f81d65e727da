//! Typed endpoint layer over the catalog transport.
//!
//! The backend wraps (or doesn't wrap) payloads inconsistently:
//! `GET /recipes/{id}` may return the recipe directly or under a
//! `recipe` key, lists come under `recipes`/`comments`/`mealPlans` or
//! bare. All of that is resolved here so callers only ever see the
//! types in [`crate::types`].

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::error::EngageError;
use crate::transport::CatalogTransport;
use crate::types::{
    Comment, FavoriteEntry, FavoriteReceipt, LikeReceipt, MealPlan, RatingSummary, Recipe,
};

#[derive(Clone)]
pub struct CatalogApi {
    transport: Arc<dyn CatalogTransport>,
}

impl CatalogApi {
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        Self { transport }
    }

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, EngageError> {
        let value = self.transport.get("/recipes").await?;
        decode(unwrap_key(value, "recipes"), "recipe list")
    }

    pub async fn get_recipe(&self, id: &str) -> Result<Recipe, EngageError> {
        let value = self.transport.get(&format!("/recipes/{}", id)).await?;
        decode(unwrap_key(value, "recipe"), "recipe")
    }

    /// Toggle the acting user's like on a recipe. The response carries
    /// the authoritative flag and count.
    pub async fn toggle_like(&self, id: &str) -> Result<LikeReceipt, EngageError> {
        let value = self
            .transport
            .post(&format!("/recipes/{}/like", id), Value::Object(Default::default()))
            .await?;
        decode(value, "like receipt")
    }

    pub async fn toggle_favorite(&self, recipe_id: &str) -> Result<FavoriteReceipt, EngageError> {
        let value = self
            .transport
            .post("/Fav/favrouits", serde_json::json!({ "recipeId": recipe_id }))
            .await?;
        decode(value, "favorite receipt")
    }

    pub async fn list_favorites(&self) -> Result<Vec<Recipe>, EngageError> {
        let value = self.transport.get("/Fav").await?;
        let entries: Vec<FavoriteEntry> =
            decode(unwrap_key(value, "favorites"), "favorites list")?;
        Ok(entries.into_iter().map(|e| e.recipe).collect())
    }

    pub async fn comments_for(&self, recipe_id: &str) -> Result<Vec<Comment>, EngageError> {
        let value = self
            .transport
            .get(&format!("/comments/comment/{}", recipe_id))
            .await?;
        decode(unwrap_key(value, "comments"), "comment list")
    }

    pub async fn post_comment(&self, recipe_id: &str, text: &str) -> Result<Comment, EngageError> {
        let value = self
            .transport
            .post(
                "/comments/comment",
                serde_json::json!({ "text": text, "recipeId": recipe_id }),
            )
            .await?;
        decode(unwrap_key(value, "comment"), "comment")
    }

    pub async fn delete_comment(&self, comment_id: &str) -> Result<(), EngageError> {
        self.transport
            .delete(&format!("/comments/delete/{}", comment_id))
            .await?;
        Ok(())
    }

    pub async fn ratings_for(&self, recipe_id: &str) -> Result<RatingSummary, EngageError> {
        let value = self.transport.get(&format!("/ratings/{}", recipe_id)).await?;
        decode(value, "rating summary")
    }

    pub async fn post_rating(&self, recipe_id: &str, rating: u32) -> Result<(), EngageError> {
        self.transport
            .post(
                "/ratings/rating",
                serde_json::json!({ "recipeId": recipe_id, "rating": rating }),
            )
            .await?;
        Ok(())
    }

    pub async fn follow(&self, user_id: &str) -> Result<(), EngageError> {
        self.transport
            .post("/follow/follow", serde_json::json!({ "userId": user_id }))
            .await?;
        Ok(())
    }

    pub async fn unfollow(&self, user_id: &str) -> Result<(), EngageError> {
        self.transport
            .post("/follow/unfollow", serde_json::json!({ "userId": user_id }))
            .await?;
        Ok(())
    }

    pub async fn meal_plans(&self) -> Result<Vec<MealPlan>, EngageError> {
        let value = self.transport.get("/meals/mealplan").await?;
        decode(unwrap_key(value, "mealPlans"), "meal plan list")
    }

    pub async fn create_meal_plan(&self, payload: Value) -> Result<MealPlan, EngageError> {
        let value = self.transport.post("/meals/createmealplan", payload).await?;
        decode(unwrap_key(value, "mealPlan"), "meal plan")
    }

    pub async fn update_meal_plan(
        &self,
        id: &str,
        payload: Value,
    ) -> Result<MealPlan, EngageError> {
        let value = self
            .transport
            .put(&format!("/meals/mealplan/{}", id), payload)
            .await?;
        decode(unwrap_key(value, "mealPlan"), "meal plan")
    }

    pub async fn delete_meal_plan(&self, id: &str) -> Result<(), EngageError> {
        self.transport
            .delete(&format!("/meals/mealplan/{}", id))
            .await?;
        Ok(())
    }
}

/// If `value` is an object carrying `key`, unwrap it; otherwise the
/// payload was sent bare and is returned as-is.
fn unwrap_key(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key(key) => map.remove(key).unwrap_or(Value::Null),
        other => other,
    }
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, EngageError> {
    serde_json::from_value(value)
        .map_err(|e| EngageError::Decode(format!("{}: {}", what, e)))
}
