//! Typed catalog records.
//!
//! The backend is loose about shapes: ids arrive as `_id`, some fields
//! are optional arrays, dates are full timestamps where only the
//! calendar day matters. Everything is normalized into these strict
//! types at the fetch boundary; untyped JSON never reaches the stores.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Recipe category as published by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    #[serde(rename = "Quick Snack")]
    QuickSnack,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::Lunch => "Lunch",
            Category::Dinner => "Dinner",
            Category::Dessert => "Dessert",
            Category::QuickSnack => "Quick Snack",
        }
    }
}

/// Reference to a user (creator, comment author).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    /// Some records carry this capitalized ("Description").
    #[serde(default, alias = "Description")]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub category: Option<Category>,
    /// Cook time in minutes.
    #[serde(default)]
    pub cook_time: u32,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    /// User ids who liked this recipe. The backend guarantees at most
    /// one entry per user.
    #[serde(default)]
    pub like: Vec<String>,
    /// Whether the acting user follows the creator; only present on the
    /// single-recipe endpoint.
    #[serde(default)]
    pub is_following: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Recipe {
    pub fn likes_count(&self) -> usize {
        self.like.len()
    }

    pub fn creator_name(&self) -> &str {
        self.created_by
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub recipe_id: String,
    /// Author reference; may be absent on stale records.
    #[serde(default)]
    pub user: Option<UserRef>,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn author_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or("anonymous")
    }
}

/// One submitted rating. The wire shape nests the value under `rating`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingEntry {
    pub rating: u32,
}

/// All ratings for a recipe as returned by `GET /ratings/{recipeId}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingSummary {
    #[serde(default, rename = "rating")]
    pub entries: Vec<RatingEntry>,
    #[serde(default)]
    pub count: u32,
}

impl RatingSummary {
    /// Arithmetic mean over all ratings; 0 when none exist.
    ///
    /// The backend reports `count` alongside the entries; when it is
    /// missing or zero we fall back to the entry count rather than
    /// dividing by zero.
    pub fn average(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.entries.iter().map(|e| e.rating).sum();
        let n = if self.count > 0 {
            self.count as f64
        } else {
            self.entries.len() as f64
        };
        sum as f64 / n
    }
}

/// Server receipt for a like toggle: the authoritative flag and count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeReceipt {
    pub liked: bool,
    pub likes_count: u32,
}

/// Server receipt for a favorite toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteReceipt {
    pub favorited: bool,
}

/// Entry in the favorites listing; the backend wraps each recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub recipe: Recipe,
}

/// The three named meal positions of a plan. Each slot holds a free-text
/// recipe-title reference, not a foreign key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSlots {
    #[serde(default)]
    pub breakfast: String,
    #[serde(default)]
    pub lunch: String,
    #[serde(default)]
    pub dinner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<String>,
    /// Calendar date. The backend sends a full timestamp; only the day
    /// is meaningful.
    #[serde(deserialize_with = "calendar_date")]
    pub date: NaiveDate,
    pub meals: MealSlots,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let day = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_tolerates_backend_field_spelling() {
        let recipe: Recipe = serde_json::from_value(serde_json::json!({
            "_id": "r1",
            "title": "Omelette",
            "Description": "Fluffy",
            "ingredients": ["eggs", "butter"],
            "steps": ["whisk", "fry"],
            "category": "Breakfast",
            "cookTime": 10,
            "servings": 2,
            "createdBy": {"_id": "u1", "username": "ana"},
            "like": ["u2", "u3"]
        }))
        .unwrap();

        assert_eq!(recipe.id, "r1");
        assert_eq!(recipe.description, "Fluffy");
        assert_eq!(recipe.category, Some(Category::Breakfast));
        assert_eq!(recipe.cook_time, 10);
        assert_eq!(recipe.likes_count(), 2);
        assert_eq!(recipe.creator_name(), "ana");
    }

    #[test]
    fn recipe_optional_arrays_default_to_empty() {
        let recipe: Recipe =
            serde_json::from_value(serde_json::json!({"_id": "r2", "title": "Toast"})).unwrap();
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.steps.is_empty());
        assert!(recipe.like.is_empty());
        assert_eq!(recipe.creator_name(), "Unknown");
    }

    #[test]
    fn quick_snack_category_round_trips() {
        let value = serde_json::to_value(Category::QuickSnack).unwrap();
        assert_eq!(value, serde_json::json!("Quick Snack"));
        let parsed: Category = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, Category::QuickSnack);
    }

    #[test]
    fn average_is_zero_without_ratings() {
        assert_eq!(RatingSummary::default().average(), 0.0);
    }

    #[test]
    fn average_uses_reported_count() {
        let summary = RatingSummary {
            entries: vec![
                RatingEntry { rating: 5 },
                RatingEntry { rating: 4 },
                RatingEntry { rating: 3 },
            ],
            count: 3,
        };
        assert_eq!(summary.average(), 4.0);
    }

    #[test]
    fn average_falls_back_to_entry_count() {
        let summary = RatingSummary {
            entries: vec![RatingEntry { rating: 4 }, RatingEntry { rating: 2 }],
            count: 0,
        };
        assert_eq!(summary.average(), 3.0);
    }

    #[test]
    fn meal_plan_date_keeps_calendar_day_only() {
        let plan: MealPlan = serde_json::from_value(serde_json::json!({
            "_id": "m1",
            "date": "2026-01-01T00:00:00.000Z",
            "meals": {"breakfast": "Omelette", "lunch": "Salad", "dinner": "Curry"}
        }))
        .unwrap();
        assert_eq!(plan.date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(plan.notes, "");
    }

    #[test]
    fn comment_author_falls_back_to_anonymous() {
        let comment: Comment =
            serde_json::from_value(serde_json::json!({"_id": "c1", "text": "tasty"})).unwrap();
        assert_eq!(comment.author_name(), "anonymous");
    }
}
