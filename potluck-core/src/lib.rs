pub mod catalog;
pub mod detail;
pub mod engagement;
pub mod error;
pub mod follow;
pub mod identity;
pub mod ledger;
pub mod meal_plan;
pub mod transport;
pub mod types;

pub use catalog::CatalogApi;
pub use detail::{RecipeDetail, Section};
pub use engagement::{EngagementStore, RecipeCard};
pub use error::EngageError;
pub use follow::FollowTracker;
pub use identity::{resolve_user_id, Session};
pub use ledger::{rate, CommentLedger};
pub use meal_plan::{ingredients_for, DraftState, MealPlanner, PlanDraft};
pub use transport::{CatalogTransport, HttpCatalog, HttpCatalogBuilder, MockCatalog, MockReply};
pub use types::{
    Category, Comment, FavoriteEntry, FavoriteReceipt, LikeReceipt, MealPlan, MealSlots,
    RatingEntry, RatingSummary, Recipe, UserRef,
};
