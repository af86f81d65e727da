use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use potluck_core::{
    ingredients_for, rate, CatalogApi, CommentLedger, EngagementStore, FollowTracker, HttpCatalog,
    MealPlanner, RecipeDetail, Session,
};

#[derive(Parser)]
#[command(name = "potluck")]
#[command(about = "Potluck recipe catalog CLI", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, global = true, default_value = "http://localhost:3000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipes, optionally filtered by a title substring
    Recipes {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one recipe with its comments and average rating
    Show { recipe_id: String },
    /// Toggle your like on a recipe
    Like { recipe_id: String },
    /// Toggle a recipe in your favorites
    Favorite { recipe_id: String },
    /// Post a comment on a recipe
    Comment { recipe_id: String, text: String },
    /// Delete one of your comments
    DeleteComment { comment_id: String },
    /// Rate a recipe from 1 to 5
    Rate { recipe_id: String, value: u32 },
    /// Follow or unfollow a recipe creator
    Follow { user_id: String },
    /// List your meal plans with resolved ingredients per slot
    Plans,
    /// Create a meal plan, or update one by passing --id
    PlanSave {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        date: String,
        #[arg(long)]
        breakfast: String,
        #[arg(long)]
        lunch: String,
        #[arg(long)]
        dinner: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Delete a meal plan (asks unless --yes is passed)
    PlanDelete {
        plan_id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let session = match std::env::var("POTLUCK_TOKEN") {
        Ok(token) => Session::load(token),
        Err(_) => Session::anonymous(),
    };

    let transport = HttpCatalog::builder(&cli.server)
        .bearer_token(session.bearer_token().map(|t| t.to_string()))
        .build()
        .context("Failed to build catalog transport")?;
    let api = CatalogApi::new(Arc::new(transport));

    match cli.command {
        Commands::Recipes { search } => {
            let mut store = EngagementStore::new(session);
            store.load(api.list_recipes().await.context("Failed to list recipes")?);

            let cards: Vec<_> = match &search {
                Some(term) => store.search(term),
                None => store.cards().iter().collect(),
            };

            for card in cards {
                let liked = if card.liked { "liked" } else { "" };
                println!(
                    "{}  {:<30} by {:<15} {:>3} likes  {}",
                    card.recipe.id,
                    card.recipe.title,
                    card.recipe.creator_name(),
                    card.likes_count,
                    liked,
                );
            }
        }
        Commands::Show { recipe_id } => {
            let detail = RecipeDetail::fetch(&api, &recipe_id)
                .await
                .context("Failed to load recipe")?;

            println!("{}", detail.recipe.title);
            if let Some(category) = detail.recipe.category {
                println!("Category: {}", category.as_str());
            }
            println!("Cook time: {} mins", detail.recipe.cook_time);
            println!("\nIngredients:");
            for ingredient in &detail.recipe.ingredients {
                println!("  - {}", ingredient);
            }
            println!("\nSteps:");
            for (i, step) in detail.recipe.steps.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
            println!("\nAverage rating: {:.1}", detail.average_rating());
            println!("\nComments:");
            for comment in &detail.comments {
                println!("  {}: {}", comment.author_name(), comment.text);
            }
            if !detail.degraded.is_empty() {
                println!("\n(some sections could not be loaded)");
            }
        }
        Commands::Like { recipe_id } => {
            let mut store = EngagementStore::new(session);
            store.load(api.list_recipes().await.context("Failed to list recipes")?);

            let receipt = store
                .toggle_like(&api, &recipe_id)
                .await
                .context("Failed to toggle like")?;
            println!(
                "{}: {} likes",
                if receipt.liked { "Liked" } else { "Unliked" },
                receipt.likes_count
            );
        }
        Commands::Favorite { recipe_id } => {
            let mut store = EngagementStore::new(session);
            store.load(vec![]);

            let receipt = store
                .toggle_favorite(&api, &recipe_id)
                .await
                .context("Failed to toggle favorite")?;
            println!(
                "{}",
                if receipt.favorited {
                    "Added to favorites"
                } else {
                    "Removed from favorites"
                }
            );
        }
        Commands::Comment { recipe_id, text } => {
            let mut ledger = CommentLedger::new(&recipe_id);
            let comment = ledger
                .post(&api, &session, &text)
                .await
                .context("Failed to post comment")?;
            println!("Posted comment {}", comment.id);
        }
        Commands::DeleteComment { comment_id } => {
            api.delete_comment(&comment_id)
                .await
                .context("Failed to delete comment")?;
            println!("Deleted comment {}", comment_id);
        }
        Commands::Rate { recipe_id, value } => {
            rate(&api, &session, &recipe_id, value)
                .await
                .context("Failed to rate recipe")?;
            // The displayed average always comes from a fresh fetch.
            let summary = api
                .ratings_for(&recipe_id)
                .await
                .context("Failed to refresh ratings")?;
            println!("Saved. Average is now {:.1}", summary.average());
        }
        Commands::Follow { user_id } => {
            let mut tracker = FollowTracker::new();
            let following = tracker
                .toggle(&api, &session, &user_id)
                .await
                .context("Failed to toggle follow")?;
            println!("{}", if following { "Following" } else { "Unfollowed" });
        }
        Commands::Plans => {
            let catalog = api.list_recipes().await.context("Failed to list recipes")?;
            let mut planner = MealPlanner::new();
            planner.load(api.meal_plans().await.context("Failed to list meal plans")?);

            for plan in planner.plans() {
                println!("{}  [{}]", plan.date, plan.id);
                for (slot, title) in [
                    ("breakfast", &plan.meals.breakfast),
                    ("lunch", &plan.meals.lunch),
                    ("dinner", &plan.meals.dinner),
                ] {
                    let ingredients = ingredients_for(&catalog, title);
                    if ingredients.is_empty() {
                        println!("  {:<10} {}", slot, title);
                    } else {
                        println!("  {:<10} {} ({})", slot, title, ingredients.join(", "));
                    }
                }
                if !plan.notes.is_empty() {
                    println!("  notes: {}", plan.notes);
                }
            }
        }
        Commands::PlanSave {
            id,
            date,
            breakfast,
            lunch,
            dinner,
            notes,
        } => {
            let mut planner = MealPlanner::new();
            if let Some(id) = id {
                planner.load(api.meal_plans().await.context("Failed to list meal plans")?);
                let existing = planner
                    .plans()
                    .iter()
                    .find(|p| p.id == id)
                    .cloned()
                    .context("No meal plan with that id")?;
                planner.draft.edit(&existing);
            } else {
                planner.draft.begin();
            }
            planner.draft.date = date;
            planner.draft.breakfast = breakfast;
            planner.draft.lunch = lunch;
            planner.draft.dinner = dinner;
            planner.draft.notes = notes;

            let plan = planner
                .create_or_update(&api)
                .await
                .context("Failed to save meal plan")?;
            println!("Saved plan {} for {}", plan.id, plan.date);
        }
        Commands::PlanDelete { plan_id, yes } => {
            let confirmed = yes || confirm(&format!("Delete meal plan {}?", plan_id))?;
            let mut planner = MealPlanner::new();
            let deleted = planner
                .delete(&api, &plan_id, confirmed)
                .await
                .context("Failed to delete meal plan")?;
            println!("{}", if deleted { "Deleted" } else { "Aborted" });
        }
    }

    Ok(())
}

/// Yes/no gate on stdin.
fn confirm(prompt: &str) -> Result<bool> {
    use std::io::Write;

    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
