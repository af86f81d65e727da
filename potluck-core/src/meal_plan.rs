//! Meal-plan composition: a per-user list of dated plans whose slots
//! reference recipes by title, plus the draft state machine behind the
//! planner form.
//!
//! Slots store free-text titles for backend compatibility, so resolving
//! a slot to an ingredient list is a lookup by title, not by id.

use serde_json::json;

use crate::catalog::CatalogApi;
use crate::error::EngageError;
use crate::types::{MealPlan, Recipe};

/// Resolve a slot's recipe-title reference against the loaded catalog.
///
/// Pure and side-effect-free; called repeatedly during composition.
/// Matching is case-insensitive and takes the first match in catalog
/// order (duplicate titles are ambiguous on the wire; first-match is
/// the documented tie-break). No match resolves to an empty list, not
/// an error.
pub fn ingredients_for<'a>(catalog: &'a [Recipe], title: &str) -> &'a [String] {
    catalog
        .iter()
        .find(|r| r.title.eq_ignore_ascii_case(title))
        .map(|r| r.ingredients.as_slice())
        .unwrap_or(&[])
}

/// Draft lifecycle: `Empty → Editing → Submitting → {Empty | Editing}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftState {
    #[default]
    Empty,
    Editing,
    Submitting,
}

/// The planner form's working copy.
#[derive(Debug, Clone, Default)]
pub struct PlanDraft {
    pub date: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub notes: String,
    edit_id: Option<String>,
    state: DraftState,
}

impl PlanDraft {
    pub fn state(&self) -> DraftState {
        self.state
    }

    /// True when the draft edits an existing plan rather than creating
    /// a new one.
    pub fn is_edit(&self) -> bool {
        self.edit_id.is_some()
    }

    /// Start a fresh plan.
    pub fn begin(&mut self) {
        self.clear();
        self.state = DraftState::Editing;
    }

    /// Load an existing plan into the form, all slots and notes included.
    pub fn edit(&mut self, plan: &MealPlan) {
        self.date = plan.date.format("%Y-%m-%d").to_string();
        self.breakfast = plan.meals.breakfast.clone();
        self.lunch = plan.meals.lunch.clone();
        self.dinner = plan.meals.dinner.clone();
        self.notes = plan.notes.clone();
        self.edit_id = Some(plan.id.clone());
        self.state = DraftState::Editing;
    }

    /// Reset every field deterministically, including edit mode.
    pub fn clear(&mut self) {
        *self = PlanDraft::default();
    }

    fn validate(&self) -> Result<(), EngageError> {
        for (field, value) in [
            ("date", &self.date),
            ("breakfast", &self.breakfast),
            ("lunch", &self.lunch),
            ("dinner", &self.dinner),
        ] {
            if value.trim().is_empty() {
                return Err(EngageError::Validation(format!("{} is required", field)));
            }
        }
        Ok(())
    }

    fn payload(&self) -> serde_json::Value {
        json!({
            "date": self.date,
            "meals": {
                "breakfast": self.breakfast,
                "lunch": self.lunch,
                "dinner": self.dinner,
            },
            "notes": self.notes,
        })
    }
}

/// The user's meal plans plus the draft form. No optimistic mutation
/// anywhere: local state changes only after the server confirms.
#[derive(Default)]
pub struct MealPlanner {
    plans: Vec<MealPlan>,
    pub draft: PlanDraft,
}

impl MealPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, plans: Vec<MealPlan>) {
        self.plans = plans;
    }

    pub fn plans(&self) -> &[MealPlan] {
        &self.plans
    }

    /// Submit the draft: create when no plan is being edited, update
    /// otherwise. Missing required fields fail locally with a
    /// validation error and no request. On success the confirmed plan
    /// is merged into the list and the draft resets to Empty; on remote
    /// failure the draft stays Editing with its fields retained.
    pub async fn create_or_update(&mut self, api: &CatalogApi) -> Result<MealPlan, EngageError> {
        self.draft.validate()?;

        self.draft.state = DraftState::Submitting;
        let payload = self.draft.payload();
        let result = match &self.draft.edit_id {
            Some(id) => api.update_meal_plan(id, payload).await,
            None => api.create_meal_plan(payload).await,
        };

        match result {
            Ok(plan) => {
                match self.plans.iter_mut().find(|p| p.id == plan.id) {
                    Some(existing) => *existing = plan.clone(),
                    None => self.plans.push(plan.clone()),
                }
                self.draft.clear();
                Ok(plan)
            }
            Err(e) => {
                self.draft.state = DraftState::Editing;
                Err(e)
            }
        }
    }

    /// Delete a plan. Deletion requires explicit confirmation; an
    /// unconfirmed call is a local no-op and returns false. The plan
    /// leaves the local list only after the server confirms.
    pub async fn delete(
        &mut self,
        api: &CatalogApi,
        plan_id: &str,
        confirmed: bool,
    ) -> Result<bool, EngageError> {
        if !confirmed {
            return Ok(false);
        }

        api.delete_meal_plan(plan_id).await?;
        self.plans.retain(|p| p.id != plan_id);
        Ok(true)
    }
}
