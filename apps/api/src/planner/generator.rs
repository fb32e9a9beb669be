//! Weekly plan generation: orchestrates the planner pipeline.
//!
//! Flow: validate catalog → select → prioritize → schedule → personalize (optional).
//! Invalid catalog records and empty selections reject the whole operation;
//! personalization failures never do.

use tracing::{info, warn};

use crate::llm_client::TextGenerator;
use crate::models::recipe::Recipe;
use crate::planner::alternates::AlternatePicker;
use crate::planner::personalization::{personalize, PersonalizationOutcome};
use crate::planner::plan::WeeklyPlan;
use crate::planner::prioritizer::prioritize;
use crate::planner::scheduler::schedule;
use crate::planner::selector::select;
use crate::planner::{PlanError, UserConstraints};

/// Runs the deterministic part of the pipeline (everything except personalization).
pub fn build_weekly_plan(
    catalog: &[Recipe],
    constraints: &UserConstraints,
    picker: &mut dyn AlternatePicker,
) -> Result<WeeklyPlan, PlanError> {
    validate_catalog(catalog)?;

    let selected = select(catalog, constraints.allergies(), constraints.preferences());
    info!(
        "Selected {} of {} recipes after allergy/preference filtering",
        selected.len(),
        catalog.len()
    );

    let ranked = prioritize(selected, constraints.available_ingredients());
    schedule(&ranked, picker)
}

/// Builds the plan and, when a generator is configured, personalizes it.
pub async fn generate_weekly_plan(
    catalog: &[Recipe],
    constraints: &UserConstraints,
    picker: &mut (dyn AlternatePicker + Send),
    generator: Option<&dyn TextGenerator>,
) -> Result<WeeklyPlan, PlanError> {
    let plan = build_weekly_plan(catalog, constraints, picker)?;

    let Some(generator) = generator else {
        return Ok(plan);
    };

    match personalize(plan, constraints.preferences(), generator).await {
        PersonalizationOutcome::Personalized(plan) => Ok(plan),
        PersonalizationOutcome::Fallback { plan, reason } => {
            warn!("Personalization skipped, returning unpersonalized plan: {reason}");
            Ok(plan)
        }
    }
}

/// Rejects catalog records missing a field the pipeline matches on.
fn validate_catalog(catalog: &[Recipe]) -> Result<(), PlanError> {
    for recipe in catalog {
        if recipe.title.trim().is_empty() {
            return Err(PlanError::InvalidInput(format!(
                "recipe {} is missing a title",
                recipe.id
            )));
        }
        if recipe.category.trim().is_empty() {
            return Err(PlanError::InvalidInput(format!(
                "recipe {} is missing a category",
                recipe.id
            )));
        }
    }
    Ok(())
}
