use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::JsonOrDefault;
use crate::meal_plans::store::{
    find_plan, find_share, insert_share, list_plans, update_plan,
};
use crate::meal_plans::{generate_share_token, share_url};
use crate::models::meal_plan::WeeklyMealPlanRow;
use crate::planner::nutrition::{aggregate, NutritionReport};
use crate::planner::plan::{Day, MealType, WeeklyPlan};
use crate::state::AppState;

#[derive(Serialize)]
pub struct MealPlanListResponse {
    pub meal_plans: Vec<WeeklyMealPlanRow>,
}

#[derive(Serialize)]
pub struct MealPlanResponse {
    pub meal_plan: WeeklyMealPlanRow,
}

#[derive(Serialize)]
pub struct MealPlanUpdatedResponse {
    pub message: &'static str,
    pub meal_plan: WeeklyMealPlanRow,
}

#[derive(Deserialize)]
pub struct MealPlanUpdate {
    pub recipes: WeeklyPlan,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ConfirmRequest {
    pub day: Day,
    #[serde(alias = "mealType")]
    pub meal_type: MealType,
    #[serde(alias = "recipeId")]
    pub recipe_id: i64,
    pub confirmed: bool,
}

#[derive(Serialize)]
pub struct NutritionResponse {
    pub nutrition_report: NutritionReport,
    pub week_start_date: NaiveDate,
}

#[derive(Deserialize, Default)]
pub struct ShareRequest {
    #[serde(default, alias = "shareWith")]
    pub share_with: Vec<String>,
}

#[derive(Serialize)]
pub struct ShareResponse {
    pub message: &'static str,
    pub share_url: String,
}

#[derive(Serialize)]
pub struct SharedMealPlan {
    pub share_token: String,
    pub week_start_date: NaiveDate,
    pub shared_with: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// `None` if the owner has since deleted the underlying plan.
    pub meal_plan: Option<WeeklyMealPlanRow>,
}

#[derive(Serialize)]
pub struct SharedMealPlanResponse {
    pub shared_meal_plan: SharedMealPlan,
}

async fn load_plan(
    state: &AppState,
    user: &AuthUser,
    week_start_date: NaiveDate,
) -> Result<WeeklyMealPlanRow, AppError> {
    find_plan(&state.db, user.id, week_start_date)
        .await?
        .ok_or_else(|| AppError::NotFound("Meal plan not found".to_string()))
}

/// GET /api/meal-plans
pub async fn handle_list_plans(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<MealPlanListResponse>, AppError> {
    let meal_plans = list_plans(&state.db, user.id).await?;
    Ok(Json(MealPlanListResponse { meal_plans }))
}

/// GET /api/meal-plans/:week_start_date
pub async fn handle_get_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(week_start_date): Path<NaiveDate>,
) -> Result<Json<MealPlanResponse>, AppError> {
    let meal_plan = load_plan(&state, &user, week_start_date).await?;
    Ok(Json(MealPlanResponse { meal_plan }))
}

/// PUT /api/meal-plans/:week_start_date
pub async fn handle_update_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(week_start_date): Path<NaiveDate>,
    Json(req): Json<MealPlanUpdate>,
) -> Result<Json<MealPlanUpdatedResponse>, AppError> {
    let meal_plan = update_plan(
        &state.db,
        user.id,
        week_start_date,
        &req.recipes,
        req.notes.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Meal plan not found".to_string()))?;

    Ok(Json(MealPlanUpdatedResponse {
        message: "Meal plan updated successfully",
        meal_plan,
    }))
}

fn slot_not_found(day: Day, meal_type: MealType, recipe_id: i64) -> AppError {
    AppError::NotFound(format!("No {day} {meal_type} slot holds recipe {recipe_id}"))
}

/// POST /api/meal-plans/:week_start_date/confirm
pub async fn handle_confirm(
    State(state): State<AppState>,
    user: AuthUser,
    Path(week_start_date): Path<NaiveDate>,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<MealPlanUpdatedResponse>, AppError> {
    let current = load_plan(&state, &user, week_start_date).await?;
    let mut plan = current.recipes.0;

    if !plan.set_confirmed(req.day, req.meal_type, req.recipe_id, req.confirmed) {
        return Err(slot_not_found(req.day, req.meal_type, req.recipe_id));
    }

    let meal_plan = update_plan(
        &state.db,
        user.id,
        week_start_date,
        &plan,
        current.notes.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Meal plan not found".to_string()))?;

    Ok(Json(MealPlanUpdatedResponse {
        message: "Recipe confirmation updated",
        meal_plan,
    }))
}

/// GET /api/meal-plans/:week_start_date/nutrition
pub async fn handle_nutrition(
    State(state): State<AppState>,
    user: AuthUser,
    Path(week_start_date): Path<NaiveDate>,
) -> Result<Json<NutritionResponse>, AppError> {
    let row = load_plan(&state, &user, week_start_date).await?;
    Ok(Json(NutritionResponse {
        nutrition_report: aggregate(&row.recipes.0),
        week_start_date,
    }))
}

/// POST /api/meal-plans/:week_start_date/share
pub async fn handle_share(
    State(state): State<AppState>,
    user: AuthUser,
    Path(week_start_date): Path<NaiveDate>,
    JsonOrDefault(req): JsonOrDefault<ShareRequest>,
) -> Result<Json<ShareResponse>, AppError> {
    load_plan(&state, &user, week_start_date).await?;

    let token = generate_share_token(&mut rand::thread_rng());
    insert_share(&state.db, &token, user.id, week_start_date, &req.share_with).await?;
    info!("Shared meal plan for week {week_start_date}");

    Ok(Json(ShareResponse {
        message: "Meal plan shared successfully",
        share_url: share_url(&state.config.frontend_url, &token),
    }))
}

/// GET /api/meal-plans/shared/:share_token
pub async fn handle_get_shared(
    State(state): State<AppState>,
    Path(share_token): Path<String>,
) -> Result<Json<SharedMealPlanResponse>, AppError> {
    let share = find_share(&state.db, &share_token)
        .await?
        .ok_or_else(|| AppError::NotFound("Shared meal plan not found".to_string()))?;

    let meal_plan = find_plan(&state.db, share.user_id, share.week_start_date).await?;

    Ok(Json(SharedMealPlanResponse {
        shared_meal_plan: SharedMealPlan {
            share_token: share.share_token,
            week_start_date: share.week_start_date,
            shared_with: share.shared_with,
            created_at: share.created_at,
            meal_plan,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_not_found_uses_korean_labels() {
        let err = slot_not_found(Day::Monday, MealType::Breakfast, 7);
        assert_eq!(err.to_string(), "Not found: No 월요일 아침 slot holds recipe 7");
    }

    #[test]
    fn test_confirm_request_accepts_camel_case() {
        let req: ConfirmRequest = serde_json::from_str(
            r#"{"day":"금요일","mealType":"저녁","recipeId":3,"confirmed":true}"#,
        )
        .unwrap();
        assert_eq!(req.day, Day::Friday);
        assert_eq!(req.meal_type, MealType::Dinner);
        assert_eq!(req.recipe_id, 3);
        assert!(req.confirmed);
    }
}
