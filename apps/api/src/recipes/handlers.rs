use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{AuthUser, MaybeAuthUser};
use crate::errors::AppError;
use crate::extract::JsonOrDefault;
use crate::meal_plans::store::{latest_plan, upsert_plan};
use crate::meal_plans::week_start_for;
use crate::models::meal_plan::WeeklyMealPlanRow;
use crate::models::recipe::Recipe;
use crate::planner::alternates::RandomPicker;
use crate::planner::generator::generate_weekly_plan;
use crate::planner::plan::WeeklyPlan;
use crate::planner::UserConstraints;
use crate::profile::store::find_profile;
use crate::recipes::favorites::{add_favorite, favorite_recipe_ids};
use crate::recipes::search::SearchFilters;
use crate::routes::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct WeeklyRecommendationRequest {
    #[serde(default, alias = "availableIngredients")]
    pub available_ingredients: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

#[derive(Serialize)]
pub struct WeeklyRecommendationResponse {
    pub message: &'static str,
    pub week_start_date: NaiveDate,
    pub recipes: WeeklyPlan,
}

#[derive(Serialize)]
pub struct LatestPlanResponse {
    pub meal_plan: WeeklyMealPlanRow,
}

#[derive(Serialize)]
pub struct RecipeListResponse {
    pub recipes: Vec<Recipe>,
}

#[derive(Serialize)]
pub struct RecipeResponse {
    pub recipe: Recipe,
}

#[derive(Deserialize)]
pub struct FavoriteRequest {
    #[serde(alias = "recipeId")]
    pub recipe_id: i64,
}

#[derive(Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Recipe>,
}

/// Profile preferences first, then request preferences; duplicates are dropped
/// by `UserConstraints::new`.
fn merge_preferences(profile: Vec<String>, request: Vec<String>) -> Vec<String> {
    profile.into_iter().chain(request).collect()
}

/// POST /api/recipes/weekly-recommendation
pub async fn handle_weekly_recommendation(
    State(state): State<AppState>,
    user: AuthUser,
    JsonOrDefault(req): JsonOrDefault<WeeklyRecommendationRequest>,
) -> Result<Json<WeeklyRecommendationResponse>, AppError> {
    let profile = find_profile(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))?;

    let constraints = UserConstraints::new(
        profile.allergies,
        merge_preferences(profile.preferences, req.preferences),
        req.available_ingredients,
    );

    let catalog = state.catalog.all().await?;
    let mut picker = RandomPicker::from_entropy();
    let plan = generate_weekly_plan(&catalog, &constraints, &mut picker, state.llm.as_deref())
        .await?;

    let week_start_date = week_start_for(Utc::now().date_naive());
    match upsert_plan(&state.db, user.id, week_start_date, &plan).await {
        Ok(_) => info!("Stored weekly plan for week {week_start_date}"),
        Err(e) => warn!("Failed to store weekly plan for week {week_start_date}: {e}"),
    }

    Ok(Json(WeeklyRecommendationResponse {
        message: "Weekly recipes generated successfully",
        week_start_date,
        recipes: plan,
    }))
}

/// GET /api/recipes/weekly-plan
pub async fn handle_latest_plan(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<LatestPlanResponse>, AppError> {
    let meal_plan = latest_plan(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("No meal plan found".to_string()))?;
    Ok(Json(LatestPlanResponse { meal_plan }))
}

/// GET /api/recipes/search
pub async fn handle_search(
    State(state): State<AppState>,
    _user: MaybeAuthUser,
    Query(filters): Query<SearchFilters>,
) -> Result<Json<RecipeListResponse>, AppError> {
    let recipes = state.catalog.search(&filters).await?;
    Ok(Json(RecipeListResponse { recipes }))
}

/// GET /api/recipes/:recipe_id
pub async fn handle_get_recipe(
    State(state): State<AppState>,
    _user: MaybeAuthUser,
    Path(recipe_id): Path<i64>,
) -> Result<Json<RecipeResponse>, AppError> {
    let recipe = state
        .catalog
        .find(recipe_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_string()))?;
    Ok(Json(RecipeResponse { recipe }))
}

/// POST /api/recipes/favorite
pub async fn handle_add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<FavoriteRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if state.catalog.find(req.recipe_id).await?.is_none() {
        return Err(AppError::NotFound("Recipe not found".to_string()));
    }
    add_favorite(&state.db, user.id, req.recipe_id).await?;
    Ok(Json(MessageResponse::new("Recipe added to favorites")))
}

/// GET /api/recipes/favorites
pub async fn handle_list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<FavoritesResponse>, AppError> {
    let ids = favorite_recipe_ids(&state.db, user.id).await?;
    let mut favorites = Vec::with_capacity(ids.len());
    for id in ids {
        // recipes removed from the catalog drop out silently
        if let Some(recipe) = state.catalog.find(id).await? {
            favorites.push(recipe);
        }
    }
    Ok(Json(FavoritesResponse { favorites }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_profile_first() {
        let merged = merge_preferences(
            vec!["한식".to_string()],
            vec!["양식".to_string(), "한식".to_string()],
        );
        let constraints = UserConstraints::new(vec![], merged, vec![]);
        assert_eq!(constraints.preferences(), ["한식", "양식"]);
    }

    #[test]
    fn test_request_accepts_camel_case_ingredients() {
        let req: WeeklyRecommendationRequest =
            serde_json::from_str(r#"{"availableIngredients": ["두부"]}"#).unwrap();
        assert_eq!(req.available_ingredients, vec!["두부"]);
        assert!(req.preferences.is_empty());
    }
}
