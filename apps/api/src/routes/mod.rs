pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use serde::Serialize;

use crate::chat::handlers as chat;
use crate::ingredients::handlers as ingredients;
use crate::meal_plans::handlers as meal_plans;
use crate::profile::handlers as profile;
use crate::recipes::handlers as recipes;
use crate::state::AppState;

/// Body for endpoints that only acknowledge success.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile
        .route("/api/auth/me", get(profile::handle_me))
        .route("/api/auth/profile", put(profile::handle_update_profile))
        // Recipes
        .route(
            "/api/recipes/weekly-recommendation",
            post(recipes::handle_weekly_recommendation),
        )
        .route("/api/recipes/weekly-plan", get(recipes::handle_latest_plan))
        .route("/api/recipes/search", get(recipes::handle_search))
        .route("/api/recipes/favorite", post(recipes::handle_add_favorite))
        .route("/api/recipes/favorites", get(recipes::handle_list_favorites))
        .route("/api/recipes/:recipe_id", get(recipes::handle_get_recipe))
        // Meal plans
        .route("/api/meal-plans", get(meal_plans::handle_list_plans))
        .route(
            "/api/meal-plans/shared/:share_token",
            get(meal_plans::handle_get_shared),
        )
        .route(
            "/api/meal-plans/:week_start_date",
            get(meal_plans::handle_get_plan).put(meal_plans::handle_update_plan),
        )
        .route(
            "/api/meal-plans/:week_start_date/confirm",
            post(meal_plans::handle_confirm),
        )
        .route(
            "/api/meal-plans/:week_start_date/nutrition",
            get(meal_plans::handle_nutrition),
        )
        .route(
            "/api/meal-plans/:week_start_date/share",
            post(meal_plans::handle_share),
        )
        // Ingredients
        .route(
            "/api/ingredients",
            get(ingredients::handle_list).post(ingredients::handle_create),
        )
        .route("/api/ingredients/expiring", get(ingredients::handle_expiring))
        .route("/api/ingredients/stats", get(ingredients::handle_stats))
        .route(
            "/api/ingredients/:id",
            put(ingredients::handle_update).delete(ingredients::handle_delete),
        )
        .route("/api/ingredients/:id/use", post(ingredients::handle_use))
        // Chatbot
        .route("/api/chatbot/chat", post(chat::handle_chat))
        .route("/api/chatbot/history", get(chat::handle_history))
        .route(
            "/api/chatbot/history/:conversation_id",
            delete(chat::handle_delete_history),
        )
        .route(
            "/api/chatbot/recipe-question",
            post(chat::handle_recipe_question),
        )
        .with_state(state)
}
