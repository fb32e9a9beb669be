use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::JsonOrDefault;
use crate::ingredients::inventory::{
    category_totals, expiry_cutoff, remaining_quantity, NewIngredient,
    DEFAULT_EXPIRY_WINDOW_DAYS,
};
use crate::ingredients::store::{
    delete_ingredient, find_ingredient, insert_ingredient, list_expiring, list_ingredients,
    update_ingredient, IngredientPatch,
};
use crate::models::ingredient::UserIngredientRow;
use crate::routes::MessageResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct IngredientListResponse {
    pub ingredients: Vec<UserIngredientRow>,
}

#[derive(Serialize)]
pub struct IngredientResponse {
    pub message: &'static str,
    pub ingredient: UserIngredientRow,
}

#[derive(Deserialize)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct UseRequest {
    #[serde(default = "default_used_quantity", alias = "usedQuantity")]
    pub used_quantity: f64,
}

impl Default for UseRequest {
    fn default() -> Self {
        Self {
            used_quantity: default_used_quantity(),
        }
    }
}

fn default_used_quantity() -> f64 {
    1.0
}

/// Either the updated row, or only a message when the ingredient was used up.
#[derive(Serialize)]
pub struct UseResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<UserIngredientRow>,
}

#[derive(Deserialize)]
pub struct ExpiringQuery {
    pub days: Option<u32>,
}

#[derive(Serialize)]
pub struct ExpiringResponse {
    pub expiring_ingredients: Vec<UserIngredientRow>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub category_stats: BTreeMap<String, f64>,
}

fn not_found() -> AppError {
    AppError::NotFound("Ingredient not found".to_string())
}

/// GET /api/ingredients
pub async fn handle_list(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<IngredientListResponse>, AppError> {
    let ingredients = list_ingredients(&state.db, user.id).await?;
    Ok(Json(IngredientListResponse { ingredients }))
}

/// POST /api/ingredients
pub async fn handle_create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<NewIngredient>,
) -> Result<(StatusCode, Json<IngredientResponse>), AppError> {
    let draft = req.into_draft()?;
    let ingredient = insert_ingredient(&state.db, user.id, &draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(IngredientResponse {
            message: "Ingredient added successfully",
            ingredient,
        }),
    ))
}

/// PUT /api/ingredients/:id
pub async fn handle_update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<IngredientUpdate>,
) -> Result<Json<IngredientResponse>, AppError> {
    if req.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Validation("Ingredient name must not be blank".to_string()));
    }
    if req.quantity.is_some_and(|q| q < 0.0) {
        return Err(AppError::Validation("quantity must not be negative".to_string()));
    }

    let patch = IngredientPatch {
        name: req.name.as_deref().map(str::trim),
        quantity: req.quantity,
        unit: req.unit.as_deref(),
        expiry_date: req.expiry_date,
        category: req.category.as_deref(),
    };
    let ingredient = update_ingredient(&state.db, user.id, id, &patch)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(IngredientResponse {
        message: "Ingredient updated successfully",
        ingredient,
    }))
}

/// DELETE /api/ingredients/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !delete_ingredient(&state.db, user.id, id).await? {
        return Err(not_found());
    }
    Ok(Json(MessageResponse::new("Ingredient deleted successfully")))
}

/// POST /api/ingredients/:id/use
pub async fn handle_use(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    JsonOrDefault(req): JsonOrDefault<UseRequest>,
) -> Result<Json<UseResponse>, AppError> {
    if req.used_quantity <= 0.0 {
        return Err(AppError::Validation(
            "used_quantity must be greater than zero".to_string(),
        ));
    }

    let current = find_ingredient(&state.db, user.id, id)
        .await?
        .ok_or_else(not_found)?;
    let remaining = remaining_quantity(current.quantity, req.used_quantity);

    if remaining <= 0.0 {
        delete_ingredient(&state.db, user.id, id).await?;
        info!("Ingredient {id} used up and removed");
        return Ok(Json(UseResponse {
            message: "Ingredient used up and removed",
            ingredient: None,
        }));
    }

    let patch = IngredientPatch {
        quantity: Some(remaining),
        ..Default::default()
    };
    let ingredient = update_ingredient(&state.db, user.id, id, &patch)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(UseResponse {
        message: "Ingredient quantity updated",
        ingredient: Some(ingredient),
    }))
}

/// GET /api/ingredients/expiring?days=7
pub async fn handle_expiring(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ExpiringQuery>,
) -> Result<Json<ExpiringResponse>, AppError> {
    let days = params.days.unwrap_or(DEFAULT_EXPIRY_WINDOW_DAYS);
    let cutoff = expiry_cutoff(Utc::now().date_naive(), days);
    let expiring_ingredients = list_expiring(&state.db, user.id, cutoff).await?;
    Ok(Json(ExpiringResponse {
        expiring_ingredients,
    }))
}

/// GET /api/ingredients/stats
pub async fn handle_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<StatsResponse>, AppError> {
    let ingredients = list_ingredients(&state.db, user.id).await?;
    Ok(Json(StatsResponse {
        category_stats: category_totals(&ingredients),
    }))
}
