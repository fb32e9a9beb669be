use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::profile::store::{find_profile, update_profile};
use crate::routes::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub allergies: Vec<String>,
    pub preferences: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: CurrentUser,
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub preferences: Option<Vec<String>>,
}

/// GET /api/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<CurrentUserResponse>, AppError> {
    let profile = find_profile(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(CurrentUserResponse {
        user: CurrentUser {
            id: user.id,
            email: user.email,
            name: profile.name,
            allergies: profile.allergies,
            preferences: profile.preferences,
        },
    }))
}

/// PUT /api/auth/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<ProfileUpdate>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Validation("name must not be blank".to_string()));
    }

    let updated = update_profile(
        &state.db,
        user.id,
        req.name.as_deref().map(str::trim),
        req.allergies.as_deref(),
        req.preferences.as_deref(),
    )
    .await?;

    if !updated {
        return Err(AppError::NotFound("Profile not found".to_string()));
    }
    Ok(Json(MessageResponse::new("Profile updated successfully")))
}
