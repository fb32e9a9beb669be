use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::{AuthUser, MaybeAuthUser};
use crate::chat::prompts::{
    chat_system_prompt, recipe_question_system_prompt, CHAT_MAX_TOKENS,
    RECIPE_QUESTION_MAX_TOKENS,
};
use crate::chat::store::{delete_conversation, insert_exchange, list_history};
use crate::chat::{ask, require_text, resolve_conversation_id};
use crate::errors::AppError;
use crate::models::chat::ChatHistoryRow;
use crate::profile::store::find_profile;
use crate::routes::MessageResponse;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    #[serde(alias = "conversationId")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: String,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    #[serde(alias = "conversationId")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub history: Vec<ChatHistoryRow>,
}

#[derive(Deserialize)]
pub struct RecipeQuestionRequest {
    pub question: Option<String>,
    #[serde(alias = "recipeId")]
    pub recipe_id: Option<i64>,
}

#[derive(Serialize)]
pub struct RecipeQuestionResponse {
    pub response: String,
    pub recipe_id: Option<i64>,
}

/// POST /api/chatbot/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = require_text(req.message.as_deref(), "Message is required")?;

    let profile = match &user {
        Some(u) => find_profile(&state.db, u.id).await?,
        None => None,
    };
    let system = chat_system_prompt(profile.as_ref());
    let response = ask(state.llm.as_deref(), &system, &message, CHAT_MAX_TOKENS).await?;

    let conversation_id = resolve_conversation_id(
        req.conversation_id.as_deref(),
        Utc::now().timestamp_millis(),
    );

    if let Some(u) = &user {
        if let Err(e) =
            insert_exchange(&state.db, u.id, &conversation_id, &message, &response).await
        {
            warn!("Failed to store chat history: {e}");
        }
    }

    Ok(Json(ChatResponse {
        response,
        conversation_id,
    }))
}

/// GET /api/chatbot/history
pub async fn handle_history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let conversation_id = params
        .conversation_id
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let history = list_history(&state.db, user.id, conversation_id).await?;
    Ok(Json(HistoryResponse { history }))
}

/// DELETE /api/chatbot/history/:conversation_id
pub async fn handle_delete_history(
    State(state): State<AppState>,
    user: AuthUser,
    Path(conversation_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    delete_conversation(&state.db, user.id, &conversation_id).await?;
    Ok(Json(MessageResponse::new("Chat history deleted successfully")))
}

/// POST /api/chatbot/recipe-question
pub async fn handle_recipe_question(
    State(state): State<AppState>,
    _user: MaybeAuthUser,
    Json(req): Json<RecipeQuestionRequest>,
) -> Result<Json<RecipeQuestionResponse>, AppError> {
    let question = require_text(req.question.as_deref(), "Question is required")?;

    let recipe = match req.recipe_id {
        Some(id) => state.catalog.find(id).await?,
        None => None,
    };
    let system = recipe_question_system_prompt(recipe.as_ref());
    let response = ask(
        state.llm.as_deref(),
        &system,
        &question,
        RECIPE_QUESTION_MAX_TOKENS,
    )
    .await?;

    Ok(Json(RecipeQuestionResponse {
        response,
        recipe_id: req.recipe_id,
    }))
}
