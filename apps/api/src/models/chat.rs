use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatHistoryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub conversation_id: String,
    pub user_message: String,
    pub bot_response: String,
    pub created_at: DateTime<Utc>,
}
