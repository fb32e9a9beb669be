use sqlx::PgPool;
use uuid::Uuid;

use crate::chat::HISTORY_LIMIT;
use crate::models::chat::ChatHistoryRow;

pub async fn insert_exchange(
    pool: &PgPool,
    user_id: Uuid,
    conversation_id: &str,
    user_message: &str,
    bot_response: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO chat_history (user_id, conversation_id, user_message, bot_response) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(conversation_id)
    .bind(user_message)
    .bind(bot_response)
    .execute(pool)
    .await?;
    Ok(())
}

/// Oldest first, optionally restricted to one conversation.
pub async fn list_history(
    pool: &PgPool,
    user_id: Uuid,
    conversation_id: Option<&str>,
) -> Result<Vec<ChatHistoryRow>, sqlx::Error> {
    sqlx::query_as::<_, ChatHistoryRow>(
        r#"
        SELECT id, user_id, conversation_id, user_message, bot_response, created_at
        FROM chat_history
        WHERE user_id = $1 AND ($2::TEXT IS NULL OR conversation_id = $2)
        ORDER BY created_at ASC
        LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(conversation_id)
    .bind(HISTORY_LIMIT)
    .fetch_all(pool)
    .await
}

pub async fn delete_conversation(
    pool: &PgPool,
    user_id: Uuid,
    conversation_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM chat_history WHERE user_id = $1 AND conversation_id = $2")
        .bind(user_id)
        .bind(conversation_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
