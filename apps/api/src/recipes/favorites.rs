use sqlx::PgPool;
use uuid::Uuid;

/// Idempotent: favoriting the same recipe twice keeps one row.
pub async fn add_favorite(pool: &PgPool, user_id: Uuid, recipe_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO user_favorites (user_id, recipe_id) VALUES ($1, $2) \
         ON CONFLICT (user_id, recipe_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(recipe_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Favorited recipe ids, most recent first.
pub async fn favorite_recipe_ids(pool: &PgPool, user_id: Uuid) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT recipe_id FROM user_favorites WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
