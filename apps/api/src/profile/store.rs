use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::UserProfileRow;

pub async fn find_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<UserProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, UserProfileRow>(
        "SELECT user_id, name, allergies, preferences, created_at, updated_at \
         FROM user_profiles WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Updates only the fields that are `Some`. Returns whether a profile row existed.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    name: Option<&str>,
    allergies: Option<&[String]>,
    preferences: Option<&[String]>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE user_profiles
        SET name = COALESCE($2, name),
            allergies = COALESCE($3, allergies),
            preferences = COALESCE($4, preferences),
            updated_at = NOW()
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(allergies)
    .bind(preferences)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
