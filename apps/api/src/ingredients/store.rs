use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::ingredients::inventory::IngredientDraft;
use crate::models::ingredient::UserIngredientRow;

const INGREDIENT_COLUMNS: &str =
    "id, user_id, name, quantity, unit, expiry_date, category, created_at, updated_at";

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Default)]
pub struct IngredientPatch<'a> {
    pub name: Option<&'a str>,
    pub quantity: Option<f64>,
    pub unit: Option<&'a str>,
    pub expiry_date: Option<NaiveDate>,
    pub category: Option<&'a str>,
}

pub async fn list_ingredients(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<UserIngredientRow>, sqlx::Error> {
    sqlx::query_as::<_, UserIngredientRow>(&format!(
        "SELECT {INGREDIENT_COLUMNS} FROM user_ingredients WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_ingredient(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<UserIngredientRow>, sqlx::Error> {
    sqlx::query_as::<_, UserIngredientRow>(&format!(
        "SELECT {INGREDIENT_COLUMNS} FROM user_ingredients WHERE id = $1 AND user_id = $2"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_ingredient(
    pool: &PgPool,
    user_id: Uuid,
    draft: &IngredientDraft,
) -> Result<UserIngredientRow, sqlx::Error> {
    sqlx::query_as::<_, UserIngredientRow>(&format!(
        "INSERT INTO user_ingredients (user_id, name, quantity, unit, expiry_date, category) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING {INGREDIENT_COLUMNS}"
    ))
    .bind(user_id)
    .bind(&draft.name)
    .bind(draft.quantity)
    .bind(&draft.unit)
    .bind(draft.expiry_date)
    .bind(&draft.category)
    .fetch_one(pool)
    .await
}

pub async fn update_ingredient(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    patch: &IngredientPatch<'_>,
) -> Result<Option<UserIngredientRow>, sqlx::Error> {
    sqlx::query_as::<_, UserIngredientRow>(&format!(
        r#"
        UPDATE user_ingredients
        SET name = COALESCE($3, name),
            quantity = COALESCE($4, quantity),
            unit = COALESCE($5, unit),
            expiry_date = COALESCE($6, expiry_date),
            category = COALESCE($7, category),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING {INGREDIENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(patch.name)
    .bind(patch.quantity)
    .bind(patch.unit)
    .bind(patch.expiry_date)
    .bind(patch.category)
    .fetch_optional(pool)
    .await
}

/// Returns whether a row was deleted.
pub async fn delete_ingredient(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM user_ingredients WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Ingredients with an expiry date on or before `cutoff`, soonest first.
pub async fn list_expiring(
    pool: &PgPool,
    user_id: Uuid,
    cutoff: NaiveDate,
) -> Result<Vec<UserIngredientRow>, sqlx::Error> {
    sqlx::query_as::<_, UserIngredientRow>(&format!(
        "SELECT {INGREDIENT_COLUMNS} FROM user_ingredients \
         WHERE user_id = $1 AND expiry_date IS NOT NULL AND expiry_date <= $2 \
         ORDER BY expiry_date ASC"
    ))
    .bind(user_id)
    .bind(cutoff)
    .fetch_all(pool)
    .await
}
