use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::meal_plan::{SharedMealPlanRow, WeeklyMealPlanRow};
use crate::planner::plan::WeeklyPlan;

const PLAN_COLUMNS: &str =
    "SELECT id, user_id, week_start_date, recipes, notes, created_at, updated_at FROM weekly_meal_plans";

pub async fn list_plans(pool: &PgPool, user_id: Uuid) -> Result<Vec<WeeklyMealPlanRow>, sqlx::Error> {
    sqlx::query_as::<_, WeeklyMealPlanRow>(&format!(
        "{PLAN_COLUMNS} WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn latest_plan(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<WeeklyMealPlanRow>, sqlx::Error> {
    sqlx::query_as::<_, WeeklyMealPlanRow>(&format!(
        "{PLAN_COLUMNS} WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_plan(
    pool: &PgPool,
    user_id: Uuid,
    week_start_date: NaiveDate,
) -> Result<Option<WeeklyMealPlanRow>, sqlx::Error> {
    sqlx::query_as::<_, WeeklyMealPlanRow>(&format!(
        "{PLAN_COLUMNS} WHERE user_id = $1 AND week_start_date = $2"
    ))
    .bind(user_id)
    .bind(week_start_date)
    .fetch_optional(pool)
    .await
}

/// Inserts the week's plan, replacing any plan already stored for that week.
pub async fn upsert_plan(
    pool: &PgPool,
    user_id: Uuid,
    week_start_date: NaiveDate,
    plan: &WeeklyPlan,
) -> Result<WeeklyMealPlanRow, sqlx::Error> {
    sqlx::query_as::<_, WeeklyMealPlanRow>(
        r#"
        INSERT INTO weekly_meal_plans (user_id, week_start_date, recipes)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, week_start_date)
        DO UPDATE SET recipes = EXCLUDED.recipes, updated_at = NOW()
        RETURNING id, user_id, week_start_date, recipes, notes, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(week_start_date)
    .bind(Json(plan))
    .fetch_one(pool)
    .await
}

/// Replaces the plan body and notes. `None` when no plan exists for that week.
pub async fn update_plan(
    pool: &PgPool,
    user_id: Uuid,
    week_start_date: NaiveDate,
    plan: &WeeklyPlan,
    notes: Option<&str>,
) -> Result<Option<WeeklyMealPlanRow>, sqlx::Error> {
    sqlx::query_as::<_, WeeklyMealPlanRow>(
        r#"
        UPDATE weekly_meal_plans
        SET recipes = $3, notes = $4, updated_at = NOW()
        WHERE user_id = $1 AND week_start_date = $2
        RETURNING id, user_id, week_start_date, recipes, notes, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(week_start_date)
    .bind(Json(plan))
    .bind(notes)
    .fetch_optional(pool)
    .await
}

pub async fn insert_share(
    pool: &PgPool,
    share_token: &str,
    user_id: Uuid,
    week_start_date: NaiveDate,
    shared_with: &[String],
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO shared_meal_plans (share_token, user_id, week_start_date, shared_with) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(share_token)
    .bind(user_id)
    .bind(week_start_date)
    .bind(shared_with)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_share(
    pool: &PgPool,
    share_token: &str,
) -> Result<Option<SharedMealPlanRow>, sqlx::Error> {
    sqlx::query_as::<_, SharedMealPlanRow>(
        "SELECT share_token, user_id, week_start_date, shared_with, created_at \
         FROM shared_meal_plans WHERE share_token = $1",
    )
    .bind(share_token)
    .fetch_optional(pool)
    .await
}
