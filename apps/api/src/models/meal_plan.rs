use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::planner::plan::WeeklyPlan;

/// A stored weekly plan. One row per (user_id, week_start_date).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WeeklyMealPlanRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub week_start_date: NaiveDate,
    pub recipes: Json<WeeklyPlan>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SharedMealPlanRow {
    pub share_token: String,
    pub user_id: Uuid,
    pub week_start_date: NaiveDate,
    pub shared_with: Vec<String>,
    pub created_at: DateTime<Utc>,
}
