use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserIngredientRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub expiry_date: Option<NaiveDate>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
