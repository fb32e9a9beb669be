//! Pantry bookkeeping rules, kept free of I/O.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::ingredient::UserIngredientRow;

pub const DEFAULT_QUANTITY: f64 = 1.0;
pub const DEFAULT_UNIT: &str = "개";
pub const DEFAULT_CATEGORY: &str = "기타";
pub const DEFAULT_EXPIRY_WINDOW_DAYS: u32 = 7;

/// Body of `POST /api/ingredients`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewIngredient {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub category: Option<String>,
}

/// A validated ingredient ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientDraft {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub expiry_date: Option<NaiveDate>,
    pub category: String,
}

impl NewIngredient {
    /// Requires a name and fills the remaining defaults.
    pub fn into_draft(self) -> Result<IngredientDraft, AppError> {
        let name = non_blank(self.name)
            .ok_or_else(|| AppError::Validation("Ingredient name is required".to_string()))?;
        let quantity = match self.quantity {
            Some(q) if q > 0.0 => q,
            Some(_) => {
                return Err(AppError::Validation(
                    "quantity must be greater than zero".to_string(),
                ))
            }
            None => DEFAULT_QUANTITY,
        };

        Ok(IngredientDraft {
            name,
            quantity,
            unit: non_blank(self.unit).unwrap_or_else(|| DEFAULT_UNIT.to_string()),
            expiry_date: self.expiry_date,
            category: non_blank(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Quantity left after using `used`. Never negative; `0.0` means the row is removed.
pub fn remaining_quantity(current: f64, used: f64) -> f64 {
    (current - used).max(0.0)
}

/// Last expiry date included in the "expiring soon" window.
pub fn expiry_cutoff(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Total quantity per category, ignoring units.
pub fn category_totals(ingredients: &[UserIngredientRow]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for ingredient in ingredients {
        *totals.entry(ingredient.category.clone()).or_insert(0.0) += ingredient.quantity;
    }
    totals
}
