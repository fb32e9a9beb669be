use std::ops::AddAssign;

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Per-serving nutrition facts. Absent or null fields read as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub calories: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub protein: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fat: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fiber: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sodium: f64,
}

impl AddAssign<&Nutrition> for Nutrition {
    fn add_assign(&mut self, other: &Nutrition) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
        self.fiber += other.fiber;
        self.sodium += other.sodium;
    }
}

/// A catalog recipe. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub difficulty: String,
    /// Minutes.
    pub cooking_time: u32,
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nutrition: Nutrition,
}

#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub cooking_time: i32,
    pub ingredients: Vec<String>,
    pub nutrition: Option<Json<Nutrition>>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            title: row.title,
            category: row.category,
            difficulty: row.difficulty,
            cooking_time: u32::try_from(row.cooking_time).unwrap_or(0),
            ingredients: row.ingredients,
            nutrition: row.nutrition.map(|n| n.0).unwrap_or_default(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_nutrition_fields_read_as_zero() {
        let nutrition: Nutrition =
            serde_json::from_str(r#"{"calories": 200, "protein": null}"#).unwrap();
        assert_eq!(nutrition.calories, 200.0);
        assert_eq!(nutrition.protein, 0.0);
        assert_eq!(nutrition.sodium, 0.0);
    }

    #[test]
    fn test_recipe_without_nutrition_deserializes() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"id": 9, "title": "주먹밥", "category": "한식", "difficulty": "쉬움",
                "cooking_time": 5, "ingredients": ["밥", "김"], "nutrition": null}"#,
        )
        .unwrap();
        assert_eq!(recipe.nutrition, Nutrition::default());
    }

    #[test]
    fn test_negative_cooking_time_row_clamps_to_zero() {
        let row = RecipeRow {
            id: 1,
            title: "t".to_string(),
            category: "c".to_string(),
            difficulty: "d".to_string(),
            cooking_time: -5,
            ingredients: vec![],
            nutrition: None,
        };
        let recipe = Recipe::from(row);
        assert_eq!(recipe.cooking_time, 0);
        assert_eq!(recipe.nutrition, Nutrition::default());
    }

    #[test]
    fn test_nutrition_add_assign_sums_fieldwise() {
        let mut total = Nutrition::default();
        let meal = Nutrition {
            calories: 350.0,
            protein: 12.0,
            carbs: 45.0,
            fat: 15.0,
            fiber: 3.0,
            sodium: 800.0,
        };
        total += &meal;
        total += &meal;
        assert_eq!(total.calories, 700.0);
        assert_eq!(total.sodium, 1600.0);
    }
}
