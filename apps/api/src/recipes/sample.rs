//! Built-in sample catalog used when no `recipes` table is configured.

use crate::models::recipe::{Nutrition, Recipe};

fn sample(
    id: i64,
    title: &str,
    category: &str,
    difficulty: &str,
    cooking_time: u32,
    ingredients: &[&str],
    nutrition: [f64; 6],
) -> Recipe {
    let [calories, protein, carbs, fat, fiber, sodium] = nutrition;
    Recipe {
        id,
        title: title.to_string(),
        category: category.to_string(),
        difficulty: difficulty.to_string(),
        cooking_time,
        ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
        nutrition: Nutrition {
            calories,
            protein,
            carbs,
            fat,
            fiber,
            sodium,
        },
    }
}

/// Five everyday dishes, in catalog order.
pub fn sample_recipes() -> Vec<Recipe> {
    vec![
        sample(
            1,
            "김치볶음밥",
            "한식",
            "쉬움",
            15,
            &["김치", "밥", "계란", "대파", "참기름"],
            [350.0, 12.0, 45.0, 15.0, 3.0, 800.0],
        ),
        sample(
            2,
            "계란말이",
            "한식",
            "쉬움",
            10,
            &["계란", "대파", "당근", "소금"],
            [180.0, 15.0, 2.0, 12.0, 1.0, 400.0],
        ),
        sample(
            3,
            "된장찌개",
            "한식",
            "쉬움",
            20,
            &["된장", "두부", "애호박", "양파", "대파"],
            [250.0, 18.0, 15.0, 8.0, 5.0, 600.0],
        ),
        sample(
            4,
            "스파게티 카르보나라",
            "양식",
            "보통",
            25,
            &["스파게티", "계란", "파마산치즈", "베이컨", "후추"],
            [450.0, 20.0, 55.0, 18.0, 2.0, 500.0],
        ),
        sample(
            5,
            "샐러드",
            "양식",
            "쉬움",
            10,
            &["상추", "토마토", "오이", "올리브오일", "레몬즙"],
            [120.0, 3.0, 8.0, 10.0, 4.0, 200.0],
        ),
    ]
}
