//! Ingredient Prioritizer: ranks recipes by the share of ingredients the user already owns.
//!
//! Reorders only; every recipe passed in comes back out.

use crate::models::recipe::Recipe;
use crate::planner::plan::ScoredRecipe;

/// Scores each recipe and sorts descending by match ratio.
///
/// An ingredient matches when it and any available name contain one another
/// (case-insensitive). Recipes with no ingredients score 0.0. The sort is
/// stable, so ties keep their input order.
pub fn prioritize(recipes: Vec<Recipe>, available: &[String]) -> Vec<ScoredRecipe> {
    let available: Vec<String> = available.iter().map(|a| a.to_lowercase()).collect();

    let mut scored: Vec<ScoredRecipe> = recipes
        .into_iter()
        .map(|recipe| score_recipe(recipe, &available))
        .collect();

    scored.sort_by(|a, b| {
        b.match_ratio
            .partial_cmp(&a.match_ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    scored
}

fn score_recipe(recipe: Recipe, available_lower: &[String]) -> ScoredRecipe {
    let matching_ingredients: Vec<String> = recipe
        .ingredients
        .iter()
        .filter(|ingredient| {
            let ingredient = ingredient.to_lowercase();
            available_lower
                .iter()
                .any(|owned| owned.contains(&ingredient) || ingredient.contains(owned.as_str()))
        })
        .cloned()
        .collect();

    let match_ratio = if recipe.ingredients.is_empty() {
        0.0
    } else {
        matching_ingredients.len() as f64 / recipe.ingredients.len() as f64
    };

    ScoredRecipe {
        recipe,
        match_ratio,
        matching_ingredients,
    }
}
