//! Recipe Selector: drops recipes that hit an allergy, keeps those matching a preference.

use crate::models::recipe::Recipe;

/// Filters the catalog by allergy exclusion and preference inclusion.
///
/// - Allergy: excluded when any ingredient contains an allergy term, or an allergy
///   term contains the ingredient (case-insensitive substring, both directions).
///   "peanut" therefore also rules out "peanut oil".
/// - Preference: with at least one preference, only recipes whose category or title
///   contains a preference term survive. No preferences keeps every safe recipe.
///
/// Never fails; an empty result is handled by the scheduler.
pub fn select(catalog: &[Recipe], allergies: &[String], preferences: &[String]) -> Vec<Recipe> {
    let allergies: Vec<String> = allergies.iter().map(|a| a.to_lowercase()).collect();
    let preferences: Vec<String> = preferences.iter().map(|p| p.to_lowercase()).collect();

    catalog
        .iter()
        .filter(|recipe| !has_allergen(recipe, &allergies))
        .filter(|recipe| preferences.is_empty() || matches_preference(recipe, &preferences))
        .cloned()
        .collect()
}

fn has_allergen(recipe: &Recipe, allergies_lower: &[String]) -> bool {
    recipe.ingredients.iter().any(|ingredient| {
        let ingredient = ingredient.to_lowercase();
        allergies_lower
            .iter()
            .any(|allergy| ingredient.contains(allergy.as_str()) || allergy.contains(&ingredient))
    })
}

fn matches_preference(recipe: &Recipe, preferences_lower: &[String]) -> bool {
    let category = recipe.category.to_lowercase();
    let title = recipe.title.to_lowercase();
    preferences_lower
        .iter()
        .any(|pref| category.contains(pref.as_str()) || title.contains(pref.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::test_support::{recipe, strings};
    use crate::recipes::sample::sample_recipes;

    fn titles(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_no_constraints_keeps_whole_catalog_in_order() {
        let selected = select(&sample_recipes(), &[], &[]);
        assert_eq!(selected.len(), 5);
        assert_eq!(selected, sample_recipes());
    }

    #[test]
    fn test_egg_allergy_leaves_two_sample_recipes() {
        let selected = select(&sample_recipes(), &strings(&["계란"]), &[]);
        assert_eq!(titles(&selected), vec!["된장찌개", "샐러드"]);
    }

    #[test]
    fn test_allergy_term_inside_ingredient_excludes() {
        let catalog = vec![
            recipe(1, "Satay", "Thai", &["Peanut Oil", "chicken"]),
            recipe(2, "Toast", "Breakfast", &["bread"]),
        ];
        let selected = select(&catalog, &strings(&["peanut"]), &[]);
        assert_eq!(titles(&selected), vec!["Toast"]);
    }

    #[test]
    fn test_ingredient_inside_allergy_term_excludes() {
        // "milk" is contained in the allergy term "milk powder"
        let catalog = vec![
            recipe(1, "Latte", "Drink", &["milk", "espresso"]),
            recipe(2, "Tea", "Drink", &["water", "leaves"]),
        ];
        let selected = select(&catalog, &strings(&["Milk Powder"]), &[]);
        assert_eq!(titles(&selected), vec!["Tea"]);
    }

    #[test]
    fn test_preferences_match_category_or_title() {
        let selected = select(&sample_recipes(), &[], &strings(&["양식"]));
        assert_eq!(titles(&selected), vec!["스파게티 카르보나라", "샐러드"]);

        let selected = select(&sample_recipes(), &[], &strings(&["찌개"]));
        assert_eq!(titles(&selected), vec!["된장찌개"]);
    }

    #[test]
    fn test_preference_matching_is_one_directional() {
        // The field must contain the preference; a preference containing the
        // category does not count.
        let catalog = vec![recipe(1, "Soup", "Kor", &["water"])];
        assert!(select(&catalog, &[], &strings(&["Korean"])).is_empty());
        assert_eq!(select(&catalog, &[], &strings(&["kor"])).len(), 1);
    }

    #[test]
    fn test_every_selected_recipe_is_safe_and_preferred() {
        let allergies = strings(&["대파"]);
        let preferences = strings(&["한식", "샐러드"]);
        let selected = select(&sample_recipes(), &allergies, &preferences);

        assert_eq!(titles(&selected), vec!["샐러드"]);
        for recipe in &selected {
            assert!(!recipe.ingredients.iter().any(|i| i.contains("대파")));
            assert!(preferences
                .iter()
                .any(|p| recipe.category.contains(p.as_str()) || recipe.title.contains(p.as_str())));
        }
    }

    #[test]
    fn test_everything_filtered_returns_empty() {
        let selected = select(&sample_recipes(), &strings(&["계란", "대파", "오이"]), &[]);
        assert!(selected.is_empty());
    }
}
