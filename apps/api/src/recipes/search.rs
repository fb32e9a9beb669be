use serde::Deserialize;

use crate::models::recipe::Recipe;

/// Maximum number of results a search returns.
pub const SEARCH_LIMIT: usize = 20;

/// Query-string filters for `GET /api/recipes/search`. All optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilters {
    /// Matches title or any ingredient (case-insensitive substring).
    pub query: Option<String>,
    /// Exact category tag.
    pub category: Option<String>,
    /// Exact difficulty tag.
    pub difficulty: Option<String>,
    /// Upper bound on cooking time in minutes.
    #[serde(alias = "maxTime")]
    pub max_time: Option<u32>,
}

/// In-memory search over a recipe list.
pub fn search_recipes(recipes: &[Recipe], filters: &SearchFilters) -> Vec<Recipe> {
    let query = filters
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    recipes
        .iter()
        .filter(|r| match &query {
            Some(q) => {
                r.title.to_lowercase().contains(q.as_str())
                    || r.ingredients
                        .iter()
                        .any(|i| i.to_lowercase().contains(q.as_str()))
            }
            None => true,
        })
        .filter(|r| filters.category.as_ref().map_or(true, |c| &r.category == c))
        .filter(|r| filters.difficulty.as_ref().map_or(true, |d| &r.difficulty == d))
        .filter(|r| filters.max_time.map_or(true, |t| r.cooking_time <= t))
        .take(SEARCH_LIMIT)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::sample::sample_recipes;

    fn titles(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_no_filters_returns_everything() {
        assert_eq!(search_recipes(&sample_recipes(), &SearchFilters::default()).len(), 5);
    }

    #[test]
    fn test_query_matches_title_or_ingredient() {
        let filters = SearchFilters {
            query: Some("계란".to_string()),
            ..Default::default()
        };
        assert_eq!(
            titles(&search_recipes(&sample_recipes(), &filters)),
            vec!["김치볶음밥", "계란말이", "스파게티 카르보나라"]
        );
    }

    #[test]
    fn test_filters_combine() {
        let filters = SearchFilters {
            query: None,
            category: Some("양식".to_string()),
            difficulty: Some("쉬움".to_string()),
            max_time: Some(15),
        };
        assert_eq!(titles(&search_recipes(&sample_recipes(), &filters)), vec!["샐러드"]);
    }

    #[test]
    fn test_max_time_is_inclusive() {
        let filters = SearchFilters {
            max_time: Some(10),
            ..Default::default()
        };
        assert_eq!(
            titles(&search_recipes(&sample_recipes(), &filters)),
            vec!["계란말이", "샐러드"]
        );
    }

    #[test]
    fn test_results_capped_at_limit() {
        let many: Vec<Recipe> = (0..30)
            .flat_map(|_| sample_recipes())
            .collect();
        assert_eq!(search_recipes(&many, &SearchFilters::default()).len(), SEARCH_LIMIT);
    }
}
