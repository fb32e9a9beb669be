// Weekly meal-plan engine.
// Flow: select (allergy/preference filter) → prioritize (owned-ingredient ratio) →
//       schedule (round-robin 7×3 grid with alternates) → optional personalization.
// Nutrition aggregation runs separately over a stored plan.

use thiserror::Error;

pub mod alternates;
pub mod generator;
pub mod nutrition;
pub mod personalization;
pub mod plan;
pub mod prioritizer;
pub mod prompts;
pub mod scheduler;
pub mod selector;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No recipes match the given allergies and preferences")]
    EmptyCatalog,
}

/// Per-request filtering and ranking inputs. Not persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserConstraints {
    allergies: Vec<String>,
    preferences: Vec<String>,
    available_ingredients: Vec<String>,
}

impl UserConstraints {
    /// Trims every term and drops blanks and duplicates.
    /// A blank term would substring-match every ingredient.
    pub fn new(
        allergies: impl IntoIterator<Item = String>,
        preferences: impl IntoIterator<Item = String>,
        available_ingredients: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            allergies: clean_terms(allergies),
            preferences: clean_terms(preferences),
            available_ingredients: clean_terms(available_ingredients),
        }
    }

    pub fn allergies(&self) -> &[String] {
        &self.allergies
    }

    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    pub fn available_ingredients(&self) -> &[String] {
        &self.available_ingredients
    }
}

fn clean_terms(terms: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for term in terms {
        let term = term.trim();
        if !term.is_empty() && !cleaned.iter().any(|t| t == term) {
            cleaned.push(term.to_string());
        }
    }
    cleaned
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::test_support::strings;

    #[test]
    fn test_constraints_drop_blank_and_duplicate_terms() {
        let constraints = UserConstraints::new(
            strings(&["  계란 ", "", "계란", "우유"]),
            strings(&["   "]),
            strings(&["김치"]),
        );
        assert_eq!(constraints.allergies(), &["계란".to_string(), "우유".to_string()]);
        assert!(constraints.preferences().is_empty());
        assert_eq!(constraints.available_ingredients(), &["김치".to_string()]);
    }
}
