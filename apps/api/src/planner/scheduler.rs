//! Weekly Scheduler: fills the 7×3 grid round-robin from the ranked recipe list.

use crate::planner::alternates::AlternatePicker;
use crate::planner::plan::{Day, DayMeals, DayPlan, MealSlot, ScoredRecipe, WeeklyPlan};
use crate::planner::PlanError;

/// Alternates offered per slot when the catalog is large enough.
pub const ALTERNATES_PER_SLOT: usize = 2;

/// Builds a full week from the ranked recipes.
///
/// A single cursor walks the list, one step per slot, and wraps to 0 whenever it
/// reaches the end (mid-day if needed), so any non-empty list fills all 21 slots.
/// Each slot gets up to two alternates that differ from the slot's recipe and from
/// each other by list index. An empty list is an error; no partial plan is produced.
pub fn schedule(
    recipes: &[ScoredRecipe],
    picker: &mut dyn AlternatePicker,
) -> Result<WeeklyPlan, PlanError> {
    if recipes.is_empty() {
        return Err(PlanError::EmptyCatalog);
    }

    let mut round_robin = RoundRobin {
        recipes,
        cursor: 0,
        picker,
    };

    let days = Day::ALL.map(|day| DayPlan {
        day,
        meals: DayMeals {
            breakfast: round_robin.next_slot(),
            lunch: round_robin.next_slot(),
            dinner: round_robin.next_slot(),
        },
    });

    Ok(WeeklyPlan {
        days,
        personalization: None,
    })
}

struct RoundRobin<'r, 'p> {
    recipes: &'r [ScoredRecipe],
    cursor: usize,
    picker: &'p mut dyn AlternatePicker,
}

impl RoundRobin<'_, '_> {
    fn next_slot(&mut self) -> MealSlot {
        if self.cursor >= self.recipes.len() {
            self.cursor = 0;
        }
        let index = self.cursor;
        self.cursor += 1;

        let chosen = &self.recipes[index];
        let alternatives = self
            .picker
            .pick_distinct(self.recipes.len(), &[index], ALTERNATES_PER_SLOT)
            .into_iter()
            .filter(|&i| i != index)
            .filter_map(|i| self.recipes.get(i))
            .map(|alt| alt.recipe.clone())
            .collect();

        MealSlot {
            recipe: chosen.recipe.clone(),
            match_ratio: chosen.match_ratio,
            matching_ingredients: chosen.matching_ingredients.clone(),
            confirmed: false,
            alternatives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::alternates::testing::LowestFirst;
    use crate::planner::alternates::RandomPicker;
    use crate::planner::plan::MealType;
    use crate::planner::prioritizer::prioritize;
    use crate::planner::test_support::recipe;
    use crate::recipes::sample::sample_recipes;

    fn ranked(n: i64) -> Vec<ScoredRecipe> {
        let catalog = (1..=n).map(|i| recipe(i, "r", "x", &["rice"])).collect();
        prioritize(catalog, &[])
    }

    #[test]
    fn test_empty_list_is_an_error() {
        let result = schedule(&[], &mut LowestFirst);
        assert!(matches!(result, Err(PlanError::EmptyCatalog)));
    }

    #[test]
    fn test_sample_catalog_wraps_cursor_round_robin() {
        let recipes = prioritize(sample_recipes(), &[]);
        let plan = schedule(&recipes, &mut RandomPicker::seeded(11)).unwrap();

        let ids: Vec<i64> = plan.slots().map(|(_, _, s)| s.recipe.id).collect();
        let expected: Vec<i64> = (0..21).map(|k| (k % 5) as i64 + 1).collect();
        assert_eq!(ids, expected);
        assert_eq!(ids[20], 1, "21st slot wraps back to index 0");
    }

    #[test]
    fn test_wrap_happens_mid_day() {
        let plan = schedule(&ranked(2), &mut LowestFirst).unwrap();
        let monday: Vec<i64> = MealType::ALL
            .iter()
            .map(|&m| plan.days[0].meals.get(m).recipe.id)
            .collect();
        assert_eq!(monday, vec![1, 2, 1]);
        assert_eq!(plan.days[1].meals.breakfast.recipe.id, 2);
    }

    #[test]
    fn test_large_catalog_uses_first_21_in_rank_order() {
        let plan = schedule(&ranked(30), &mut LowestFirst).unwrap();
        let ids: Vec<i64> = plan.slots().map(|(_, _, s)| s.recipe.id).collect();
        assert_eq!(ids, (1..=21).collect::<Vec<_>>());
    }

    #[test]
    fn test_every_slot_filled_with_two_distinct_alternates() {
        for n in [3, 4, 5, 21, 25] {
            let recipes = ranked(n);
            let plan = schedule(&recipes, &mut RandomPicker::seeded(n as u64)).unwrap();
            assert_eq!(plan.slots().count(), 21);
            for (_, _, slot) in plan.slots() {
                assert!(!slot.confirmed);
                assert_eq!(slot.alternatives.len(), 2);
                assert!(slot.alternatives.iter().all(|a| a.id != slot.recipe.id));
                assert_ne!(slot.alternatives[0].id, slot.alternatives[1].id);
            }
        }
    }

    #[test]
    fn test_small_catalogs_cap_alternates_instead_of_looping() {
        let plan = schedule(&ranked(1), &mut RandomPicker::seeded(5)).unwrap();
        assert!(plan.slots().all(|(_, _, s)| s.alternatives.is_empty()));

        let plan = schedule(&ranked(2), &mut RandomPicker::seeded(5)).unwrap();
        for (_, _, slot) in plan.slots() {
            assert_eq!(slot.alternatives.len(), 1);
            assert_ne!(slot.alternatives[0].id, slot.recipe.id);
        }
    }

    #[test]
    fn test_slot_carries_match_data() {
        let catalog = vec![recipe(1, "a", "x", &["egg", "rice"])];
        let recipes = prioritize(catalog, &["egg".to_string()]);
        let plan = schedule(&recipes, &mut LowestFirst).unwrap();
        let slot = &plan.days[6].meals.dinner;
        assert_eq!(slot.match_ratio, 0.5);
        assert_eq!(slot.matching_ingredients, vec!["egg".to_string()]);
    }
}
