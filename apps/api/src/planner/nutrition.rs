//! Nutrition Aggregator: weekly totals, per-day totals, and a 7-day daily average.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::recipe::{Nutrition, Recipe};
use crate::planner::plan::{Day, WeeklyPlan};

/// The average always divides by a full week, however many days have meals.
const DAYS_PER_WEEK: f64 = 7.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionReport {
    pub total: Nutrition,
    /// Only days that appear in the input get an entry.
    pub daily: BTreeMap<Day, Nutrition>,
    pub average: Nutrition,
}

/// Aggregates the chosen recipe of every slot in the plan.
pub fn aggregate(plan: &WeeklyPlan) -> NutritionReport {
    aggregate_meals(plan.slots().map(|(day, _, slot)| (day, &slot.recipe)))
}

/// Aggregates a flattened list of (day, recipe) meals.
pub fn aggregate_meals<'a>(meals: impl IntoIterator<Item = (Day, &'a Recipe)>) -> NutritionReport {
    let mut total = Nutrition::default();
    let mut daily: BTreeMap<Day, Nutrition> = BTreeMap::new();

    for (day, recipe) in meals {
        total += &recipe.nutrition;
        *daily.entry(day).or_default() += &recipe.nutrition;
    }

    let average = Nutrition {
        calories: round_half_up(total.calories / DAYS_PER_WEEK),
        protein: round_one_decimal(total.protein / DAYS_PER_WEEK),
        carbs: round_one_decimal(total.carbs / DAYS_PER_WEEK),
        fat: round_one_decimal(total.fat / DAYS_PER_WEEK),
        fiber: round_one_decimal(total.fiber / DAYS_PER_WEEK),
        sodium: round_half_up(total.sodium / DAYS_PER_WEEK),
    };

    NutritionReport {
        total,
        daily,
        average,
    }
}

/// Rounds .5 toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn round_one_decimal(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}
