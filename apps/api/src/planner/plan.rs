//! Weekly plan data model: 7 fixed days × 3 fixed meals.
//!
//! The day array and the three meal fields make the shape invariant part of the
//! type, so a deserialized plan can never have a missing day or meal.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::recipe::Recipe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    #[serde(rename = "월요일")]
    Monday,
    #[serde(rename = "화요일")]
    Tuesday,
    #[serde(rename = "수요일")]
    Wednesday,
    #[serde(rename = "목요일")]
    Thursday,
    #[serde(rename = "금요일")]
    Friday,
    #[serde(rename = "토요일")]
    Saturday,
    #[serde(rename = "일요일")]
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// The name used on the wire.
    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "월요일",
            Day::Tuesday => "화요일",
            Day::Wednesday => "수요일",
            Day::Thursday => "목요일",
            Day::Friday => "금요일",
            Day::Saturday => "토요일",
            Day::Sunday => "일요일",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealType {
    #[serde(rename = "아침")]
    Breakfast,
    #[serde(rename = "점심")]
    Lunch,
    #[serde(rename = "저녁")]
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn label(self) -> &'static str {
        match self {
            MealType::Breakfast => "아침",
            MealType::Lunch => "점심",
            MealType::Dinner => "저녁",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recipe annotated with how much of it the user can cook from what they own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecipe {
    pub recipe: Recipe,
    /// 0.0 – 1.0
    pub match_ratio: f64,
    pub matching_ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSlot {
    pub recipe: Recipe,
    #[serde(default)]
    pub match_ratio: f64,
    #[serde(default)]
    pub matching_ingredients: Vec<String>,
    #[serde(default)]
    pub confirmed: bool,
    /// At most two, never the slot's own recipe.
    #[serde(default)]
    pub alternatives: Vec<Recipe>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMeals {
    #[serde(rename = "아침")]
    pub breakfast: MealSlot,
    #[serde(rename = "점심")]
    pub lunch: MealSlot,
    #[serde(rename = "저녁")]
    pub dinner: MealSlot,
}

impl DayMeals {
    pub fn get(&self, meal_type: MealType) -> &MealSlot {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
        }
    }

    pub fn get_mut(&mut self, meal_type: MealType) -> &mut MealSlot {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MealType, &MealSlot)> {
        MealType::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: Day,
    pub meals: DayMeals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub days: [DayPlan; 7],
    /// Free-form annotation from the text generator, if personalization succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personalization: Option<Value>,
}

impl WeeklyPlan {
    /// All 21 slots in day order, then meal order.
    pub fn slots(&self) -> impl Iterator<Item = (Day, MealType, &MealSlot)> {
        self.days
            .iter()
            .flat_map(|d| d.meals.iter().map(move |(m, slot)| (d.day, m, slot)))
    }

    /// Sets the confirmed flag on the slot at (day, meal_type) if it holds `recipe_id`.
    /// Returns false when no slot matched.
    pub fn set_confirmed(
        &mut self,
        day: Day,
        meal_type: MealType,
        recipe_id: i64,
        confirmed: bool,
    ) -> bool {
        let Some(day_plan) = self.days.iter_mut().find(|d| d.day == day) else {
            return false;
        };
        let slot = day_plan.meals.get_mut(meal_type);
        if slot.recipe.id != recipe_id {
            return false;
        }
        slot.confirmed = confirmed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::test_support::recipe;

    fn slot(id: i64) -> MealSlot {
        MealSlot {
            recipe: recipe(id, "r", "한식", &["밥"]),
            match_ratio: 0.0,
            matching_ingredients: vec![],
            confirmed: false,
            alternatives: vec![],
        }
    }

    fn plan() -> WeeklyPlan {
        let mut next = 0;
        WeeklyPlan {
            days: Day::ALL.map(|day| {
                let mut take = || {
                    next += 1;
                    slot(next)
                };
                DayPlan {
                    day,
                    meals: DayMeals {
                        breakfast: take(),
                        lunch: take(),
                        dinner: take(),
                    },
                }
            }),
            personalization: None,
        }
    }

    #[test]
    fn test_day_and_meal_labels_serialize_in_korean() {
        assert_eq!(serde_json::to_value(Day::Wednesday).unwrap(), "수요일");
        assert_eq!(serde_json::to_value(MealType::Dinner).unwrap(), "저녁");
        let value = serde_json::to_value(plan()).unwrap();
        assert_eq!(value["days"][0]["day"], "월요일");
        assert_eq!(value["days"][0]["meals"]["점심"]["recipe"]["id"], 2);
        assert!(value.get("personalization").is_none());
    }

    #[test]
    fn test_display_matches_wire_names() {
        for day in Day::ALL {
            assert_eq!(serde_json::to_value(day).unwrap(), day.to_string());
        }
        for meal in MealType::ALL {
            assert_eq!(serde_json::to_value(meal).unwrap(), meal.to_string());
        }
        assert_eq!(format!("{} {}", Day::Monday, MealType::Breakfast), "월요일 아침");
    }

    #[test]
    fn test_slots_iterate_in_day_then_meal_order() {
        let plan = plan();
        let ids: Vec<i64> = plan.slots().map(|(_, _, s)| s.recipe.id).collect();
        assert_eq!(ids, (1..=21).collect::<Vec<_>>());
        let (day, meal, _) = plan.slots().nth(4).unwrap();
        assert_eq!((day, meal), (Day::Tuesday, MealType::Lunch));
    }

    #[test]
    fn test_set_confirmed_requires_matching_recipe_id() {
        let mut plan = plan();
        assert!(!plan.set_confirmed(Day::Monday, MealType::Breakfast, 99, true));
        assert!(!plan.days[0].meals.breakfast.confirmed);

        assert!(plan.set_confirmed(Day::Monday, MealType::Breakfast, 1, true));
        assert!(plan.days[0].meals.breakfast.confirmed);
        assert!(!plan.days[0].meals.lunch.confirmed);

        assert!(plan.set_confirmed(Day::Monday, MealType::Breakfast, 1, false));
        assert!(!plan.days[0].meals.breakfast.confirmed);
    }

    #[test]
    fn test_plan_with_missing_day_fails_to_deserialize() {
        let mut value = serde_json::to_value(plan()).unwrap();
        value["days"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<WeeklyPlan>(value).is_err());
    }
}
