pub mod chat;
pub mod ingredient;
pub mod meal_plan;
pub mod profile;
pub mod recipe;
