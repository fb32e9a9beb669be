pub mod catalog;
pub mod favorites;
pub mod handlers;
pub mod sample;
pub mod search;
