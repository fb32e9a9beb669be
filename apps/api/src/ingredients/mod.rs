pub mod handlers;
pub mod inventory;
pub mod store;
