pub mod auth;
pub mod brands;
pub mod categories;
pub mod front;
pub mod products;
