pub mod auth;
pub mod dashboard;
pub mod rating;
pub mod store;
pub mod user;
