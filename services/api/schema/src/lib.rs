//! sea-orm entities for the RateWise database.

pub mod ratings;
pub mod stores;
pub mod users;
