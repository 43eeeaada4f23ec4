//! Domain types and rules shared across the RateWise workspace.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod aggregate;
pub mod role;
pub mod validate;
