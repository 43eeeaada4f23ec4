//! Ambient service plumbing shared across RateWise crates: tracing setup,
//! health endpoints, request-id middleware, and wire-format serializers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
