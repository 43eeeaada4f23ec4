//! Authentication primitives for RateWise.
//!
//! Provides JWT issue/validate, the `Authorization: Bearer` extractor, and
//! Argon2id password hashing. Token verification is a pure function of the
//! token string and the signing secret — there is no server-side session
//! store and no revocation list; logout is a client-side token discard.

pub mod bearer;
pub mod password;
pub mod token;
