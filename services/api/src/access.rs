//! Role-gated authorization.
//!
//! Roles form a flat set, not a hierarchy: every route names its exact
//! allow-set and the check is plain membership. In particular an admin is
//! rejected from store_owner-only routes unless the route lists `admin`
//! explicitly.

use ratewise_domain::role::Role;

use crate::domain::types::User;
use crate::error::ApiError;

/// Allow-set for routes any authenticated account may call.
pub const ANY_ROLE: &[Role] = &[Role::User, Role::StoreOwner, Role::Admin];

/// Reject the caller with 403 unless their role is in `allowed`.
///
/// The error message enumerates the required roles.
pub fn authorize(user: &User, allowed: &[Role]) -> Result<(), ApiError> {
    if allowed.contains(&user.role) {
        return Ok(());
    }
    Err(ApiError::Forbidden {
        role: user.role,
        required: allowed
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    })
}
