use chrono::{DateTime, Utc};
use uuid::Uuid;

use ratewise_domain::role::Role;

/// Account record. `password_hash` never leaves the service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ratable store with an optional weak owner reference.
#[derive(Debug, Clone)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub hours: Option<String>,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One (user, store) rating row.
#[derive(Debug, Clone)]
pub struct Rating {
    pub user_id: Uuid,
    pub store_id: Uuid,
    pub value: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A store's rating joined with the rater's identity, for store detail and
/// owner views.
#[derive(Debug, Clone)]
pub struct RaterRating {
    pub value: u8,
    pub rater_id: Uuid,
    pub rater_name: String,
    pub rater_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's rating joined with a store summary, for "my ratings" views.
#[derive(Debug, Clone)]
pub struct StoreRating {
    pub store_id: Uuid,
    pub store_name: String,
    pub store_email: String,
    pub store_address: String,
    pub value: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin user-list filter. String filters are case-insensitive substring
/// matches.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: Option<Role>,
}

/// Public store-list filter, case-insensitive substring matches.
#[derive(Debug, Clone, Default)]
pub struct StoreFilter {
    pub name: Option<String>,
    pub address: Option<String>,
}

/// Partial store update.
///
/// The outer `Option` distinguishes "field absent from the request" from an
/// explicit value; the inner `Option` on nullable columns allows clearing
/// them (`"owner_id": null` detaches the owner).
#[derive(Debug, Clone, Default)]
pub struct StorePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub description: Option<Option<String>>,
    pub contact: Option<Option<String>>,
    pub hours: Option<Option<String>>,
    pub owner_id: Option<Option<Uuid>>,
}
