#![allow(async_fn_in_trait)]

use uuid::Uuid;

use ratewise_domain::role::Role;

use crate::domain::types::{
    RaterRating, Rating, Store, StoreFilter, StorePatch, StoreRating, User, UserFilter,
};
use crate::error::ApiError;

/// Repository for accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;

    /// Insert a new user. A unique violation on `email` maps to
    /// [`ApiError::EmailTaken`] so the loser of a concurrent registration
    /// race gets a conflict, not a 500.
    async fn create(&self, user: &User) -> Result<(), ApiError>;

    /// Ordered by name ascending.
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, ApiError>;

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        address: Option<&str>,
    ) -> Result<(), ApiError>;

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError>;

    /// Delete a user. Returns `true` if a row was deleted. The user's
    /// ratings cascade; owned stores keep their rows with `owner_id` nulled.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;

    async fn count(&self) -> Result<u64, ApiError>;
    async fn count_by_role(&self, role: Role) -> Result<u64, ApiError>;
}

/// Repository for stores.
pub trait StoreRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Store>, ApiError>;

    /// Ordered by name ascending.
    async fn list(&self, filter: &StoreFilter) -> Result<Vec<Store>, ApiError>;

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Store>, ApiError>;

    async fn create(&self, store: &Store) -> Result<(), ApiError>;

    /// Apply a partial update. Callers check existence first; updating a
    /// missing row is an error.
    async fn update(&self, id: Uuid, patch: &StorePatch) -> Result<(), ApiError>;

    /// Delete a store. Returns `true` if a row was deleted. Ratings cascade.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;

    async fn count(&self) -> Result<u64, ApiError>;
}

/// Repository for the rating ledger.
pub trait RatingRepository: Send + Sync {
    async fn find(&self, user_id: Uuid, store_id: Uuid) -> Result<Option<Rating>, ApiError>;

    /// Insert a new rating. A unique violation on the (user, store) pair
    /// maps to [`ApiError::AlreadyRated`] — the database serializes
    /// concurrent duplicate submissions.
    async fn create(&self, rating: &Rating) -> Result<(), ApiError>;

    /// Update the value of an existing rating in place; never inserts.
    async fn update_value(&self, user_id: Uuid, store_id: Uuid, value: u8)
    -> Result<(), ApiError>;

    /// Raw rating values for one store, for on-demand aggregation.
    async fn values_for_store(&self, store_id: Uuid) -> Result<Vec<u8>, ApiError>;

    /// Raw `(store_id, value)` pairs for a set of stores.
    async fn values_by_store(&self, store_ids: &[Uuid]) -> Result<Vec<(Uuid, u8)>, ApiError>;

    /// Every rating value in the system, for the flat system-wide mean and
    /// the admin distribution.
    async fn all_values(&self) -> Result<Vec<u8>, ApiError>;

    /// A store's ratings with rater identity, newest first.
    async fn list_for_store(&self, store_id: Uuid) -> Result<Vec<RaterRating>, ApiError>;

    /// A user's ratings with store summaries, newest first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<StoreRating>, ApiError>;

    async fn count_all(&self) -> Result<u64, ApiError>;
    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, ApiError>;
}
