use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use ratewise_domain::aggregate::{StoreAggregate, store_aggregate};
use ratewise_domain::role::Role;
use ratewise_domain::validate;

use crate::domain::repository::{RatingRepository, StoreRepository, UserRepository};
use crate::domain::types::{RaterRating, Store, StoreFilter, StorePatch, User};
use crate::error::ApiError;

/// A store annotated with its read-time aggregate.
#[derive(Debug)]
pub struct StoreWithAggregate {
    pub store: Store,
    pub aggregate: StoreAggregate,
}

/// Group raw `(store_id, value)` pairs and aggregate per store.
fn aggregate_by_store(
    stores: Vec<Store>,
    pairs: Vec<(Uuid, u8)>,
) -> Vec<StoreWithAggregate> {
    let mut grouped: HashMap<Uuid, Vec<u8>> = HashMap::new();
    for (store_id, value) in pairs {
        grouped.entry(store_id).or_default().push(value);
    }
    stores
        .into_iter()
        .map(|store| {
            let values = grouped.remove(&store.id).unwrap_or_default();
            StoreWithAggregate {
                aggregate: store_aggregate(&values),
                store,
            }
        })
        .collect()
}

async fn check_owner_eligible<U: UserRepository>(
    users: &U,
    owner_id: Uuid,
) -> Result<(), ApiError> {
    let owner = users
        .find_by_id(owner_id)
        .await?
        .ok_or(ApiError::UserNotFound)?;
    if owner.role != Role::StoreOwner {
        return Err(ApiError::OwnerNotEligible);
    }
    Ok(())
}

// ── CreateStore (admin) ──────────────────────────────────────────────────────

pub struct CreateStoreInput {
    pub name: String,
    pub email: String,
    pub address: String,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub hours: Option<String>,
    pub owner_id: Option<Uuid>,
}

pub struct CreateStoreUseCase<S: StoreRepository, U: UserRepository> {
    pub stores: S,
    pub users: U,
}

impl<S: StoreRepository, U: UserRepository> CreateStoreUseCase<S, U> {
    pub async fn execute(&self, input: CreateStoreInput) -> Result<Store, ApiError> {
        let errors: Vec<_> = [
            validate::store_name(&input.name),
            validate::email(&input.email),
            validate::store_address(&input.address),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        if let Some(owner_id) = input.owner_id {
            check_owner_eligible(&self.users, owner_id).await?;
        }

        let now = Utc::now();
        let store = Store {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            address: input.address,
            description: input.description,
            contact: input.contact,
            hours: input.hours,
            owner_id: input.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.stores.create(&store).await?;
        Ok(store)
    }
}

// ── UpdateStore (admin) ──────────────────────────────────────────────────────

pub struct UpdateStoreUseCase<S: StoreRepository, U: UserRepository> {
    pub stores: S,
    pub users: U,
}

impl<S: StoreRepository, U: UserRepository> UpdateStoreUseCase<S, U> {
    pub async fn execute(&self, id: Uuid, patch: StorePatch) -> Result<Store, ApiError> {
        if self.stores.find_by_id(id).await?.is_none() {
            return Err(ApiError::StoreNotFound);
        }

        let errors: Vec<_> = [
            patch.name.as_deref().and_then(validate::store_name),
            patch.email.as_deref().and_then(validate::email),
            patch.address.as_deref().and_then(validate::store_address),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        // Reassigning ownership re-checks eligibility; clearing it does not.
        if let Some(Some(owner_id)) = patch.owner_id {
            check_owner_eligible(&self.users, owner_id).await?;
        }

        self.stores.update(id, &patch).await?;
        self.stores
            .find_by_id(id)
            .await?
            .ok_or(ApiError::StoreNotFound)
    }
}

// ── DeleteStore (admin) ──────────────────────────────────────────────────────

pub struct DeleteStoreUseCase<S: StoreRepository> {
    pub stores: S,
}

impl<S: StoreRepository> DeleteStoreUseCase<S> {
    /// Deletion always cascades the store's ratings; it is never rejected
    /// because ratings exist.
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.stores.delete(id).await? {
            return Err(ApiError::StoreNotFound);
        }
        Ok(())
    }
}

// ── ListStores (public) ──────────────────────────────────────────────────────

pub struct ListStoresUseCase<S: StoreRepository, R: RatingRepository> {
    pub stores: S,
    pub ratings: R,
}

impl<S: StoreRepository, R: RatingRepository> ListStoresUseCase<S, R> {
    pub async fn execute(&self, filter: &StoreFilter) -> Result<Vec<StoreWithAggregate>, ApiError> {
        let stores = self.stores.list(filter).await?;
        let ids: Vec<Uuid> = stores.iter().map(|s| s.id).collect();
        let pairs = self.ratings.values_by_store(&ids).await?;
        Ok(aggregate_by_store(stores, pairs))
    }
}

// ── ListOwnedStores (store_owner) ────────────────────────────────────────────

pub struct ListOwnedStoresUseCase<S: StoreRepository, R: RatingRepository> {
    pub stores: S,
    pub ratings: R,
}

impl<S: StoreRepository, R: RatingRepository> ListOwnedStoresUseCase<S, R> {
    pub async fn execute(&self, owner_id: Uuid) -> Result<Vec<StoreWithAggregate>, ApiError> {
        let stores = self.stores.list_by_owner(owner_id).await?;
        let ids: Vec<Uuid> = stores.iter().map(|s| s.id).collect();
        let pairs = self.ratings.values_by_store(&ids).await?;
        Ok(aggregate_by_store(stores, pairs))
    }
}

// ── GetStore (public, identity-aware) ────────────────────────────────────────

/// Full store detail: aggregate, every rating with rater identity, the
/// owner's public identity, and — when the caller is authenticated — their
/// own rating value.
#[derive(Debug)]
pub struct StoreDetail {
    pub store: Store,
    pub owner: Option<User>,
    pub ratings: Vec<RaterRating>,
    pub aggregate: StoreAggregate,
    pub user_rating: Option<u8>,
}

pub struct GetStoreUseCase<S: StoreRepository, R: RatingRepository, U: UserRepository> {
    pub stores: S,
    pub ratings: R,
    pub users: U,
}

impl<S: StoreRepository, R: RatingRepository, U: UserRepository> GetStoreUseCase<S, R, U> {
    pub async fn execute(
        &self,
        store_id: Uuid,
        caller: Option<Uuid>,
    ) -> Result<StoreDetail, ApiError> {
        let store = self
            .stores
            .find_by_id(store_id)
            .await?
            .ok_or(ApiError::StoreNotFound)?;

        let ratings = self.ratings.list_for_store(store_id).await?;
        let values: Vec<u8> = ratings.iter().map(|r| r.value).collect();
        let aggregate = store_aggregate(&values);

        let owner = match store.owner_id {
            Some(owner_id) => self.users.find_by_id(owner_id).await?,
            None => None,
        };

        let user_rating = match caller {
            Some(user_id) => self
                .ratings
                .find(user_id, store_id)
                .await?
                .map(|r| r.value),
            None => None,
        };

        Ok(StoreDetail {
            store,
            owner,
            ratings,
            aggregate,
            user_rating,
        })
    }
}
