use std::collections::HashMap;

use uuid::Uuid;

use ratewise_domain::aggregate::{flat_mean, owner_overall_average, store_aggregate};
use ratewise_domain::role::Role;

use crate::domain::repository::{RatingRepository, StoreRepository, UserRepository};
use crate::error::ApiError;
use crate::usecase::store::StoreWithAggregate;

// ── User dashboard ───────────────────────────────────────────────────────────

/// Dashboard for a regular `user` account.
///
/// `average_rating` is the flat mean over every rating row in the system,
/// not just the caller's own.
#[derive(Debug)]
pub struct UserDashboard {
    pub total_stores: u64,
    pub total_ratings: u64,
    pub average_rating: f64,
}

pub struct UserDashboardUseCase<S: StoreRepository, R: RatingRepository> {
    pub stores: S,
    pub ratings: R,
}

impl<S: StoreRepository, R: RatingRepository> UserDashboardUseCase<S, R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<UserDashboard, ApiError> {
        let total_stores = self.stores.count().await?;
        let total_ratings = self.ratings.count_by_user(user_id).await?;
        let values = self.ratings.all_values().await?;
        Ok(UserDashboard {
            total_stores,
            total_ratings,
            average_rating: flat_mean(&values),
        })
    }
}

// ── Owner dashboard ──────────────────────────────────────────────────────────

/// Dashboard for a `store_owner` account.
///
/// `average_rating` is the mean of each owned store's own average (an
/// unrated store contributes zero), so it can differ from the flat mean of
/// the same rating rows when store sizes differ.
#[derive(Debug)]
pub struct OwnerDashboard {
    pub store_count: u64,
    pub total_ratings: u64,
    pub average_rating: f64,
    pub stores: Vec<StoreWithAggregate>,
}

pub struct OwnerDashboardUseCase<S: StoreRepository, R: RatingRepository> {
    pub stores: S,
    pub ratings: R,
}

impl<S: StoreRepository, R: RatingRepository> OwnerDashboardUseCase<S, R> {
    pub async fn execute(&self, owner_id: Uuid) -> Result<OwnerDashboard, ApiError> {
        let stores = self.stores.list_by_owner(owner_id).await?;
        let ids: Vec<Uuid> = stores.iter().map(|s| s.id).collect();
        let pairs = self.ratings.values_by_store(&ids).await?;

        let mut grouped: HashMap<Uuid, Vec<u8>> = HashMap::new();
        for (store_id, value) in pairs {
            grouped.entry(store_id).or_default().push(value);
        }

        let stores: Vec<StoreWithAggregate> = stores
            .into_iter()
            .map(|store| {
                let values = grouped.remove(&store.id).unwrap_or_default();
                StoreWithAggregate {
                    aggregate: store_aggregate(&values),
                    store,
                }
            })
            .collect();

        let per_store: Vec<Option<f64>> =
            stores.iter().map(|s| s.aggregate.average).collect();
        let total_ratings: u64 = stores.iter().map(|s| s.aggregate.count).sum();

        Ok(OwnerDashboard {
            store_count: stores.len() as u64,
            total_ratings,
            average_rating: owner_overall_average(&per_store),
            stores,
        })
    }
}

// ── Admin dashboard ──────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct UsersByRole {
    pub user: u64,
    pub store_owner: u64,
    pub admin: u64,
}

/// Dashboard for an `admin` account. `average_rating` shares the flat
/// system-wide mean with the user dashboard.
#[derive(Debug)]
pub struct AdminDashboard {
    pub total_users: u64,
    pub total_stores: u64,
    pub total_ratings: u64,
    pub average_rating: f64,
    pub users_by_role: UsersByRole,
}

pub struct AdminDashboardUseCase<U: UserRepository, S: StoreRepository, R: RatingRepository> {
    pub users: U,
    pub stores: S,
    pub ratings: R,
}

impl<U: UserRepository, S: StoreRepository, R: RatingRepository>
    AdminDashboardUseCase<U, S, R>
{
    pub async fn execute(&self) -> Result<AdminDashboard, ApiError> {
        let total_users = self.users.count().await?;
        let total_stores = self.stores.count().await?;
        let values = self.ratings.all_values().await?;

        let users_by_role = UsersByRole {
            user: self.users.count_by_role(Role::User).await?,
            store_owner: self.users.count_by_role(Role::StoreOwner).await?,
            admin: self.users.count_by_role(Role::Admin).await?,
        };

        Ok(AdminDashboard {
            total_users,
            total_stores,
            total_ratings: values.len() as u64,
            average_rating: flat_mean(&values),
            users_by_role,
        })
    }
}
