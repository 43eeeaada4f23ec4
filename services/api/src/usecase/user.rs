use chrono::Utc;
use uuid::Uuid;

use ratewise_auth::password::{hash_password, verify_password};
use ratewise_domain::aggregate::{StoreAggregate, store_aggregate};
use ratewise_domain::role::Role;
use ratewise_domain::validate;

use crate::domain::repository::{RatingRepository, StoreRepository, UserRepository};
use crate::domain::types::{Store, User, UserFilter};
use crate::error::ApiError;

// ── CreateUser (admin) ───────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
    pub role: Role,
}

pub struct CreateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CreateUserUseCase<U> {
    /// Admin-initiated creation: any role, relaxed 2–60 name rule.
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, ApiError> {
        let errors: Vec<_> = [
            validate::profile_name(&input.name),
            validate::email(&input.email),
            validate::password(&input.password),
            input.address.as_deref().and_then(validate::address),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::EmailTaken);
        }

        let password_hash =
            hash_password(&input.password).map_err(|e| ApiError::Internal(e.into()))?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            password_hash,
            address: input.address,
            role: input.role,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        Ok(user)
    }
}

// ── ListUsers (admin) ────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(&self, filter: &UserFilter) -> Result<Vec<User>, ApiError> {
        self.users.list(filter).await
    }
}

// ── GetUser (admin detail / own profile) ─────────────────────────────────────

/// A store-owner's store annotated with its aggregate, attached to user
/// detail responses.
#[derive(Debug)]
pub struct OwnedStoreInfo {
    pub store: Store,
    pub aggregate: StoreAggregate,
}

pub struct GetUserUseCase<U: UserRepository, S: StoreRepository, R: RatingRepository> {
    pub users: U,
    pub stores: S,
    pub ratings: R,
}

impl<U: UserRepository, S: StoreRepository, R: RatingRepository> GetUserUseCase<U, S, R> {
    /// For `store_owner` accounts the response carries their store (first
    /// owned, matching the single-store assumption of the profile view).
    pub async fn execute(&self, id: Uuid) -> Result<(User, Option<OwnedStoreInfo>), ApiError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        if user.role != Role::StoreOwner {
            return Ok((user, None));
        }

        let store = self.stores.list_by_owner(user.id).await?.into_iter().next();
        let info = match store {
            Some(store) => {
                let values = self.ratings.values_for_store(store.id).await?;
                Some(OwnedStoreInfo {
                    store,
                    aggregate: store_aggregate(&values),
                })
            }
            None => None,
        };
        Ok((user, info))
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub name: String,
    pub address: Option<String>,
}

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    /// Email is immutable once set; only name and address can change.
    pub async fn execute(&self, user_id: Uuid, input: UpdateProfileInput) -> Result<User, ApiError> {
        let errors: Vec<_> = [
            validate::profile_name(&input.name),
            input.address.as_deref().and_then(validate::address),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        self.users
            .update_profile(user_id, Some(&input.name), input.address.as_deref())
            .await?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ChangePasswordUseCase<U> {
    pub async fn execute(&self, user: &User, input: ChangePasswordInput) -> Result<(), ApiError> {
        let matches = verify_password(&input.current_password, &user.password_hash)
            .map_err(|e| ApiError::Internal(e.into()))?;
        if !matches {
            return Err(ApiError::InvalidCredentials);
        }
        if let Some(err) = validate::password(&input.new_password) {
            return Err(ApiError::Validation(vec![err]));
        }
        let hash = hash_password(&input.new_password).map_err(|e| ApiError::Internal(e.into()))?;
        self.users.update_password_hash(user.id, &hash).await
    }
}

// ── DeleteUser (admin) ───────────────────────────────────────────────────────

pub struct DeleteUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteUserUseCase<U> {
    /// Admin accounts cannot be deleted through this path. Ratings cascade;
    /// owned stores are kept with their owner reference nulled.
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        let target = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if target.role == Role::Admin {
            return Err(ApiError::AdminProtected);
        }
        if !self.users.delete(id).await? {
            return Err(ApiError::UserNotFound);
        }
        Ok(())
    }
}
