use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    sea_query::{Expr, Func},
};
use uuid::Uuid;

use ratewise_api_schema::{ratings, stores, users};
use ratewise_domain::role::Role;

use crate::domain::repository::{RatingRepository, StoreRepository, UserRepository};
use crate::domain::types::{
    RaterRating, Rating, Store, StoreFilter, StorePatch, StoreRating, User, UserFilter,
};
use crate::error::ApiError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Case-insensitive substring match on a column.
fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", needle.to_lowercase()))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            address: Set(user.address.clone()),
            role: Set(user.role as i16),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ApiError::EmailTaken),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, ApiError> {
        let mut query = users::Entity::find();
        if let Some(name) = &filter.name {
            query = query.filter(contains_ci(users::Column::Name, name));
        }
        if let Some(email) = &filter.email {
            query = query.filter(contains_ci(users::Column::Email, email));
        }
        if let Some(address) = &filter.address {
            query = query.filter(contains_ci(users::Column::Address, address));
        }
        if let Some(role) = filter.role {
            query = query.filter(users::Column::Role.eq(role as i16));
        }
        let models = query
            .order_by_asc(users::Column::Name)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        address: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(new_name) = name {
            am.name = Set(new_name.to_owned());
        }
        if let Some(new_address) = address {
            am.address = Set(Some(new_address.to_owned()));
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("update user profile")?;
        Ok(())
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update password hash")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, ApiError> {
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        Ok(count)
    }

    async fn count_by_role(&self, role: Role) -> Result<u64, ApiError> {
        let count = users::Entity::find()
            .filter(users::Column::Role.eq(role as i16))
            .count(&self.db)
            .await
            .context("count users by role")?;
        Ok(count)
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = Role::from_u8(model.role as u8)
        .ok_or_else(|| anyhow::anyhow!("unknown role {} for user {}", model.role, model.id))?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        address: model.address,
        role,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Store repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStoreRepository {
    pub db: DatabaseConnection,
}

impl StoreRepository for DbStoreRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Store>, ApiError> {
        let model = stores::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find store by id")?;
        Ok(model.map(store_from_model))
    }

    async fn list(&self, filter: &StoreFilter) -> Result<Vec<Store>, ApiError> {
        let mut query = stores::Entity::find();
        if let Some(name) = &filter.name {
            query = query.filter(contains_ci(stores::Column::Name, name));
        }
        if let Some(address) = &filter.address {
            query = query.filter(contains_ci(stores::Column::Address, address));
        }
        let models = query
            .order_by_asc(stores::Column::Name)
            .all(&self.db)
            .await
            .context("list stores")?;
        Ok(models.into_iter().map(store_from_model).collect())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Store>, ApiError> {
        let models = stores::Entity::find()
            .filter(stores::Column::OwnerId.eq(owner_id))
            .order_by_asc(stores::Column::Name)
            .all(&self.db)
            .await
            .context("list stores by owner")?;
        Ok(models.into_iter().map(store_from_model).collect())
    }

    async fn create(&self, store: &Store) -> Result<(), ApiError> {
        stores::ActiveModel {
            id: Set(store.id),
            name: Set(store.name.clone()),
            email: Set(store.email.clone()),
            address: Set(store.address.clone()),
            description: Set(store.description.clone()),
            contact: Set(store.contact.clone()),
            hours: Set(store.hours.clone()),
            owner_id: Set(store.owner_id),
            created_at: Set(store.created_at),
            updated_at: Set(store.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create store")?;
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &StorePatch) -> Result<(), ApiError> {
        let mut am = stores::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(name) = &patch.name {
            am.name = Set(name.clone());
        }
        if let Some(email) = &patch.email {
            am.email = Set(email.clone());
        }
        if let Some(address) = &patch.address {
            am.address = Set(address.clone());
        }
        if let Some(description) = &patch.description {
            am.description = Set(description.clone());
        }
        if let Some(contact) = &patch.contact {
            am.contact = Set(contact.clone());
        }
        if let Some(hours) = &patch.hours {
            am.hours = Set(hours.clone());
        }
        if let Some(owner_id) = patch.owner_id {
            am.owner_id = Set(owner_id);
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("update store")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = stores::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete store")?;
        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, ApiError> {
        let count = stores::Entity::find()
            .count(&self.db)
            .await
            .context("count stores")?;
        Ok(count)
    }
}

fn store_from_model(model: stores::Model) -> Store {
    Store {
        id: model.id,
        name: model.name,
        email: model.email,
        address: model.address,
        description: model.description,
        contact: model.contact,
        hours: model.hours,
        owner_id: model.owner_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Rating repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRatingRepository {
    pub db: DatabaseConnection,
}

impl RatingRepository for DbRatingRepository {
    async fn find(&self, user_id: Uuid, store_id: Uuid) -> Result<Option<Rating>, ApiError> {
        let model = ratings::Entity::find_by_id((user_id, store_id))
            .one(&self.db)
            .await
            .context("find rating")?;
        Ok(model.map(rating_from_model))
    }

    async fn create(&self, rating: &Rating) -> Result<(), ApiError> {
        let result = ratings::ActiveModel {
            user_id: Set(rating.user_id),
            store_id: Set(rating.store_id),
            rating: Set(i16::from(rating.value)),
            created_at: Set(rating.created_at),
            updated_at: Set(rating.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ApiError::AlreadyRated),
            Err(e) => Err(anyhow::Error::new(e).context("create rating").into()),
        }
    }

    async fn update_value(
        &self,
        user_id: Uuid,
        store_id: Uuid,
        value: u8,
    ) -> Result<(), ApiError> {
        ratings::ActiveModel {
            user_id: Set(user_id),
            store_id: Set(store_id),
            rating: Set(i16::from(value)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update rating value")?;
        Ok(())
    }

    async fn values_for_store(&self, store_id: Uuid) -> Result<Vec<u8>, ApiError> {
        let values: Vec<i16> = ratings::Entity::find()
            .filter(ratings::Column::StoreId.eq(store_id))
            .select_only()
            .column(ratings::Column::Rating)
            .into_tuple()
            .all(&self.db)
            .await
            .context("load rating values for store")?;
        Ok(values.into_iter().map(|v| v as u8).collect())
    }

    async fn values_by_store(&self, store_ids: &[Uuid]) -> Result<Vec<(Uuid, u8)>, ApiError> {
        if store_ids.is_empty() {
            return Ok(vec![]);
        }
        let rows: Vec<(Uuid, i16)> = ratings::Entity::find()
            .filter(ratings::Column::StoreId.is_in(store_ids.iter().copied()))
            .select_only()
            .column(ratings::Column::StoreId)
            .column(ratings::Column::Rating)
            .into_tuple()
            .all(&self.db)
            .await
            .context("load rating values by store")?;
        Ok(rows.into_iter().map(|(id, v)| (id, v as u8)).collect())
    }

    async fn all_values(&self) -> Result<Vec<u8>, ApiError> {
        let values: Vec<i16> = ratings::Entity::find()
            .select_only()
            .column(ratings::Column::Rating)
            .into_tuple()
            .all(&self.db)
            .await
            .context("load all rating values")?;
        Ok(values.into_iter().map(|v| v as u8).collect())
    }

    async fn list_for_store(&self, store_id: Uuid) -> Result<Vec<RaterRating>, ApiError> {
        let rows = ratings::Entity::find()
            .filter(ratings::Column::StoreId.eq(store_id))
            .find_also_related(users::Entity)
            .order_by_desc(ratings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list ratings for store")?;
        Ok(rows
            .into_iter()
            .filter_map(|(rating, user)| {
                user.map(|user| RaterRating {
                    value: rating.rating as u8,
                    rater_id: user.id,
                    rater_name: user.name,
                    rater_email: user.email,
                    created_at: rating.created_at,
                    updated_at: rating.updated_at,
                })
            })
            .collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<StoreRating>, ApiError> {
        let rows = ratings::Entity::find()
            .filter(ratings::Column::UserId.eq(user_id))
            .find_also_related(stores::Entity)
            .order_by_desc(ratings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list ratings by user")?;
        Ok(rows
            .into_iter()
            .filter_map(|(rating, store)| {
                store.map(|store| StoreRating {
                    store_id: store.id,
                    store_name: store.name,
                    store_email: store.email,
                    store_address: store.address,
                    value: rating.rating as u8,
                    created_at: rating.created_at,
                    updated_at: rating.updated_at,
                })
            })
            .collect())
    }

    async fn count_all(&self) -> Result<u64, ApiError> {
        let count = ratings::Entity::find()
            .count(&self.db)
            .await
            .context("count ratings")?;
        Ok(count)
    }

    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, ApiError> {
        let count = ratings::Entity::find()
            .filter(ratings::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .context("count ratings by user")?;
        Ok(count)
    }
}

fn rating_from_model(model: ratings::Model) -> Rating {
    Rating {
        user_id: model.user_id,
        store_id: model.store_id,
        value: model.rating as u8,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
