use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use ratewise_domain::aggregate::{distribution, store_aggregate};
use ratewise_domain::validate;

use crate::domain::repository::{RatingRepository, StoreRepository};
use crate::domain::types::{Rating, StoreRating};
use crate::error::ApiError;

// ── SubmitRating ─────────────────────────────────────────────────────────────

pub struct SubmitRatingUseCase<R: RatingRepository, S: StoreRepository> {
    pub ratings: R,
    pub stores: S,
}

impl<R: RatingRepository, S: StoreRepository> SubmitRatingUseCase<R, S> {
    /// First rating for a (user, store) pair. A second submission is a
    /// conflict; changing a rating goes through [`UpdateRatingUseCase`].
    pub async fn execute(
        &self,
        user_id: Uuid,
        store_id: Uuid,
        value: u8,
    ) -> Result<Rating, ApiError> {
        if let Some(err) = validate::rating_value(value) {
            return Err(ApiError::Validation(vec![err]));
        }
        if self.stores.find_by_id(store_id).await?.is_none() {
            return Err(ApiError::StoreNotFound);
        }
        if self.ratings.find(user_id, store_id).await?.is_some() {
            return Err(ApiError::AlreadyRated);
        }

        let now = Utc::now();
        let rating = Rating {
            user_id,
            store_id,
            value,
            created_at: now,
            updated_at: now,
        };
        self.ratings.create(&rating).await?;
        Ok(rating)
    }
}

// ── UpdateRating ─────────────────────────────────────────────────────────────

pub struct UpdateRatingUseCase<R: RatingRepository, S: StoreRepository> {
    pub ratings: R,
    pub stores: S,
}

impl<R: RatingRepository, S: StoreRepository> UpdateRatingUseCase<R, S> {
    /// Changes an existing rating in place. Never upserts: rating a store
    /// for the first time must go through [`SubmitRatingUseCase`].
    pub async fn execute(
        &self,
        user_id: Uuid,
        store_id: Uuid,
        value: u8,
    ) -> Result<Rating, ApiError> {
        if let Some(err) = validate::rating_value(value) {
            return Err(ApiError::Validation(vec![err]));
        }
        if self.stores.find_by_id(store_id).await?.is_none() {
            return Err(ApiError::StoreNotFound);
        }
        if self.ratings.find(user_id, store_id).await?.is_none() {
            return Err(ApiError::RatingNotFound);
        }

        self.ratings.update_value(user_id, store_id, value).await?;
        self.ratings
            .find(user_id, store_id)
            .await?
            .ok_or(ApiError::RatingNotFound)
    }
}

// ── ListUserRatings ──────────────────────────────────────────────────────────

pub struct ListUserRatingsUseCase<R: RatingRepository> {
    pub ratings: R,
}

impl<R: RatingRepository> ListUserRatingsUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<StoreRating>, ApiError> {
        self.ratings.list_by_user(user_id).await
    }
}

// ── RatingStats (admin) ──────────────────────────────────────────────────────

/// Per-store slice of the admin rating statistics.
#[derive(Debug)]
pub struct StoreRatingStats {
    pub store_id: Uuid,
    pub name: String,
    pub average: Option<f64>,
    pub count: u64,
}

/// System-wide rating statistics for the admin console.
#[derive(Debug)]
pub struct RatingStats {
    pub total: u64,
    pub store_ratings: Vec<StoreRatingStats>,
    pub distribution: [u64; 5],
}

pub struct RatingStatsUseCase<R: RatingRepository, S: StoreRepository> {
    pub ratings: R,
    pub stores: S,
}

impl<R: RatingRepository, S: StoreRepository> RatingStatsUseCase<R, S> {
    pub async fn execute(&self) -> Result<RatingStats, ApiError> {
        let values = self.ratings.all_values().await?;

        let stores = self.stores.list(&crate::domain::types::StoreFilter::default()).await?;
        let ids: Vec<Uuid> = stores.iter().map(|s| s.id).collect();
        let pairs = self.ratings.values_by_store(&ids).await?;

        let mut grouped: HashMap<Uuid, Vec<u8>> = HashMap::new();
        for (store_id, value) in pairs {
            grouped.entry(store_id).or_default().push(value);
        }

        let store_ratings = stores
            .into_iter()
            .map(|store| {
                let agg = store_aggregate(&grouped.remove(&store.id).unwrap_or_default());
                StoreRatingStats {
                    store_id: store.id,
                    name: store.name,
                    average: agg.average,
                    count: agg.count,
                }
            })
            .collect();

        Ok(RatingStats {
            total: values.len() as u64,
            store_ratings,
            distribution: distribution(&values),
        })
    }
}
