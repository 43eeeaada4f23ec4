use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ratewise_auth::bearer::OptionalBearer;
use ratewise_domain::role::Role;

use crate::access::{ANY_ROLE, authorize};
use crate::domain::types::{Rating, StoreRating};
use crate::error::ApiError;
use crate::handlers::authenticate;
use crate::state::AppState;
use crate::usecase::rating::{
    ListUserRatingsUseCase, RatingStatsUseCase, SubmitRatingUseCase, UpdateRatingUseCase,
};

#[derive(Serialize)]
pub struct RatingBody {
    pub user_id: String,
    pub store_id: String,
    pub rating: u8,
    #[serde(
        rename = "createdAt",
        serialize_with = "ratewise_core::serde::to_rfc3339_ms"
    )]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(
        rename = "updatedAt",
        serialize_with = "ratewise_core::serde::to_rfc3339_ms"
    )]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Rating> for RatingBody {
    fn from(r: Rating) -> Self {
        Self {
            user_id: r.user_id.to_string(),
            store_id: r.store_id.to_string(),
            rating: r.value,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct RatingResponse {
    pub success: bool,
    pub data: RatingBody,
}

// ── POST /api/ratings ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitRatingRequest {
    pub store_id: Uuid,
    pub rating: u8,
}

pub async fn submit_rating(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
    Json(body): Json<SubmitRatingRequest>,
) -> Result<(StatusCode, Json<RatingResponse>), ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, ANY_ROLE)?;

    let usecase = SubmitRatingUseCase {
        ratings: state.rating_repo(),
        stores: state.store_repo(),
    };
    let rating = usecase.execute(user.id, body.store_id, body.rating).await?;
    Ok((
        StatusCode::CREATED,
        Json(RatingResponse {
            success: true,
            data: rating.into(),
        }),
    ))
}

// ── PUT /api/ratings/{store_id} ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRatingRequest {
    pub rating: u8,
}

pub async fn update_rating(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
    Json(body): Json<UpdateRatingRequest>,
) -> Result<Json<RatingResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, ANY_ROLE)?;

    let usecase = UpdateRatingUseCase {
        ratings: state.rating_repo(),
        stores: state.store_repo(),
    };
    let rating = usecase.execute(user.id, store_id, body.rating).await?;
    Ok(Json(RatingResponse {
        success: true,
        data: rating.into(),
    }))
}

// ── GET /api/ratings/user ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RatedStoreBody {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
}

#[derive(Serialize)]
pub struct UserRatingBody {
    pub rating: u8,
    pub store: RatedStoreBody,
    #[serde(
        rename = "createdAt",
        serialize_with = "ratewise_core::serde::to_rfc3339_ms"
    )]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(
        rename = "updatedAt",
        serialize_with = "ratewise_core::serde::to_rfc3339_ms"
    )]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<StoreRating> for UserRatingBody {
    fn from(r: StoreRating) -> Self {
        Self {
            rating: r.value,
            store: RatedStoreBody {
                id: r.store_id.to_string(),
                name: r.store_name,
                email: r.store_email,
                address: r.store_address,
            },
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct UserRatingsResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<UserRatingBody>,
}

pub async fn my_ratings(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
) -> Result<Json<UserRatingsResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, ANY_ROLE)?;

    let usecase = ListUserRatingsUseCase {
        ratings: state.rating_repo(),
    };
    let ratings = usecase.execute(user.id).await?;
    let data: Vec<UserRatingBody> = ratings.into_iter().map(Into::into).collect();
    Ok(Json(UserRatingsResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

// ── GET /api/ratings/stats ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StoreStatsBody {
    pub id: String,
    pub name: String,
    #[serde(rename = "averageRating")]
    pub average_rating: Option<f64>,
    #[serde(rename = "ratingCount")]
    pub rating_count: u64,
}

#[derive(Serialize)]
pub struct RatingStatsBody {
    #[serde(rename = "totalRatings")]
    pub total_ratings: u64,
    #[serde(rename = "storeRatings")]
    pub store_ratings: Vec<StoreStatsBody>,
    /// Count of ratings per value, keyed "1" through "5".
    #[serde(rename = "ratingDistribution")]
    pub rating_distribution: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize)]
pub struct RatingStatsResponse {
    pub success: bool,
    pub data: RatingStatsBody,
}

pub async fn rating_stats(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
) -> Result<Json<RatingStatsResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, &[Role::Admin])?;

    let usecase = RatingStatsUseCase {
        ratings: state.rating_repo(),
        stores: state.store_repo(),
    };
    let stats = usecase.execute().await?;

    let mut distribution = serde_json::Map::new();
    for (i, count) in stats.distribution.iter().enumerate() {
        distribution.insert((i + 1).to_string(), serde_json::json!(count));
    }

    Ok(Json(RatingStatsResponse {
        success: true,
        data: RatingStatsBody {
            total_ratings: stats.total,
            store_ratings: stats
                .store_ratings
                .into_iter()
                .map(|s| StoreStatsBody {
                    id: s.store_id.to_string(),
                    name: s.name,
                    average_rating: s.average,
                    rating_count: s.count,
                })
                .collect(),
            rating_distribution: distribution,
        },
    }))
}
