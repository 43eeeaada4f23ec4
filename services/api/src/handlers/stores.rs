use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use ratewise_auth::bearer::OptionalBearer;
use ratewise_domain::role::Role;

use crate::access::authorize;
use crate::domain::types::{RaterRating, Store, StoreFilter, StorePatch};
use crate::error::ApiError;
use crate::handlers::authenticate;
use crate::state::AppState;
use crate::usecase::store::{
    CreateStoreInput, CreateStoreUseCase, DeleteStoreUseCase, GetStoreUseCase,
    ListOwnedStoresUseCase, ListStoresUseCase, StoreWithAggregate, UpdateStoreUseCase,
};

/// Distinguishes an absent field from an explicit `null` in PATCH-style
/// bodies: absent stays `None`, `null` becomes `Some(None)`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

#[derive(Serialize)]
pub struct StoreBody {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub hours: Option<String>,
    pub owner_id: Option<String>,
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

impl From<Store> for StoreBody {
    fn from(store: Store) -> Self {
        Self {
            id: store.id.to_string(),
            name: store.name,
            email: store.email,
            address: store.address,
            description: store.description,
            contact: store.contact,
            hours: store.hours,
            owner_id: store.owner_id.map(|id| id.to_string()),
            created_at: store.created_at,
            updated_at: store.updated_at,
        }
    }
}

/// Store plus its read-time aggregate, as returned by list endpoints.
#[derive(Serialize)]
pub struct StoreListBody {
    #[serde(flatten)]
    pub store: StoreBody,
    #[serde(rename = "averageRating")]
    pub average_rating: Option<f64>,
    #[serde(rename = "ratingCount")]
    pub rating_count: u64,
}

impl From<StoreWithAggregate> for StoreListBody {
    fn from(s: StoreWithAggregate) -> Self {
        Self {
            store: s.store.into(),
            average_rating: s.aggregate.average,
            rating_count: s.aggregate.count,
        }
    }
}

#[derive(Serialize)]
pub struct StoreListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<StoreListBody>,
}

fn list_response(stores: Vec<StoreWithAggregate>) -> StoreListResponse {
    let data: Vec<StoreListBody> = stores.into_iter().map(Into::into).collect();
    StoreListResponse {
        success: true,
        count: data.len(),
        data,
    }
}

// ── GET /api/stores ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StoreListQuery {
    pub name: Option<String>,
    pub address: Option<String>,
}

pub async fn list_stores(
    State(state): State<AppState>,
    Query(query): Query<StoreListQuery>,
) -> Result<Json<StoreListResponse>, ApiError> {
    let usecase = ListStoresUseCase {
        stores: state.store_repo(),
        ratings: state.rating_repo(),
    };
    let stores = usecase
        .execute(&StoreFilter {
            name: query.name,
            address: query.address,
        })
        .await?;
    Ok(Json(list_response(stores)))
}

// ── GET /api/stores/owner ────────────────────────────────────────────────────

pub async fn owned_stores(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
) -> Result<Json<StoreListResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, &[Role::StoreOwner])?;

    let usecase = ListOwnedStoresUseCase {
        stores: state.store_repo(),
        ratings: state.rating_repo(),
    };
    let stores = usecase.execute(user.id).await?;
    Ok(Json(list_response(stores)))
}

// ── GET /api/stores/{id} ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RaterBody {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct StoreRatingBody {
    pub rating: u8,
    pub user: RaterBody,
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

impl From<RaterRating> for StoreRatingBody {
    fn from(r: RaterRating) -> Self {
        Self {
            rating: r.value,
            user: RaterBody {
                id: r.rater_id.to_string(),
                name: r.rater_name,
                email: r.rater_email,
            },
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct OwnerBody {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct StoreDetailBody {
    #[serde(flatten)]
    pub store: StoreBody,
    #[serde(rename = "averageRating")]
    pub average_rating: Option<f64>,
    #[serde(rename = "ratingCount")]
    pub rating_count: u64,
    /// The caller's own rating; null for anonymous callers or callers who
    /// have not rated this store.
    #[serde(rename = "userRating")]
    pub user_rating: Option<u8>,
    pub owner: Option<OwnerBody>,
    pub ratings: Vec<StoreRatingBody>,
}

#[derive(Serialize)]
pub struct StoreDetailResponse {
    pub success: bool,
    pub data: StoreDetailBody,
}

pub async fn get_store(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StoreDetailResponse>, ApiError> {
    // Invalid or stale tokens do not fail this public route; the response is
    // simply not personalized.
    let caller = match token {
        Some(token) => authenticate(&state, Some(token)).await.ok().map(|u| u.id),
        None => None,
    };

    let usecase = GetStoreUseCase {
        stores: state.store_repo(),
        ratings: state.rating_repo(),
        users: state.user_repo(),
    };
    let detail = usecase.execute(id, caller).await?;
    Ok(Json(StoreDetailResponse {
        success: true,
        data: StoreDetailBody {
            average_rating: detail.aggregate.average,
            rating_count: detail.aggregate.count,
            user_rating: detail.user_rating,
            owner: detail.owner.map(|o| OwnerBody {
                id: o.id.to_string(),
                name: o.name,
                email: o.email,
            }),
            ratings: detail.ratings.into_iter().map(Into::into).collect(),
            store: detail.store.into(),
        },
    }))
}

// ── POST /api/stores ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
    pub email: String,
    pub address: String,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub hours: Option<String>,
    pub owner_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct StoreResponse {
    pub success: bool,
    pub data: StoreBody,
}

pub async fn create_store(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
    Json(body): Json<CreateStoreRequest>,
) -> Result<(StatusCode, Json<StoreResponse>), ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, &[Role::Admin])?;

    let usecase = CreateStoreUseCase {
        stores: state.store_repo(),
        users: state.user_repo(),
    };
    let store = usecase
        .execute(CreateStoreInput {
            name: body.name,
            email: body.email,
            address: body.address,
            description: body.description,
            contact: body.contact,
            hours: body.hours,
            owner_id: body.owner_id,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(StoreResponse {
            success: true,
            data: store.into(),
        }),
    ))
}

// ── PUT /api/stores/{id} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStoreRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub contact: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub hours: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub owner_id: Option<Option<Uuid>>,
}

pub async fn update_store(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStoreRequest>,
) -> Result<Json<StoreResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, &[Role::Admin])?;

    let usecase = UpdateStoreUseCase {
        stores: state.store_repo(),
        users: state.user_repo(),
    };
    let store = usecase
        .execute(
            id,
            StorePatch {
                name: body.name,
                email: body.email,
                address: body.address,
                description: body.description,
                contact: body.contact,
                hours: body.hours,
                owner_id: body.owner_id,
            },
        )
        .await?;
    Ok(Json(StoreResponse {
        success: true,
        data: store.into(),
    }))
}

// ── DELETE /api/stores/{id} ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

pub async fn delete_store(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, &[Role::Admin])?;

    let usecase = DeleteStoreUseCase {
        stores: state.store_repo(),
    };
    usecase.execute(id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "store deleted".to_string(),
    }))
}
