use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ratewise_auth::bearer::OptionalBearer;
use ratewise_domain::role::Role;

use crate::access::{ANY_ROLE, authorize};
use crate::domain::types::{User, UserFilter};
use crate::error::ApiError;
use crate::handlers::stores::StoreBody;
use crate::handlers::{UserBody, authenticate};
use crate::state::AppState;
use crate::usecase::dashboard::{
    AdminDashboardUseCase, OwnerDashboardUseCase, UserDashboardUseCase,
};
use crate::usecase::user::{
    ChangePasswordInput, ChangePasswordUseCase, CreateUserInput, CreateUserUseCase,
    DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, OwnedStoreInfo, UpdateProfileInput,
    UpdateProfileUseCase,
};

#[derive(Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub data: UserBody,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// User detail; `store_owner` accounts additionally carry their store with
/// its aggregate.
#[derive(Serialize)]
pub struct UserDetailBody {
    #[serde(flatten)]
    pub user: UserBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<OwnedStoreBody>,
}

#[derive(Serialize)]
pub struct OwnedStoreBody {
    #[serde(flatten)]
    pub store: StoreBody,
    #[serde(rename = "averageRating")]
    pub average_rating: Option<f64>,
    #[serde(rename = "ratingCount")]
    pub rating_count: u64,
}

fn detail_body(user: User, store: Option<OwnedStoreInfo>) -> UserDetailBody {
    UserDetailBody {
        user: user.into(),
        store: store.map(|info| OwnedStoreBody {
            average_rating: info.aggregate.average,
            rating_count: info.aggregate.count,
            store: info.store.into(),
        }),
    }
}

#[derive(Serialize)]
pub struct UserDetailResponse {
    pub success: bool,
    pub data: UserDetailBody,
}

// ── GET /api/users ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UserListQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: Option<Role>,
}

#[derive(Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<UserBody>,
}

pub async fn list_users(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<UserListResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, &[Role::Admin])?;

    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase
        .execute(&UserFilter {
            name: query.name,
            email: query.email,
            address: query.address,
            role: query.role,
        })
        .await?;
    let data: Vec<UserBody> = users.into_iter().map(Into::into).collect();
    Ok(Json(UserListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

// ── POST /api/users ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
    pub role: Role,
}

pub async fn create_user(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, &[Role::Admin])?;

    let usecase = CreateUserUseCase {
        users: state.user_repo(),
    };
    let created = usecase
        .execute(CreateUserInput {
            name: body.name,
            email: body.email,
            password: body.password,
            address: body.address,
            role: body.role,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            success: true,
            data: created.into(),
        }),
    ))
}

// ── GET /api/users/profile ───────────────────────────────────────────────────

pub async fn get_profile(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
) -> Result<Json<UserDetailResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, ANY_ROLE)?;

    let usecase = GetUserUseCase {
        users: state.user_repo(),
        stores: state.store_repo(),
        ratings: state.rating_repo(),
    };
    let (user, store) = usecase.execute(user.id).await?;
    Ok(Json(UserDetailResponse {
        success: true,
        data: detail_body(user, store),
    }))
}

// ── PUT /api/users/profile ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub address: Option<String>,
}

pub async fn update_profile(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, ANY_ROLE)?;

    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    let updated = usecase
        .execute(
            user.id,
            UpdateProfileInput {
                name: body.name,
                address: body.address,
            },
        )
        .await?;
    Ok(Json(UserResponse {
        success: true,
        data: updated.into(),
    }))
}

// ── PUT /api/users/password ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, ANY_ROLE)?;

    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            &user,
            ChangePasswordInput {
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "password updated".to_string(),
    }))
}

// ── GET /api/users/dashboard ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserDashboardBody {
    #[serde(rename = "totalStores")]
    pub total_stores: u64,
    #[serde(rename = "totalRatings")]
    pub total_ratings: u64,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
}

#[derive(Serialize)]
pub struct UserDashboardResponse {
    pub success: bool,
    pub data: UserDashboardBody,
}

pub async fn user_dashboard(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
) -> Result<Json<UserDashboardResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, ANY_ROLE)?;

    let usecase = UserDashboardUseCase {
        stores: state.store_repo(),
        ratings: state.rating_repo(),
    };
    let dashboard = usecase.execute(user.id).await?;
    Ok(Json(UserDashboardResponse {
        success: true,
        data: UserDashboardBody {
            total_stores: dashboard.total_stores,
            total_ratings: dashboard.total_ratings,
            average_rating: dashboard.average_rating,
        },
    }))
}

// ── GET /api/users/owner-dashboard ───────────────────────────────────────────

#[derive(Serialize)]
pub struct OwnerDashboardBody {
    #[serde(rename = "storeCount")]
    pub store_count: u64,
    #[serde(rename = "totalRatings")]
    pub total_ratings: u64,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    pub stores: Vec<crate::handlers::stores::StoreListBody>,
}

#[derive(Serialize)]
pub struct OwnerDashboardResponse {
    pub success: bool,
    pub data: OwnerDashboardBody,
}

pub async fn owner_dashboard(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
) -> Result<Json<OwnerDashboardResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, &[Role::StoreOwner])?;

    let usecase = OwnerDashboardUseCase {
        stores: state.store_repo(),
        ratings: state.rating_repo(),
    };
    let dashboard = usecase.execute(user.id).await?;
    Ok(Json(OwnerDashboardResponse {
        success: true,
        data: OwnerDashboardBody {
            store_count: dashboard.store_count,
            total_ratings: dashboard.total_ratings,
            average_rating: dashboard.average_rating,
            stores: dashboard.stores.into_iter().map(Into::into).collect(),
        },
    }))
}

// ── GET /api/users/admin/dashboard ───────────────────────────────────────────

#[derive(Serialize)]
pub struct UsersByRoleBody {
    pub user: u64,
    pub store_owner: u64,
    pub admin: u64,
}

#[derive(Serialize)]
pub struct AdminDashboardBody {
    #[serde(rename = "totalUsers")]
    pub total_users: u64,
    #[serde(rename = "totalStores")]
    pub total_stores: u64,
    #[serde(rename = "totalRatings")]
    pub total_ratings: u64,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    #[serde(rename = "usersByRole")]
    pub users_by_role: UsersByRoleBody,
}

#[derive(Serialize)]
pub struct AdminDashboardResponse {
    pub success: bool,
    pub data: AdminDashboardBody,
}

pub async fn admin_dashboard(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
) -> Result<Json<AdminDashboardResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, &[Role::Admin])?;

    let usecase = AdminDashboardUseCase {
        users: state.user_repo(),
        stores: state.store_repo(),
        ratings: state.rating_repo(),
    };
    let dashboard = usecase.execute().await?;
    Ok(Json(AdminDashboardResponse {
        success: true,
        data: AdminDashboardBody {
            total_users: dashboard.total_users,
            total_stores: dashboard.total_stores,
            total_ratings: dashboard.total_ratings,
            average_rating: dashboard.average_rating,
            users_by_role: UsersByRoleBody {
                user: dashboard.users_by_role.user,
                store_owner: dashboard.users_by_role.store_owner,
                admin: dashboard.users_by_role.admin,
            },
        },
    }))
}

// ── GET /api/users/{id} ──────────────────────────────────────────────────────

pub async fn get_user(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserDetailResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, &[Role::Admin])?;

    let usecase = GetUserUseCase {
        users: state.user_repo(),
        stores: state.store_repo(),
        ratings: state.rating_repo(),
    };
    let (target, store) = usecase.execute(id).await?;
    Ok(Json(UserDetailResponse {
        success: true,
        data: detail_body(target, store),
    }))
}

// ── DELETE /api/users/{id} ───────────────────────────────────────────────────

pub async fn delete_user(
    OptionalBearer(token): OptionalBearer,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user = authenticate(&state, token).await?;
    authorize(&user, &[Role::Admin])?;

    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
    };
    usecase.execute(id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "user deleted".to_string(),
    }))
}
