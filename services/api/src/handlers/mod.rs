pub mod auth;
pub mod ratings;
pub mod stores;
pub mod users;

use serde::Serialize;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::auth::AuthenticateUseCase;

/// Resolve the bearer token (if any) to its account, 401 otherwise.
///
/// Handlers take `OptionalBearer` and call this so that a missing header
/// produces the same error envelope as an invalid or stale token.
pub(crate) async fn authenticate(
    state: &AppState,
    token: Option<String>,
) -> Result<User, ApiError> {
    let token = token.ok_or(ApiError::Unauthorized)?;
    AuthenticateUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    }
    .execute(&token)
    .await
}

/// Public account representation. Entity attributes stay snake_case
/// (matching the stored columns), timestamps are camelCase.
#[derive(Serialize)]
pub struct UserBody {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub role: ratewise_domain::role::Role,
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

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            address: user.address,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
