use chrono::Utc;
use uuid::Uuid;

use ratewise_auth::password::{hash_password, verify_password};
use ratewise_auth::token::issue_token;
use ratewise_domain::role::Role;
use ratewise_domain::validate;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;

/// A user plus the freshly issued access token for them.
#[derive(Debug)]
pub struct AuthOutput {
    pub user: User,
    pub token: String,
}

fn issue_for(user: User, jwt_secret: &str) -> Result<AuthOutput, ApiError> {
    let (token, _exp) =
        issue_token(user.id, user.role, jwt_secret).map_err(|e| ApiError::Internal(e.into()))?;
    Ok(AuthOutput { user, token })
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> RegisterUseCase<U> {
    /// Self-service registration always yields the `user` role; elevated
    /// roles are assigned only through the admin create path.
    pub async fn execute(&self, input: RegisterInput) -> Result<AuthOutput, ApiError> {
        let errors: Vec<_> = [
            validate::registration_name(&input.name),
            validate::email(&input.email),
            validate::password(&input.password),
            validate::address(&input.address),
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
            address: Some(input.address),
            role: Role::User,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        issue_for(user, &self.jwt_secret)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    /// Unknown email and wrong password produce the identical error so the
    /// endpoint cannot be used to enumerate accounts.
    pub async fn execute(&self, input: LoginInput) -> Result<AuthOutput, ApiError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        let matches = verify_password(&input.password, &user.password_hash)
            .map_err(|e| ApiError::Internal(e.into()))?;
        if !matches {
            return Err(ApiError::InvalidCredentials);
        }
        issue_for(user, &self.jwt_secret)
    }
}

// ── Authenticate (bearer token → user) ───────────────────────────────────────

pub struct AuthenticateUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> AuthenticateUseCase<U> {
    /// Resolve a bearer token to its account. A valid signature is not
    /// enough: the referenced user must still exist.
    pub async fn execute(&self, token: &str) -> Result<User, ApiError> {
        let info = ratewise_auth::token::validate_token(token, &self.jwt_secret)
            .map_err(|_| ApiError::Unauthorized)?;
        self.users
            .find_by_id(info.user_id)
            .await?
            .ok_or(ApiError::Unauthorized)
    }
}
