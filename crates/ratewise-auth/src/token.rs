//! JWT access-token issue and validation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ratewise_domain::role::Role;

/// Access-token lifetime in seconds (30 days).
pub const TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub role: Role,
    pub exp: u64,
}

/// Errors returned by [`validate_token`] and [`issue_token`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to encode token")]
    Encode,
}

/// JWT claims payload.
///
/// | Field  | JWT claim | Rust type | Meaning |
/// |--------|-----------|-----------|---------|
/// | `sub`  | `sub`     | UUID string | user ID |
/// | `role` | custom    | `u8` wire value | see [`Role`] |
/// | `exp`  | `exp`     | seconds since epoch | token expiration |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub role: u8,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Issue a signed access token for the user. Returns the token and its
/// expiry timestamp.
pub fn issue_token(user_id: Uuid, role: Role, secret: &str) -> Result<(String, u64), TokenError> {
    let exp = now_secs() + TOKEN_TTL_SECS;
    let claims = JwtClaims {
        sub: user_id.to_string(),
        role: role.as_u8(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| TokenError::Encode)?;
    Ok((token, exp))
}

/// Decode and validate an access token, returning the caller's identity.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s tolerates clock skew between hosts.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenInfo, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    let user_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;
    let role = Role::from_u8(data.claims.role).ok_or(TokenError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        role,
        exp: data.claims.exp,
    })
}
