//! `Authorization: Bearer` header extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;

const BEARER_PREFIX: &str = "Bearer ";

fn bearer_value(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
}

/// Bearer token that may be absent. Never rejects.
///
/// Every route uses this, including the protected ones: the missing-token
/// 401 comes from the authentication step downstream so that it carries the
/// same JSON error envelope as an invalid token. Public routes that enrich
/// the response for authenticated callers (e.g. the caller's own rating on
/// a store detail) read the `Option` directly.
#[derive(Debug, Clone)]
pub struct OptionalBearer(pub Option<String>);

impl<S> FromRequestParts<S> for OptionalBearer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract synchronously and return a 'static async move block to avoid
    // capturing the `Parts` borrow.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_value(parts);
        async move { Ok(Self(token)) }
    }
}
