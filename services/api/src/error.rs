use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use ratewise_domain::role::Role;
use ratewise_domain::validate::FieldError;

/// API domain error variants.
///
/// Every variant maps to the `{"success": false, "message": ...}` envelope at
/// the HTTP boundary; validation failures additionally carry a field-level
/// `errors` array. Nothing is retried — the client resubmits.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("not authorized to access this route")]
    Unauthorized,
    #[error("role {role} is not authorized to access this route; required roles: {required}")]
    Forbidden { role: Role, required: String },
    #[error("user not found")]
    UserNotFound,
    #[error("store not found")]
    StoreNotFound,
    #[error("rating not found")]
    RatingNotFound,
    #[error("user with this email already exists")]
    EmailTaken,
    #[error("store already rated; use the update endpoint to change your rating")]
    AlreadyRated,
    #[error("the provided user is not a store owner")]
    OwnerNotEligible,
    #[error("admin accounts cannot be deleted")]
    AdminProtected,
    #[error("server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::StoreNotFound => "STORE_NOT_FOUND",
            Self::RatingNotFound => "RATING_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::AlreadyRated => "ALREADY_RATED",
            Self::OwnerNotEligible => "OWNER_NOT_ELIGIBLE",
            Self::AdminProtected => "ADMIN_PROTECTED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::OwnerNotEligible | Self::AdminProtected => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::StoreNotFound | Self::RatingNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::EmailTaken | Self::AlreadyRated => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Log 500s only — TraceLayer already records method/uri/status for
        // every request, and 4xx are expected client errors.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = match &self {
            Self::Validation(errors) => {
                // Surface the first field message as the envelope message so
                // simple clients can display something without parsing the
                // errors array.
                let message = errors
                    .first()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| self.to_string());
                serde_json::json!({
                    "success": false,
                    "message": message,
                    "errors": errors,
                })
            }
            _ => serde_json::json!({
                "success": false,
                "message": self.to_string(),
            }),
        };
        (status, axum::Json(body)).into_response()
    }
}
