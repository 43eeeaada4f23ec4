use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use ratewise_core::health::{healthz, readyz};
use ratewise_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{login, register},
    ratings::{my_ratings, rating_stats, submit_rating, update_rating},
    stores::{create_store, delete_store, get_store, list_stores, owned_stores, update_store},
    users::{
        admin_dashboard, change_password, create_user, delete_user, get_profile, get_user,
        list_users, owner_dashboard, update_profile, user_dashboard,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Stores
        .route("/api/stores", get(list_stores))
        .route("/api/stores", post(create_store))
        .route("/api/stores/owner", get(owned_stores))
        .route("/api/stores/{id}", get(get_store))
        .route("/api/stores/{id}", put(update_store))
        .route("/api/stores/{id}", delete(delete_store))
        // Ratings
        .route("/api/ratings", post(submit_rating))
        .route("/api/ratings/user", get(my_ratings))
        .route("/api/ratings/stats", get(rating_stats))
        .route("/api/ratings/{store_id}", put(update_rating))
        // Users
        .route("/api/users", get(list_users))
        .route("/api/users", post(create_user))
        .route("/api/users/profile", get(get_profile))
        .route("/api/users/profile", put(update_profile))
        .route("/api/users/password", put(change_password))
        .route("/api/users/dashboard", get(user_dashboard))
        .route("/api/users/owner-dashboard", get(owner_dashboard))
        .route("/api/users/admin/dashboard", get(admin_dashboard))
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}", delete(delete_user))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
