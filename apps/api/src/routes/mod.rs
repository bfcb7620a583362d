pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::entries::handlers as entry_handlers;
use crate::funfacts;
use crate::leaderboard;
use crate::profiles;
use crate::session::handlers as session_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Identity
        .route("/api/v1/auth/signin", post(session_handlers::handle_sign_in))
        .route("/api/v1/auth/signup", post(session_handlers::handle_sign_up))
        .route(
            "/api/v1/auth/signout",
            post(session_handlers::handle_sign_out),
        )
        .route("/api/v1/auth/session", get(session_handlers::handle_session))
        // Entries + derived statistics
        .route("/api/v1/entries", get(entry_handlers::handle_list_entries))
        .route("/api/v1/entries", post(entry_handlers::handle_create_entry))
        .route(
            "/api/v1/entries/:id",
            delete(entry_handlers::handle_delete_entry),
        )
        .route("/api/v1/stats", get(entry_handlers::handle_stats))
        // Profile
        .route("/api/v1/profile", get(profiles::handle_get_profile))
        .route("/api/v1/profile", patch(profiles::handle_update_profile))
        // Public extras
        .route("/api/v1/leaderboard", get(leaderboard::handle_leaderboard))
        .route("/api/v1/funfact", get(funfacts::handle_fun_fact))
        .with_state(state)
}
