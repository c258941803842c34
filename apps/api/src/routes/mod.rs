pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::render;
use crate::resumes;
use crate::state::AppState;
use crate::users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Users
        .route("/api/v1/users", post(users::handlers::handle_register))
        .route(
            "/api/v1/users/:id",
            get(users::handlers::handle_get_user).put(users::handlers::handle_update_user),
        )
        // Resumes
        .route(
            "/api/v1/resumes",
            get(resumes::handlers::handle_list_resumes)
                .post(resumes::handlers::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handlers::handle_get_resume)
                .put(resumes::handlers::handle_update_resume)
                .delete(resumes::handlers::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/download",
            get(render::handlers::handle_download_resume),
        )
        // Activity feed
        .route(
            "/api/v1/activities/recent",
            get(resumes::handlers::handle_recent_activities),
        )
        .with_state(state)
}
