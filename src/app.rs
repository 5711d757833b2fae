use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::get_reports).post(handlers::post_report),
        )
        .route("/api/reports/:date/view", get(handlers::get_report_view))
        .route(
            "/api/issues",
            get(handlers::get_issues).post(handlers::post_issue),
        )
        .route("/api/issues/:id", put(handlers::put_issue))
        .route(
            "/api/resources",
            get(handlers::get_resources).post(handlers::post_resource),
        )
        .route(
            "/api/projects",
            get(handlers::get_projects).post(handlers::post_project),
        )
        .route("/api/projects/:id", delete(handlers::remove_project))
        .with_state(state)
}
