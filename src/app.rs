use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/visit", post(handlers::record_visit).get(handlers::get_visits))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/admin", get(handlers::admin_page))
        .route("/admin/visits", get(handlers::admin_visits))
        .with_state(state)
}
