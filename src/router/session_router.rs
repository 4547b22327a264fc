use axum::{routing::{get, post}, Router};
use std::sync::Arc;

use crate::handler::session_handler::{current_session_handler, login_handler, logout_handler};
use crate::service::session_service::SessionServiceImpl;

pub fn session_router(service: Arc<SessionServiceImpl>) -> Router {
    Router::new()
        .route("/session", get(current_session_handler))
        .route("/session/login", post(login_handler))
        .route("/session/logout", post(logout_handler))
        .with_state(service)
}
