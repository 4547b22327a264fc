use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

use crate::dto::session_dto::{LoginRequest, SessionResponse};
use crate::service::session_service::{SessionService, SessionServiceImpl};
use crate::util::error::HandlerError;

pub async fn login_handler(
    State(service): State<Arc<SessionServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[login_handler] Login requested for role {}", payload.role);
    if let Err(e) = payload.validate() {
        error!("[login_handler] Validation failed: {}", e);
        return Err(HandlerError::validation(e));
    }

    let session = service.login(payload.role, &payload.username).await?;
    Ok((StatusCode::OK, Json(SessionResponse::from(Some(session)))))
}

pub async fn logout_handler(State(service): State<Arc<SessionServiceImpl>>) -> impl IntoResponse {
    service.logout().await;
    StatusCode::NO_CONTENT
}

pub async fn current_session_handler(State(service): State<Arc<SessionServiceImpl>>) -> impl IntoResponse {
    Json(SessionResponse::from(service.current().await))
}
