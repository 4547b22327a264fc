use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::model::session::{Role, Session};
use crate::service::session_service::{SessionService, SessionServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};

pub struct SessionGuardState {
    pub session_service: Arc<SessionServiceImpl>,
}

/// Rejects requests made without an active session and hands the session
/// to the handler as a request extension.
pub async fn require_session(
    State(state): State<Arc<SessionGuardState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let session = match state.session_service.current().await {
        Some(s) => s,
        None => {
            warn!(path = %req.uri().path(), "Request without an active session");
            return Err(HandlerError::new(HandlerErrorKind::Unauthorized, "Login required"));
        }
    };

    debug!(user = %session.name, role = %session.role, "Session attached to request");
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

/// Role check for routes reserved to one team.
pub fn ensure_role(session: &Session, role: Role) -> Result<(), HandlerError> {
    if session.role != role {
        warn!(user = %session.name, role = %session.role, required = %role, "Role not allowed");
        return Err(HandlerError::new(
            HandlerErrorKind::Forbidden,
            format!("{} role required", role),
        ));
    }
    Ok(())
}
