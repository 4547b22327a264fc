use axum::{extract::State, response::IntoResponse, Extension, Json};
use std::sync::Arc;

use crate::middlewares::session_middleware::ensure_role;
use crate::model::session::{Role, Session};
use crate::service::workflow_service::{WorkflowService, WorkflowServiceImpl};
use crate::util::error::HandlerError;

pub async fn sales_dashboard_handler(
    State(service): State<Arc<WorkflowServiceImpl>>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HandlerError> {
    ensure_role(&session, Role::Sales)?;
    Ok(Json(service.sales_dashboard().await?))
}

pub async fn finance_dashboard_handler(
    State(service): State<Arc<WorkflowServiceImpl>>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HandlerError> {
    ensure_role(&session, Role::Finance)?;
    Ok(Json(service.finance_dashboard().await?))
}
