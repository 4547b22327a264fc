use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

use crate::dto::draft_dto::DraftRequest;
use crate::dto::invoice_dto::ApprovalResponse;
use crate::middlewares::session_middleware::ensure_role;
use crate::model::session::{Role, Session};
use crate::service::workflow_service::{WorkflowService, WorkflowServiceImpl};
use crate::util::error::HandlerError;

pub async fn submit_quotation_handler(
    State(service): State<Arc<WorkflowServiceImpl>>,
    Extension(session): Extension<Session>,
    Json(payload): Json<DraftRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    ensure_role(&session, Role::Sales)?;
    if let Err(e) = payload.validate() {
        error!("[submit_quotation_handler] Validation failed: {}", e);
        return Err(HandlerError::validation(e));
    }

    let submission = service.submit_quotation(&session, payload).await?;
    info!("[submit_quotation_handler] Quotation {} submitted", submission.record.id);
    Ok((StatusCode::CREATED, Json(submission.record)))
}

pub async fn list_quotations_handler(
    State(service): State<Arc<WorkflowServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotations = service.list_quotations().await?;
    Ok(Json(quotations))
}

pub async fn get_quotation_handler(
    State(service): State<Arc<WorkflowServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotation = service.get_quotation(&id).await?;
    Ok(Json(quotation))
}

pub async fn approve_quotation_handler(
    State(service): State<Arc<WorkflowServiceImpl>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    ensure_role(&session, Role::Sales)?;
    let (quotation, invoice) = service.approve_quotation(&id).await?;
    info!("[approve_quotation_handler] Quotation {} approved into {}", quotation.id, invoice.id);
    Ok(Json(ApprovalResponse { quotation, invoice }))
}
