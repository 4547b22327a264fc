use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use bytes::BytesMut;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::dto::draft_dto::DraftRequest;
use crate::dto::invoice_dto::{DocumentUpload, UpdatePaymentStatusRequest};
use crate::middlewares::session_middleware::ensure_role;
use crate::model::session::{Role, Session};
use crate::service::workflow_service::{WorkflowService, WorkflowServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};

pub async fn submit_invoice_request_handler(
    State(service): State<Arc<WorkflowServiceImpl>>,
    Extension(session): Extension<Session>,
    Json(payload): Json<DraftRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    ensure_role(&session, Role::Sales)?;
    if let Err(e) = payload.validate() {
        error!("[submit_invoice_request_handler] Validation failed: {}", e);
        return Err(HandlerError::validation(e));
    }

    let submission = service.submit_invoice_request(&session, payload).await?;
    info!("[submit_invoice_request_handler] Invoice request {} submitted", submission.record.id);
    Ok((StatusCode::CREATED, Json(submission.record)))
}

pub async fn list_invoices_handler(
    State(service): State<Arc<WorkflowServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(service.list_invoices().await?))
}

pub async fn pending_invoices_handler(
    State(service): State<Arc<WorkflowServiceImpl>>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HandlerError> {
    ensure_role(&session, Role::Finance)?;
    Ok(Json(service.pending_invoices().await?))
}

pub async fn uploaded_invoices_handler(
    State(service): State<Arc<WorkflowServiceImpl>>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HandlerError> {
    ensure_role(&session, Role::Finance)?;
    Ok(Json(service.uploaded_invoices().await?))
}

pub async fn get_invoice_handler(
    State(service): State<Arc<WorkflowServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(service.get_invoice(&id).await?))
}

/// Accepts a multipart form with a single `file` part holding the invoice PDF.
pub async fn upload_invoice_document_handler(
    State(service): State<Arc<WorkflowServiceImpl>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HandlerError> {
    ensure_role(&session, Role::Finance)?;
    info!("[upload_invoice_document_handler] Upload for invoice {}", id);

    let max_bytes = service.documents().max_upload_bytes;
    let mut upload: Option<DocumentUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();
        debug!("[upload_invoice_document_handler] Processing field: {}", name);
        if name != "file" {
            continue;
        }

        let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
        let content_type = field.content_type().map(|s| s.to_string()).unwrap_or_default();
        let mut buf = BytesMut::new();
        let mut stream = field;
        while let Some(chunk) = stream.chunk().await.map_err(multipart_error)? {
            buf.extend_from_slice(&chunk);
            if buf.len() > max_bytes {
                warn!("[upload_invoice_document_handler] File {} exceeds {} bytes", filename, max_bytes);
                return Err(HandlerError::new(
                    HandlerErrorKind::PayloadTooLarge,
                    format!("Document exceeds the {} byte limit", max_bytes),
                ));
            }
        }
        info!("[upload_invoice_document_handler] Received file: {} ({} bytes)", filename, buf.len());
        upload = Some(DocumentUpload {
            filename,
            content_type,
            content: buf.freeze(),
        });
    }

    let upload = match upload {
        Some(u) => u,
        None => {
            error!("[upload_invoice_document_handler] Missing file part");
            return Err(HandlerError::bad_request("Missing file part"));
        }
    };
    if upload.size() == 0 {
        return Err(HandlerError::bad_request("Uploaded document is empty"));
    }
    if !upload.is_pdf() {
        warn!("[upload_invoice_document_handler] Rejected non-PDF upload: {}", upload.filename);
        return Err(HandlerError::bad_request("Only PDF documents are accepted"));
    }

    let invoice = service.upload_invoice_document(&id, upload).await?;
    Ok(Json(invoice))
}

pub async fn set_payment_status_handler(
    State(service): State<Arc<WorkflowServiceImpl>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePaymentStatusRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    ensure_role(&session, Role::Finance)?;
    let invoice = service.set_payment_status(&id, payload.payment_status).await?;
    Ok(Json(invoice))
}

fn multipart_error(e: MultipartError) -> HandlerError {
    error!("[upload_invoice_document_handler] Multipart error: {}", e);
    let kind = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        HandlerErrorKind::PayloadTooLarge
    } else {
        HandlerErrorKind::BadRequest
    };
    HandlerError::new(kind, format!("Failed to read upload: {}", e.body_text()))
}
