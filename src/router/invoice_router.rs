use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::handler::invoice_handler::{
    get_invoice_handler,
    list_invoices_handler,
    pending_invoices_handler,
    set_payment_status_handler,
    submit_invoice_request_handler,
    upload_invoice_document_handler,
    uploaded_invoices_handler,
};
use crate::middlewares::session_middleware::{require_session, SessionGuardState};
use crate::service::workflow_service::WorkflowServiceImpl;

// Room for multipart boundaries and headers on top of the document itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn invoice_router(service: Arc<WorkflowServiceImpl>, guard: Arc<SessionGuardState>) -> Router {
    let body_limit = service.documents().max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/invoices", get(list_invoices_handler).post(submit_invoice_request_handler))
        .route("/invoices/pending", get(pending_invoices_handler))
        .route("/invoices/uploaded", get(uploaded_invoices_handler))
        .route("/invoices/{id}", get(get_invoice_handler))
        .route("/invoices/{id}/document", post(upload_invoice_document_handler))
        .route("/invoices/{id}/payment-status", put(set_payment_status_handler))
        .route_layer(middleware::from_fn_with_state(guard, require_session))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(service)
}
