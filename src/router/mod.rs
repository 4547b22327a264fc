pub mod session_router;
pub mod quotation_router;
pub mod invoice_router;
pub mod dashboard_router;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::middlewares::session_middleware::SessionGuardState;
use crate::service::session_service::SessionServiceImpl;
use crate::service::workflow_service::WorkflowServiceImpl;

/// Every route of the backend, sharing one session and one workflow.
pub fn app_router(session_service: Arc<SessionServiceImpl>, workflow: Arc<WorkflowServiceImpl>) -> Router {
    let guard = Arc::new(SessionGuardState {
        session_service: session_service.clone(),
    });

    Router::new()
        .merge(session_router::session_router(session_service))
        .merge(quotation_router::quotation_router(workflow.clone(), guard.clone()))
        .merge(invoice_router::invoice_router(workflow.clone(), guard.clone()))
        .merge(dashboard_router::dashboard_router(workflow, guard))
        .route("/health", get(|| async { "OK" }))
}
