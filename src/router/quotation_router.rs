use axum::{routing::{get, post}, middleware, Router};
use std::sync::Arc;

use crate::handler::quotation_handler::{
    approve_quotation_handler,
    get_quotation_handler,
    list_quotations_handler,
    submit_quotation_handler,
};
use crate::middlewares::session_middleware::{require_session, SessionGuardState};
use crate::service::workflow_service::WorkflowServiceImpl;

pub fn quotation_router(service: Arc<WorkflowServiceImpl>, guard: Arc<SessionGuardState>) -> Router {
    Router::new()
        .route("/quotations", get(list_quotations_handler).post(submit_quotation_handler))
        .route("/quotations/{id}", get(get_quotation_handler))
        .route("/quotations/{id}/approve", post(approve_quotation_handler))
        .route_layer(middleware::from_fn_with_state(guard, require_session))
        .with_state(service)
}
