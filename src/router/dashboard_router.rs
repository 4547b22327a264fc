use axum::{routing::get, middleware, Router};
use std::sync::Arc;

use crate::handler::dashboard_handler::{finance_dashboard_handler, sales_dashboard_handler};
use crate::middlewares::session_middleware::{require_session, SessionGuardState};
use crate::service::workflow_service::WorkflowServiceImpl;

pub fn dashboard_router(service: Arc<WorkflowServiceImpl>, guard: Arc<SessionGuardState>) -> Router {
    Router::new()
        .route("/dashboard/sales", get(sales_dashboard_handler))
        .route("/dashboard/finance", get(finance_dashboard_handler))
        .route_layer(middleware::from_fn_with_state(guard, require_session))
        .with_state(service)
}
