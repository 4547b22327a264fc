use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::{AppConfig, DocumentConfig, NotifierConfig};
use crate::repository::memory_store::MemoryStore;
use crate::router::app_router;
use crate::service::session_service::SessionServiceImpl;
use crate::service::workflow_service::WorkflowServiceImpl;
use crate::util::notifier::notifier_from_config;

pub struct App {
    config: AppConfig,
    router: Router,
    pub session_service: Arc<SessionServiceImpl>,
    pub workflow_service: Arc<WorkflowServiceImpl>,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env();
        let notifier_config = NotifierConfig::from_env()?;
        let document_config = DocumentConfig::from_env()?;

        let notifier = notifier_from_config(&notifier_config)?;
        let store = Arc::new(MemoryStore::new());
        let workflow_service = Arc::new(WorkflowServiceImpl::new(store, notifier, document_config));
        let session_service = Arc::new(SessionServiceImpl::new());

        let router = app_router(session_service.clone(), workflow_service.clone());
        Ok(App {
            config,
            router,
            session_service,
            workflow_service,
        })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr: SocketAddr = self.config.bind_address().parse()?;
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
