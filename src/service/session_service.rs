use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::model::session::{Role, Session};
use crate::util::error::ServiceError;

#[async_trait]
pub trait SessionService: Send + Sync {
    async fn login(&self, role: Role, username: &str) -> Result<Session, ServiceError>;
    async fn logout(&self);
    async fn current(&self) -> Option<Session>;
}

/// Holds the single active session of this client.
#[derive(Default)]
pub struct SessionServiceImpl {
    session: RwLock<Option<Session>>,
}

impl SessionServiceImpl {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionService for SessionServiceImpl {
    #[instrument(skip(self), fields(role = %role))]
    async fn login(&self, role: Role, username: &str) -> Result<Session, ServiceError> {
        let name = username.trim();
        if name.is_empty() {
            warn!("Login attempted without a username");
            return Err(ServiceError::InvalidInput("Username is required".to_string()));
        }

        let session = Session {
            name: name.to_string(),
            role,
        };
        let previous = self.session.write().await.replace(session.clone());
        if let Some(previous) = previous {
            info!(previous = %previous.name, "Replacing active session");
        }
        info!(user = %session.name, "User logged in");
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn logout(&self) {
        match self.session.write().await.take() {
            Some(session) => info!(user = %session.name, "User logged out"),
            None => info!("Logout requested with no active session"),
        }
    }

    async fn current(&self) -> Option<Session> {
        self.session.read().await.clone()
    }
}
