use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::model::invoice::Invoice;
use crate::model::quotation::Quotation;

/// Both workflow collections, kept in insertion order.
#[derive(Debug, Default, Clone)]
pub struct Collections {
    pub quotations: Vec<Quotation>,
    pub invoices: Vec<Invoice>,
}

impl Collections {
    pub fn quotation_mut(&mut self, id: &str) -> Option<&mut Quotation> {
        self.quotations.iter_mut().find(|q| q.id == id)
    }

    pub fn invoice_mut(&mut self, id: &str) -> Option<&mut Invoice> {
        self.invoices.iter_mut().find(|i| i.id == id)
    }
}

/// Process-local store behind the quotation and invoice repositories.
///
/// A single lock covers both collections so that a quotation approval and
/// the invoice it creates become visible in the same step.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Creating in-memory workflow store");
        Self::default()
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.state.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.state.write().await
    }

    /// Consistent copy of both collections.
    pub async fn snapshot(&self) -> Collections {
        self.state.read().await.clone()
    }
}
