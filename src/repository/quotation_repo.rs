use crate::model::invoice::Invoice;
use crate::model::quotation::{Quotation, QuotationStatus};
use crate::repository::memory_store::MemoryStore;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};

#[async_trait]
pub trait QuotationRepository: Send + Sync {
    async fn create(&self, quote: Quotation) -> RepositoryResult<Quotation>;
    async fn get_by_id(&self, id: &str) -> RepositoryResult<Quotation>;
    async fn list(&self) -> RepositoryResult<Vec<Quotation>>;
    async fn count(&self) -> RepositoryResult<u64>;
    /// Attach generated document links to an existing quotation, whatever its status.
    async fn attach_documents(
        &self,
        id: &str,
        pdf_url: Option<String>,
        doc_url: Option<String>,
    ) -> RepositoryResult<Quotation>;
    /// Move a pending quotation to Approved and append the invoice derived from it.
    async fn approve_into_invoice(
        &self,
        id: &str,
        invoice_id: String,
        approved_at: DateTime<Utc>,
    ) -> RepositoryResult<(Quotation, Invoice)>;
}

pub struct InMemoryQuotationRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryQuotationRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        InMemoryQuotationRepository { store }
    }
}

#[async_trait]
impl QuotationRepository for InMemoryQuotationRepository {
    #[tracing::instrument(skip(self, quote), fields(id = %quote.id))]
    async fn create(&self, quote: Quotation) -> RepositoryResult<Quotation> {
        info!("Creating new quotation");
        let mut state = self.store.write().await;
        if state.quotations.iter().any(|q| q.id == quote.id) {
            error!("Quotation id already in use: {}", quote.id);
            return Err(RepositoryError::already_exists(format!("Quotation already exists: {}", quote.id)));
        }
        state.quotations.push(quote.clone());
        info!("Quotation created successfully");
        Ok(quote)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: &str) -> RepositoryResult<Quotation> {
        let state = self.store.read().await;
        match state.quotations.iter().find(|q| q.id == id) {
            Some(quote) => Ok(quote.clone()),
            None => {
                error!("Quotation not found for ID: {}", id);
                Err(RepositoryError::not_found(format!("Quotation not found for ID: {}", id)))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Quotation>> {
        let quotations = self.store.read().await.quotations.clone();
        info!("Fetched {} quotations", quotations.len());
        Ok(quotations)
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.store.read().await.quotations.len() as u64)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn attach_documents(
        &self,
        id: &str,
        pdf_url: Option<String>,
        doc_url: Option<String>,
    ) -> RepositoryResult<Quotation> {
        info!("Attaching document links to quotation");
        let mut state = self.store.write().await;
        let quote = state.quotation_mut(id).ok_or_else(|| {
            error!("No quotation found to attach documents for ID: {}", id);
            RepositoryError::not_found(format!("No quotation found for ID: {}", id))
        })?;
        if pdf_url.is_some() {
            quote.pdf_url = pdf_url;
        }
        if doc_url.is_some() {
            quote.doc_url = doc_url;
        }
        info!("Document links attached for ID: {}", id);
        Ok(quote.clone())
    }

    #[tracing::instrument(skip(self), fields(id = %id, invoice_id = %invoice_id))]
    async fn approve_into_invoice(
        &self,
        id: &str,
        invoice_id: String,
        approved_at: DateTime<Utc>,
    ) -> RepositoryResult<(Quotation, Invoice)> {
        info!("Approving quotation");
        let mut state = self.store.write().await;

        if state.invoices.iter().any(|i| i.id == invoice_id) {
            error!("Invoice id already in use: {}", invoice_id);
            return Err(RepositoryError::already_exists(format!("Invoice already exists: {}", invoice_id)));
        }

        let quote = state.quotation_mut(id).ok_or_else(|| {
            error!("No quotation found to approve for ID: {}", id);
            RepositoryError::not_found(format!("No quotation found for ID: {}", id))
        })?;
        if quote.status != QuotationStatus::Pending {
            error!(status = %quote.status, "Quotation is not pending");
            return Err(RepositoryError::invalid_transition(format!(
                "Quotation {} is {}, only Pending quotations can be approved",
                id, quote.status
            )));
        }

        quote.status = QuotationStatus::Approved;
        let approved = quote.clone();
        let invoice = Invoice::from_approved_quotation(invoice_id, &approved, approved_at);
        state.invoices.push(invoice.clone());

        info!("Quotation approved and converted into invoice {}", invoice.id);
        Ok((approved, invoice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::invoice_repo::{InMemoryInvoiceRepository, InvoiceRepository};

    fn quote(id: &str) -> Quotation {
        Quotation::pending(id.to_string(), "Acme".to_string(), vec![], "sam".to_string(), Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let repo = InMemoryQuotationRepository::new(Arc::new(MemoryStore::new()));
        repo.create(quote("QT-1")).await.unwrap();
        let err = repo.create(quote("QT-1")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_approve_is_single_shot() {
        let store = Arc::new(MemoryStore::new());
        let repo = InMemoryQuotationRepository::new(store.clone());
        let invoices = InMemoryInvoiceRepository::new(store);
        repo.create(quote("QT-1")).await.unwrap();
        repo.approve_into_invoice("QT-1", "INV-1".to_string(), Utc::now()).await.unwrap();

        let err = repo.approve_into_invoice("QT-1", "INV-2".to_string(), Utc::now()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidTransition(_)));
        assert_eq!(invoices.count().await.unwrap(), 1);
        assert_eq!(repo.get_by_id("QT-1").await.unwrap().status, QuotationStatus::Approved);
    }

    #[tokio::test]
    async fn test_attach_keeps_existing_links() {
        let repo = InMemoryQuotationRepository::new(Arc::new(MemoryStore::new()));
        repo.create(quote("QT-1")).await.unwrap();
        repo.attach_documents("QT-1", Some("pdf".to_string()), Some("doc".to_string())).await.unwrap();
        let updated = repo.attach_documents("QT-1", None, Some("doc-2".to_string())).await.unwrap();
        assert_eq!(updated.pdf_url.as_deref(), Some("pdf"));
        assert_eq!(updated.doc_url.as_deref(), Some("doc-2"));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let repo = InMemoryQuotationRepository::new(Arc::new(MemoryStore::new()));
        assert!(matches!(repo.get_by_id("QT-x").await, Err(RepositoryError::NotFound(_))));
        assert!(matches!(
            repo.approve_into_invoice("QT-x", "INV-x".to_string(), Utc::now()).await,
            Err(RepositoryError::NotFound(_))
        ));
    }
}
