use crate::model::invoice::{Invoice, InvoiceStatus, PaymentStatus};
use crate::repository::memory_store::MemoryStore;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn create(&self, invoice: Invoice) -> RepositoryResult<Invoice>;
    async fn get_by_id(&self, id: &str) -> RepositoryResult<Invoice>;
    async fn list(&self) -> RepositoryResult<Vec<Invoice>>;
    async fn list_by_status(&self, status: InvoiceStatus) -> RepositoryResult<Vec<Invoice>>;
    async fn count(&self) -> RepositoryResult<u64>;
    async fn mark_uploaded(
        &self,
        id: &str,
        pdf_link: String,
        uploaded_at: DateTime<Utc>,
    ) -> RepositoryResult<Invoice>;
    async fn update_payment_status(&self, id: &str, status: PaymentStatus) -> RepositoryResult<Invoice>;
}

pub struct InMemoryInvoiceRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryInvoiceRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        InMemoryInvoiceRepository { store }
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    #[tracing::instrument(skip(self, invoice), fields(id = %invoice.id))]
    async fn create(&self, invoice: Invoice) -> RepositoryResult<Invoice> {
        info!("Creating new invoice");
        let mut state = self.store.write().await;
        if state.invoices.iter().any(|i| i.id == invoice.id) {
            error!("Invoice id already in use: {}", invoice.id);
            return Err(RepositoryError::already_exists(format!("Invoice already exists: {}", invoice.id)));
        }
        state.invoices.push(invoice.clone());
        info!("Invoice created successfully");
        Ok(invoice)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: &str) -> RepositoryResult<Invoice> {
        let state = self.store.read().await;
        match state.invoices.iter().find(|i| i.id == id) {
            Some(invoice) => Ok(invoice.clone()),
            None => {
                error!("Invoice not found for ID: {}", id);
                Err(RepositoryError::not_found(format!("Invoice not found for ID: {}", id)))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Invoice>> {
        let invoices = self.store.read().await.invoices.clone();
        info!("Fetched {} invoices", invoices.len());
        Ok(invoices)
    }

    #[tracing::instrument(skip(self), fields(status = %status))]
    async fn list_by_status(&self, status: InvoiceStatus) -> RepositoryResult<Vec<Invoice>> {
        let state = self.store.read().await;
        let invoices: Vec<Invoice> = state.invoices.iter().filter(|i| i.status == status).cloned().collect();
        info!("Fetched {} {} invoices", invoices.len(), status);
        Ok(invoices)
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.store.read().await.invoices.len() as u64)
    }

    #[tracing::instrument(skip(self, pdf_link), fields(id = %id))]
    async fn mark_uploaded(
        &self,
        id: &str,
        pdf_link: String,
        uploaded_at: DateTime<Utc>,
    ) -> RepositoryResult<Invoice> {
        info!("Marking invoice document as uploaded");
        let mut state = self.store.write().await;
        let invoice = state.invoice_mut(id).ok_or_else(|| {
            error!("No invoice found to upload for ID: {}", id);
            RepositoryError::not_found(format!("No invoice found for ID: {}", id))
        })?;
        if invoice.status != InvoiceStatus::Waiting {
            error!(status = %invoice.status, "Invoice is not waiting for a document");
            return Err(RepositoryError::invalid_transition(format!(
                "Invoice {} is {}, documents can only be uploaded while Waiting",
                id, invoice.status
            )));
        }
        invoice.status = InvoiceStatus::Uploaded;
        invoice.uploaded_date = Some(uploaded_at);
        invoice.invoice_pdf_link = Some(pdf_link);
        info!("Invoice document uploaded for ID: {}", id);
        Ok(invoice.clone())
    }

    #[tracing::instrument(skip(self), fields(id = %id, status = %status))]
    async fn update_payment_status(&self, id: &str, status: PaymentStatus) -> RepositoryResult<Invoice> {
        info!("Updating invoice payment status");
        let mut state = self.store.write().await;
        let invoice = state.invoice_mut(id).ok_or_else(|| {
            error!("No invoice found to update payment status for ID: {}", id);
            RepositoryError::not_found(format!("No invoice found for ID: {}", id))
        })?;
        invoice.payment_status = status;
        info!("Payment status updated successfully for ID: {}", id);
        Ok(invoice.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> InMemoryInvoiceRepository {
        InMemoryInvoiceRepository::new(Arc::new(MemoryStore::new()))
    }

    fn invoice(id: &str) -> Invoice {
        Invoice::requested(id.to_string(), "Acme".to_string(), vec![], "sam".to_string(), Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_upload_only_once() {
        let repo = repo();
        repo.create(invoice("INV-REQ-1")).await.unwrap();
        let uploaded = repo.mark_uploaded("INV-REQ-1", "#a.pdf".to_string(), Utc::now()).await.unwrap();
        assert_eq!(uploaded.status, InvoiceStatus::Uploaded);
        assert!(uploaded.uploaded_date.is_some());

        let err = repo.mark_uploaded("INV-REQ-1", "#b.pdf".to_string(), Utc::now()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidTransition(_)));
        let stored = repo.get_by_id("INV-REQ-1").await.unwrap();
        assert_eq!(stored.invoice_pdf_link.as_deref(), Some("#a.pdf"));
    }

    #[tokio::test]
    async fn test_payment_status_moves_freely() {
        let repo = repo();
        repo.create(invoice("INV-REQ-1")).await.unwrap();
        for status in [PaymentStatus::Paid, PaymentStatus::Unpaid, PaymentStatus::PartiallyPaid, PaymentStatus::Paid] {
            let updated = repo.update_payment_status("INV-REQ-1", status).await.unwrap();
            assert_eq!(updated.payment_status, status);
            assert_eq!(updated.status, InvoiceStatus::Waiting);
        }
    }

    #[tokio::test]
    async fn test_list_by_status_keeps_order() {
        let repo = repo();
        for id in ["A", "B", "C"] {
            repo.create(invoice(id)).await.unwrap();
        }
        repo.mark_uploaded("B", "#b.pdf".to_string(), Utc::now()).await.unwrap();
        let waiting: Vec<String> = repo.list_by_status(InvoiceStatus::Waiting).await.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(waiting, vec!["A", "C"]);
        let uploaded = repo.list_by_status(InvoiceStatus::Uploaded).await.unwrap();
        assert_eq!(uploaded.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let repo = repo();
        assert!(matches!(repo.update_payment_status("nope", PaymentStatus::Paid).await, Err(RepositoryError::NotFound(_))));
        assert!(matches!(repo.mark_uploaded("nope", "#x".to_string(), Utc::now()).await, Err(RepositoryError::NotFound(_))));
    }
}
