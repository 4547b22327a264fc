use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::config::DocumentConfig;
use crate::dto::draft_dto::DraftRequest;
use crate::dto::invoice_dto::DocumentUpload;
use crate::model::dashboard::{FinanceDashboard, SalesDashboard};
use crate::model::invoice::{Invoice, InvoiceStatus, PaymentStatus};
use crate::model::quotation::Quotation;
use crate::model::session::Session;
use crate::repository::invoice_repo::{InMemoryInvoiceRepository, InvoiceRepository};
use crate::repository::memory_store::MemoryStore;
use crate::repository::quotation_repo::{InMemoryQuotationRepository, QuotationRepository};
use crate::service::notification_service::{NotificationDispatcher, Submission};
use crate::util::error::ServiceError;
use crate::util::notifier::DocumentNotifier;

#[async_trait]
pub trait WorkflowService: Send + Sync {
    // Quotations
    async fn submit_quotation(&self, session: &Session, draft: DraftRequest) -> Result<Submission<Quotation>, ServiceError>;
    async fn approve_quotation(&self, id: &str) -> Result<(Quotation, Invoice), ServiceError>;
    async fn attach_quotation_documents(
        &self,
        id: &str,
        pdf_url: Option<String>,
        doc_url: Option<String>,
    ) -> Result<Quotation, ServiceError>;
    async fn get_quotation(&self, id: &str) -> Result<Quotation, ServiceError>;
    async fn list_quotations(&self) -> Result<Vec<Quotation>, ServiceError>;

    // Invoices
    async fn submit_invoice_request(&self, session: &Session, draft: DraftRequest) -> Result<Submission<Invoice>, ServiceError>;
    async fn upload_invoice_document(&self, id: &str, upload: DocumentUpload) -> Result<Invoice, ServiceError>;
    async fn set_payment_status(&self, id: &str, status: PaymentStatus) -> Result<Invoice, ServiceError>;
    async fn get_invoice(&self, id: &str) -> Result<Invoice, ServiceError>;
    async fn list_invoices(&self) -> Result<Vec<Invoice>, ServiceError>;
    async fn pending_invoices(&self) -> Result<Vec<Invoice>, ServiceError>;
    async fn uploaded_invoices(&self) -> Result<Vec<Invoice>, ServiceError>;

    // Dashboards
    async fn sales_dashboard(&self) -> Result<SalesDashboard, ServiceError>;
    async fn finance_dashboard(&self) -> Result<FinanceDashboard, ServiceError>;
}

/// Sole owner of the quotation and invoice collections.
pub struct WorkflowServiceImpl {
    pub quotation_repo: Arc<InMemoryQuotationRepository>,
    pub invoice_repo: Arc<InMemoryInvoiceRepository>,
    store: Arc<MemoryStore>,
    dispatcher: NotificationDispatcher,
    documents: DocumentConfig,
}

impl WorkflowServiceImpl {
    pub fn new(store: Arc<MemoryStore>, notifier: Arc<dyn DocumentNotifier>, documents: DocumentConfig) -> Self {
        let quotation_repo = Arc::new(InMemoryQuotationRepository::new(store.clone()));
        let invoice_repo = Arc::new(InMemoryInvoiceRepository::new(store.clone()));
        let dispatcher = NotificationDispatcher::new(notifier, quotation_repo.clone());
        WorkflowServiceImpl {
            quotation_repo,
            invoice_repo,
            store,
            dispatcher,
            documents,
        }
    }

    pub fn documents(&self) -> &DocumentConfig {
        &self.documents
    }

    fn new_id(prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4().simple())
    }

    fn total_overflow() -> ServiceError {
        error!("Line item total does not fit in a decimal amount");
        ServiceError::InvalidInput("Line item total is too large".to_string())
    }

    fn check_draft(draft: &DraftRequest) -> Result<(), ServiceError> {
        draft.validate()?;
        if draft.client_name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("Client name is required".to_string()));
        }
        if draft.items.iter().any(|item| item.product_name.trim().is_empty()) {
            return Err(ServiceError::InvalidInput("Every item needs a product or service name".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl WorkflowService for WorkflowServiceImpl {
    #[instrument(skip(self, session, draft), fields(user = %session.name, client = %draft.client_name))]
    async fn submit_quotation(&self, session: &Session, draft: DraftRequest) -> Result<Submission<Quotation>, ServiceError> {
        info!("Submitting quotation");
        Self::check_draft(&draft)?;

        let client_name = draft.client_name.trim().to_string();
        let quote = Quotation::pending(
            Self::new_id(Quotation::ID_PREFIX),
            client_name,
            draft.into_line_items(),
            session.name.clone(),
            Utc::now(),
        )
        .ok_or_else(Self::total_overflow)?;
        let stored = self.quotation_repo.create(quote).await?;
        info!(id = %stored.id, total = %stored.total_amount, "Quotation stored");

        let notification = self.dispatcher.quotation_submitted(&stored);
        Ok(Submission {
            record: stored,
            notification,
        })
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn approve_quotation(&self, id: &str) -> Result<(Quotation, Invoice), ServiceError> {
        info!("Approving quotation");
        let res = self
            .quotation_repo
            .approve_into_invoice(id, Self::new_id(Invoice::ID_PREFIX), Utc::now())
            .await;
        match &res {
            Ok((_, invoice)) => info!(invoice_id = %invoice.id, "Quotation approved"),
            Err(e) => error!("Failed to approve quotation: {e}"),
        }
        let (quote, invoice) = res?;

        // Fire and forget; the approval already stands.
        drop(self.dispatcher.quotation_approved(&quote.id));
        Ok((quote, invoice))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn attach_quotation_documents(
        &self,
        id: &str,
        pdf_url: Option<String>,
        doc_url: Option<String>,
    ) -> Result<Quotation, ServiceError> {
        Ok(self.quotation_repo.attach_documents(id, pdf_url, doc_url).await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_quotation(&self, id: &str) -> Result<Quotation, ServiceError> {
        Ok(self.quotation_repo.get_by_id(id).await?)
    }

    async fn list_quotations(&self) -> Result<Vec<Quotation>, ServiceError> {
        Ok(self.quotation_repo.list().await?)
    }

    #[instrument(skip(self, session, draft), fields(user = %session.name, client = %draft.client_name))]
    async fn submit_invoice_request(&self, session: &Session, draft: DraftRequest) -> Result<Submission<Invoice>, ServiceError> {
        info!("Submitting invoice request");
        Self::check_draft(&draft)?;

        let client_name = draft.client_name.trim().to_string();
        let invoice = Invoice::requested(
            Self::new_id(Invoice::REQUEST_ID_PREFIX),
            client_name,
            draft.into_line_items(),
            session.name.clone(),
            Utc::now(),
        )
        .ok_or_else(Self::total_overflow)?;
        let stored = self.invoice_repo.create(invoice).await?;
        info!(id = %stored.id, total = %stored.total_amount, "Invoice request stored");

        let notification = self.dispatcher.invoice_requested(&stored);
        Ok(Submission {
            record: stored,
            notification,
        })
    }

    #[instrument(skip(self, upload), fields(id = %id, filename = %upload.filename, size = upload.size()))]
    async fn upload_invoice_document(&self, id: &str, upload: DocumentUpload) -> Result<Invoice, ServiceError> {
        info!("Uploading invoice document");
        // Keep only the last path segment of whatever the client sent.
        let filename = upload
            .filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        if filename.is_empty() {
            return Err(ServiceError::InvalidInput("Uploaded document has no file name".to_string()));
        }

        let link = self.documents.document_link(id, &filename);
        let res = self.invoice_repo.mark_uploaded(id, link, Utc::now()).await;
        match &res {
            Ok(_) => info!("Invoice document uploaded successfully"),
            Err(e) => error!("Failed to upload invoice document: {e}"),
        }
        Ok(res?)
    }

    #[instrument(skip(self), fields(id = %id, status = %status))]
    async fn set_payment_status(&self, id: &str, status: PaymentStatus) -> Result<Invoice, ServiceError> {
        info!("Setting payment status");
        let res = self.invoice_repo.update_payment_status(id, status).await;
        match &res {
            Ok(_) => info!("Payment status updated successfully"),
            Err(e) => error!("Failed to update payment status: {e}"),
        }
        Ok(res?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_invoice(&self, id: &str) -> Result<Invoice, ServiceError> {
        Ok(self.invoice_repo.get_by_id(id).await?)
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, ServiceError> {
        Ok(self.invoice_repo.list().await?)
    }

    async fn pending_invoices(&self) -> Result<Vec<Invoice>, ServiceError> {
        Ok(self.invoice_repo.list_by_status(InvoiceStatus::Waiting).await?)
    }

    async fn uploaded_invoices(&self) -> Result<Vec<Invoice>, ServiceError> {
        Ok(self.invoice_repo.list_by_status(InvoiceStatus::Uploaded).await?)
    }

    async fn sales_dashboard(&self) -> Result<SalesDashboard, ServiceError> {
        let snapshot = self.store.snapshot().await;
        Ok(SalesDashboard::compute(&snapshot.quotations, &snapshot.invoices))
    }

    async fn finance_dashboard(&self) -> Result<FinanceDashboard, ServiceError> {
        let snapshot = self.store.snapshot().await;
        Ok(FinanceDashboard::compute(&snapshot.invoices))
    }
}
