use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{info, instrument, warn, Instrument};

use crate::model::invoice::Invoice;
use crate::model::quotation::{Quotation, QuotationStatus};
use crate::repository::quotation_repo::QuotationRepository;
use crate::util::notifier::{
    ApprovalPayload, DocumentNotifier, NotificationPayload, RecordPayload, RecordType,
};

/// What became of a best-effort notification.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationOutcome {
    Delivered {
        pdf_url: Option<String>,
        doc_url: Option<String>,
    },
    /// Non-fatal: the local record stands as it was stored.
    Failed(String),
}

impl NotificationOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, NotificationOutcome::Delivered { .. })
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            NotificationOutcome::Failed(msg) => Some(msg),
            NotificationOutcome::Delivered { .. } => None,
        }
    }
}

/// Handle on an in-flight notification. Dropping it does not cancel the task.
#[derive(Debug)]
pub struct NotificationTicket {
    rx: oneshot::Receiver<NotificationOutcome>,
}

impl NotificationTicket {
    pub async fn outcome(self) -> NotificationOutcome {
        self.rx
            .await
            .unwrap_or_else(|_| NotificationOutcome::Failed("notification task ended without a result".to_string()))
    }
}

/// A stored record plus the notification started for it.
#[derive(Debug)]
pub struct Submission<T> {
    pub record: T,
    pub notification: NotificationTicket,
}

/// Runs notifier calls off the request path and patches quotations with
/// returned document links, matched by id.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn DocumentNotifier>,
    quotation_repo: Arc<dyn QuotationRepository>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn DocumentNotifier>, quotation_repo: Arc<dyn QuotationRepository>) -> Self {
        Self {
            notifier,
            quotation_repo,
        }
    }

    #[instrument(skip(self, quote), fields(id = %quote.id))]
    pub fn quotation_submitted(&self, quote: &Quotation) -> NotificationTicket {
        let payload = NotificationPayload::Record(RecordPayload {
            id: quote.id.clone(),
            client_name: quote.client_name.clone(),
            items: quote.items.clone(),
            total_amount: quote.total_amount,
        });
        let quote_id = quote.id.clone();
        let repo = self.quotation_repo.clone();
        self.spawn(RecordType::Quotation, payload, move |pdf_url, doc_url| async move {
            if pdf_url.is_none() && doc_url.is_none() {
                return Ok(());
            }
            repo.attach_documents(&quote_id, pdf_url, doc_url)
                .await
                .map(|_| ())
                .map_err(|e| format!("Failed to attach document links: {}", e))
        })
    }

    #[instrument(skip(self, invoice), fields(id = %invoice.id))]
    pub fn invoice_requested(&self, invoice: &Invoice) -> NotificationTicket {
        let payload = NotificationPayload::Record(RecordPayload {
            id: invoice.id.clone(),
            client_name: invoice.client_name.clone(),
            items: invoice.items.clone(),
            total_amount: invoice.total_amount,
        });
        self.spawn(RecordType::InvoiceRequest, payload, |_, _| async { Ok(()) })
    }

    #[instrument(skip(self))]
    pub fn quotation_approved(&self, quote_id: &str) -> NotificationTicket {
        let payload = NotificationPayload::Approval(ApprovalPayload {
            quote_id: quote_id.to_string(),
            new_status: QuotationStatus::Approved.as_str().to_string(),
        });
        self.spawn(RecordType::Approval, payload, |_, _| async { Ok(()) })
    }

    fn spawn<F, Fut>(&self, record_type: RecordType, payload: NotificationPayload, on_links: F) -> NotificationTicket
    where
        F: FnOnce(Option<String>, Option<String>) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<(), String>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let notifier = self.notifier.clone();

        let task = async move {
            let outcome = match notifier.notify(record_type, &payload).await {
                Ok(reply) => {
                    let pdf_url = reply.pdf_url.clone();
                    let doc_url = reply.doc_url.clone();
                    match on_links(reply.pdf_url, reply.doc_url).await {
                        Ok(()) => {
                            info!("Notification delivered");
                            NotificationOutcome::Delivered { pdf_url, doc_url }
                        }
                        Err(msg) => {
                            warn!("{}", msg);
                            NotificationOutcome::Failed(msg)
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Notification failed, keeping local record as is");
                    NotificationOutcome::Failed(e.to_string())
                }
            };
            // The receiver may already be gone; the outcome is logged either way.
            let _ = tx.send(outcome);
        };

        tokio::spawn(task.instrument(tracing::info_span!("notify", record_type = %record_type)));
        NotificationTicket { rx }
    }
}
