#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use salesdesk_backend::config::DocumentConfig;
use salesdesk_backend::dto::draft_dto::{DraftRequest, LineItemRequest};
use salesdesk_backend::model::session::{Role, Session};
use salesdesk_backend::repository::memory_store::MemoryStore;
use salesdesk_backend::service::workflow_service::WorkflowServiceImpl;
use salesdesk_backend::util::notifier::{
    DocumentNotifier, NotificationPayload, NotifierError, NotifierReply, RecordType,
};

/// In-process notifier that records every call.
pub struct FakeNotifier {
    pub fail_with: Option<NotifierError>,
    pub returns_links: bool,
    pub calls: Mutex<Vec<(RecordType, NotificationPayload)>>,
}

impl FakeNotifier {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(FakeNotifier { fail_with: None, returns_links: true, calls: Mutex::new(Vec::new()) })
    }

    /// Reports success but generates no documents.
    pub fn without_links() -> Arc<Self> {
        Arc::new(FakeNotifier { fail_with: None, returns_links: false, calls: Mutex::new(Vec::new()) })
    }

    pub fn failing(err: NotifierError) -> Arc<Self> {
        Arc::new(FakeNotifier { fail_with: Some(err), returns_links: true, calls: Mutex::new(Vec::new()) })
    }

    pub fn recorded(&self) -> Vec<(RecordType, NotificationPayload)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentNotifier for FakeNotifier {
    async fn notify(
        &self,
        record_type: RecordType,
        payload: &NotificationPayload,
    ) -> Result<NotifierReply, NotifierError> {
        self.calls.lock().unwrap().push((record_type, payload.clone()));
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        // Links derived from the record id so tests can tell them apart.
        let (pdf_url, doc_url) = match payload {
            NotificationPayload::Record(record) if self.returns_links => (
                Some(format!("https://docs.test/{}.pdf", record.id)),
                Some(format!("https://docs.test/{}", record.id)),
            ),
            _ => (None, None),
        };
        Ok(NotifierReply {
            status: "success".to_string(),
            pdf_url,
            doc_url,
            message: None,
        })
    }
}

pub fn workflow(notifier: Arc<FakeNotifier>) -> Arc<WorkflowServiceImpl> {
    Arc::new(WorkflowServiceImpl::new(
        Arc::new(MemoryStore::new()),
        notifier,
        DocumentConfig::from_test_env(),
    ))
}

pub fn sales() -> Session {
    Session { name: "Sam".to_string(), role: Role::Sales }
}

pub fn item(name: &str, quantity: u32, price: &str) -> LineItemRequest {
    LineItemRequest {
        product_name: name.to_string(),
        description: String::new(),
        quantity,
        unit_price: Decimal::from_str(price).unwrap(),
    }
}

pub fn draft(client: &str, items: Vec<LineItemRequest>) -> DraftRequest {
    DraftRequest { client_name: client.to_string(), items }
}
