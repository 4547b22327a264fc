use crate::config::NotifierConfig;
use crate::model::line_item::LineItem;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Notifier errors. Every variant is non-fatal for the workflow.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NotifierError {
    #[error("Document notifier is not enabled")]
    NotEnabled,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Notifier returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid notifier reply: {0}")]
    InvalidReply(String),

    #[error("Notifier rejected the record: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordType {
    #[serde(rename = "quotation")]
    Quotation,
    #[serde(rename = "invoiceRequest")]
    InvoiceRequest,
    #[serde(rename = "approval")]
    Approval,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordType::Quotation => "quotation",
            RecordType::InvoiceRequest => "invoiceRequest",
            RecordType::Approval => "approval",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    pub id: String,
    pub client_name: String,
    pub items: Vec<LineItem>,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalPayload {
    pub quote_id: String,
    pub new_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NotificationPayload {
    Record(RecordPayload),
    Approval(ApprovalPayload),
}

#[derive(Debug, Serialize)]
struct NotifierRequest<'a> {
    #[serde(rename = "type")]
    record_type: RecordType,
    data: &'a NotificationPayload,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifierReply {
    pub status: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub doc_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl NotifierReply {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// One-way, best-effort notification of created or approved records.
#[async_trait]
pub trait DocumentNotifier: Send + Sync {
    async fn notify(
        &self,
        record_type: RecordType,
        payload: &NotificationPayload,
    ) -> Result<NotifierReply, NotifierError>;
}

/// Posts records to the spreadsheet script endpoint.
pub struct HttpDocumentNotifier {
    endpoint: String,
    client: Client,
}

impl HttpDocumentNotifier {
    pub fn new(config: &NotifierConfig) -> Result<Self, NotifierError> {
        let endpoint = config.endpoint.clone().ok_or(NotifierError::NotEnabled)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NotifierError::Connection(format!("Failed to build HTTP client: {}", e)))?;
        info!(endpoint = %endpoint, "HTTP document notifier initialized");
        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl DocumentNotifier for HttpDocumentNotifier {
    #[instrument(skip(self, payload), fields(record_type = %record_type))]
    async fn notify(
        &self,
        record_type: RecordType,
        payload: &NotificationPayload,
    ) -> Result<NotifierReply, NotifierError> {
        debug!("Posting record to document notifier");
        let request = NotifierRequest {
            record_type,
            data: payload,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotifierError::Connection(format!("Failed to reach notifier: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifierError::HttpStatus { status, body });
        }

        let reply: NotifierReply = response
            .json()
            .await
            .map_err(|e| NotifierError::InvalidReply(e.to_string()))?;

        if !reply.is_success() {
            let message = reply.message.clone().unwrap_or_else(|| reply.status.clone());
            warn!(status = %reply.status, "Notifier did not report success");
            return Err(NotifierError::Rejected(message));
        }

        info!(has_pdf = reply.pdf_url.is_some(), "Notifier accepted record");
        Ok(reply)
    }
}

/// Stand-in used when no endpoint is configured.
pub struct DisabledNotifier;

#[async_trait]
impl DocumentNotifier for DisabledNotifier {
    async fn notify(
        &self,
        _record_type: RecordType,
        _payload: &NotificationPayload,
    ) -> Result<NotifierReply, NotifierError> {
        Err(NotifierError::NotEnabled)
    }
}

/// Pick the notifier matching the configuration.
pub fn notifier_from_config(config: &NotifierConfig) -> Result<Arc<dyn DocumentNotifier>, NotifierError> {
    if config.is_enabled() {
        Ok(Arc::new(HttpDocumentNotifier::new(config)?))
    } else {
        warn!("Document notifier disabled, records will not get PDF links");
        Ok(Arc::new(DisabledNotifier))
    }
}
