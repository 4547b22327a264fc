use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::model::invoice::{Invoice, PaymentStatus};
use crate::model::quotation::Quotation;

/// A document handed over by the upload form.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub filename: String,
    pub content_type: String,
    pub content: Bytes,
}

impl DocumentUpload {
    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type.eq_ignore_ascii_case("application/pdf")
            || self.filename.to_ascii_lowercase().ends_with(".pdf")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatusRequest {
    #[serde(alias = "status")]
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovalResponse {
    pub quotation: Quotation,
    pub invoice: Invoice,
}
