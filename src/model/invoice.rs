use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::line_item::{total_amount, LineItem};
use crate::model::quotation::Quotation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Waiting,
    Uploaded,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Waiting => "Waiting",
            InvoiceStatus::Uploaded => "Uploaded",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment tracking, independent of the document status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Unpaid,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::PartiallyPaid => "Partially Paid",
            PaymentStatus::Paid => "Paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    pub client_name: String,
    pub items: Vec<LineItem>,
    pub total_amount: Decimal,
    pub status: InvoiceStatus,
    pub payment_status: PaymentStatus,
    pub submitted_by: String,
    pub submitted_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_pdf_link: Option<String>,
}

impl Invoice {
    pub const ID_PREFIX: &'static str = "INV";
    pub const REQUEST_ID_PREFIX: &'static str = "INV-REQ";

    /// A direct invoice request with no originating quotation.
    pub fn requested(
        id: String,
        client_name: String,
        items: Vec<LineItem>,
        submitted_by: String,
        submitted_date: DateTime<Utc>,
    ) -> Option<Self> {
        let total_amount = total_amount(&items)?;
        Some(Invoice {
            id,
            quote_id: None,
            client_name,
            items,
            total_amount,
            status: InvoiceStatus::Waiting,
            payment_status: PaymentStatus::Unpaid,
            submitted_by,
            submitted_date,
            uploaded_date: None,
            invoice_pdf_link: None,
        })
    }

    /// The invoice created when `quote` is approved.
    pub fn from_approved_quotation(id: String, quote: &Quotation, submitted_date: DateTime<Utc>) -> Self {
        Invoice {
            id,
            quote_id: Some(quote.id.clone()),
            client_name: quote.client_name.clone(),
            items: quote.items.clone(),
            total_amount: quote.total_amount,
            status: InvoiceStatus::Waiting,
            payment_status: PaymentStatus::Unpaid,
            submitted_by: quote.submitted_by.clone(),
            submitted_date,
            uploaded_date: None,
            invoice_pdf_link: None,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.status == InvoiceStatus::Waiting
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_payment_status_wire_names() {
        assert_eq!(serde_json::to_value(PaymentStatus::PartiallyPaid).unwrap(), "Partially Paid");
        let parsed: PaymentStatus = serde_json::from_str("\"Partially Paid\"").unwrap();
        assert_eq!(parsed, PaymentStatus::PartiallyPaid);
        assert!(serde_json::from_str::<PaymentStatus>("\"Refunded\"").is_err());
    }

    #[test]
    fn test_from_approved_quotation_copies_fields() {
        let quote = Quotation::pending(
            "QT-7".to_string(),
            "Clinic North".to_string(),
            vec![LineItem {
                product_name: "Defibrillator".to_string(),
                description: "AED unit".to_string(),
                quantity: 2,
                unit_price: Decimal::from_str("1200.50").unwrap(),
            }],
            "sam".to_string(),
            Utc::now(),
        )
        .unwrap();
        let invoice = Invoice::from_approved_quotation("INV-7".to_string(), &quote, Utc::now());
        assert_eq!(invoice.quote_id.as_deref(), Some("QT-7"));
        assert_eq!(invoice.client_name, quote.client_name);
        assert_eq!(invoice.items, quote.items);
        assert_eq!(invoice.total_amount, quote.total_amount);
        assert_eq!(invoice.submitted_by, "sam");
        assert_eq!(invoice.status, InvoiceStatus::Waiting);
        assert_eq!(invoice.payment_status, PaymentStatus::Unpaid);
    }

    #[test]
    fn test_requested_has_no_quote() {
        let invoice = Invoice::requested("INV-REQ-1".to_string(), "Acme".to_string(), vec![], "sam".to_string(), Utc::now()).unwrap();
        assert!(invoice.quote_id.is_none());
        assert!(invoice.is_waiting());
        assert!(!invoice.is_paid());
    }
}
