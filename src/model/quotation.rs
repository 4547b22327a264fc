use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::line_item::{total_amount, LineItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuotationStatus {
    Pending,
    Approved,
    /// Reserved; no operation currently produces it.
    Converted,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Pending => "Pending",
            QuotationStatus::Approved => "Approved",
            QuotationStatus::Converted => "Converted",
        }
    }
}

impl fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: String,
    pub client_name: String,
    pub items: Vec<LineItem>,
    pub total_amount: Decimal,
    pub status: QuotationStatus,
    pub submitted_by: String,
    pub submitted_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
}

impl Quotation {
    pub const ID_PREFIX: &'static str = "QT";

    /// A freshly submitted quotation awaiting approval, `None` if the
    /// line total overflows.
    pub fn pending(
        id: String,
        client_name: String,
        items: Vec<LineItem>,
        submitted_by: String,
        submitted_date: DateTime<Utc>,
    ) -> Option<Self> {
        let total_amount = total_amount(&items)?;
        Some(Quotation {
            id,
            client_name,
            items,
            total_amount,
            status: QuotationStatus::Pending,
            submitted_by,
            submitted_date,
            pdf_url: None,
            doc_url: None,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.status == QuotationStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_pending_computes_total() {
        let quote = Quotation::pending(
            "QT-1".to_string(),
            "Acme".to_string(),
            vec![LineItem {
                product_name: "Infusion pump".to_string(),
                description: String::new(),
                quantity: 3,
                unit_price: Decimal::from_str("50.00").unwrap(),
            }],
            "dana".to_string(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(quote.total_amount.to_string(), "150.00");
        assert!(quote.is_pending());
        assert!(quote.pdf_url.is_none());
    }

    #[test]
    fn test_serializes_camel_case_without_missing_links() {
        let quote = Quotation::pending("QT-2".to_string(), "Acme".to_string(), vec![], "dana".to_string(), Utc::now()).unwrap();
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["clientName"], "Acme");
        assert_eq!(json["totalAmount"], "0.00");
        assert_eq!(json["status"], "Pending");
        assert!(json.get("pdfUrl").is_none());
    }
}
