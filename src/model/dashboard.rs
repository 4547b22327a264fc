//! Read-only aggregates over the quotation and invoice collections.
//! Always computed from the current snapshot.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::invoice::{Invoice, InvoiceStatus, PaymentStatus};
use crate::model::quotation::Quotation;

const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesDashboard {
    pub total_quotations: usize,
    pub pending_quotations: usize,
    pub total_invoices: usize,
    pub paid_invoices: usize,
    pub total_quotation_value: Decimal,
    pub total_invoice_value: Decimal,
    pub recent_quotations: Vec<Quotation>,
    pub recent_invoices: Vec<Invoice>,
}

impl SalesDashboard {
    pub fn compute(quotations: &[Quotation], invoices: &[Invoice]) -> Self {
        SalesDashboard {
            total_quotations: quotations.len(),
            pending_quotations: quotations.iter().filter(|q| q.is_pending()).count(),
            total_invoices: invoices.len(),
            paid_invoices: invoices.iter().filter(|i| i.is_paid()).count(),
            total_quotation_value: money_sum(quotations.iter().map(|q| q.total_amount)),
            total_invoice_value: money_sum(invoices.iter().map(|i| i.total_amount)),
            recent_quotations: quotations.iter().take(RECENT_LIMIT).cloned().collect(),
            recent_invoices: invoices.iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceDashboard {
    pub total_invoices: usize,
    pub pending_invoices: usize,
    pub uploaded_invoices: usize,
    pub paid_invoices: usize,
    pub partially_paid_invoices: usize,
    pub unpaid_invoices: usize,
    pub total_value: Decimal,
    pub paid_value: Decimal,
    pub recent_invoices: Vec<Invoice>,
}

impl FinanceDashboard {
    pub fn compute(invoices: &[Invoice]) -> Self {
        FinanceDashboard {
            total_invoices: invoices.len(),
            pending_invoices: invoices.iter().filter(|i| i.status == InvoiceStatus::Waiting).count(),
            uploaded_invoices: invoices.iter().filter(|i| i.status == InvoiceStatus::Uploaded).count(),
            paid_invoices: count_payment(invoices, PaymentStatus::Paid),
            partially_paid_invoices: count_payment(invoices, PaymentStatus::PartiallyPaid),
            unpaid_invoices: count_payment(invoices, PaymentStatus::Unpaid),
            total_value: money_sum(invoices.iter().map(|i| i.total_amount)),
            paid_value: money_sum(invoices.iter().filter(|i| i.is_paid()).map(|i| i.total_amount)),
            recent_invoices: invoices.iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}

fn count_payment(invoices: &[Invoice], status: PaymentStatus) -> usize {
    invoices.iter().filter(|i| i.payment_status == status).count()
}

// Saturates instead of panicking; the collections only ever grow.
fn money_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    let mut sum = amounts.fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount));
    sum.rescale(2);
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::line_item::LineItem;
    use chrono::Utc;
    use std::str::FromStr;

    fn items(price: &str) -> Vec<LineItem> {
        vec![LineItem {
            product_name: "Service".to_string(),
            description: String::new(),
            quantity: 1,
            unit_price: Decimal::from_str(price).unwrap(),
        }]
    }

    fn quote(id: usize, price: &str) -> Quotation {
        Quotation::pending(format!("QT-{id}"), "Acme".to_string(), items(price), "sam".to_string(), Utc::now()).unwrap()
    }

    fn invoice(id: usize, price: &str) -> Invoice {
        Invoice::requested(format!("INV-REQ-{id}"), "Acme".to_string(), items(price), "sam".to_string(), Utc::now()).unwrap()
    }

    #[test]
    fn test_empty_collections() {
        let sales = SalesDashboard::compute(&[], &[]);
        assert_eq!(sales.total_quotations, 0);
        assert_eq!(sales.total_quotation_value.to_string(), "0.00");
        let finance = FinanceDashboard::compute(&[]);
        assert_eq!(finance.paid_value.to_string(), "0.00");
    }

    #[test]
    fn test_sales_counts_and_values() {
        let mut quotes: Vec<Quotation> = (0..7).map(|i| quote(i, "10.00")).collect();
        quotes[0].status = crate::model::quotation::QuotationStatus::Approved;
        let mut invoices = vec![invoice(1, "5.50"), invoice(2, "4.50")];
        invoices[1].payment_status = PaymentStatus::Paid;

        let dashboard = SalesDashboard::compute(&quotes, &invoices);
        assert_eq!(dashboard.total_quotations, 7);
        assert_eq!(dashboard.pending_quotations, 6);
        assert_eq!(dashboard.total_invoices, 2);
        assert_eq!(dashboard.paid_invoices, 1);
        assert_eq!(dashboard.total_quotation_value.to_string(), "70.00");
        assert_eq!(dashboard.total_invoice_value.to_string(), "10.00");
        assert_eq!(dashboard.recent_quotations.len(), 5);
        assert_eq!(dashboard.recent_quotations[0].id, "QT-0");
    }

    #[test]
    fn test_finance_counts_and_paid_value() {
        let mut invoices = vec![invoice(1, "100.00"), invoice(2, "40.00"), invoice(3, "60.00")];
        invoices[0].status = InvoiceStatus::Uploaded;
        invoices[0].payment_status = PaymentStatus::Paid;
        // payment status is tracked even before upload
        invoices[1].payment_status = PaymentStatus::Paid;
        invoices[2].payment_status = PaymentStatus::PartiallyPaid;

        let dashboard = FinanceDashboard::compute(&invoices);
        assert_eq!(dashboard.total_invoices, 3);
        assert_eq!(dashboard.pending_invoices, 2);
        assert_eq!(dashboard.uploaded_invoices, 1);
        assert_eq!(dashboard.paid_invoices, 2);
        assert_eq!(dashboard.partially_paid_invoices, 1);
        assert_eq!(dashboard.unpaid_invoices, 0);
        assert_eq!(dashboard.total_value.to_string(), "200.00");
        assert_eq!(dashboard.paid_value.to_string(), "140.00");
        assert_eq!(dashboard.recent_invoices.len(), 3);
        assert_eq!(dashboard.recent_invoices[0].id, "INV-REQ-1");
    }

    #[test]
    fn test_finance_recent_invoices_capped() {
        let invoices: Vec<Invoice> = (0..8).map(|i| invoice(i, "1.00")).collect();
        let dashboard = FinanceDashboard::compute(&invoices);
        assert_eq!(dashboard.unpaid_invoices, 8);
        assert_eq!(dashboard.recent_invoices.len(), 5);
        assert_eq!(dashboard.recent_invoices[4].id, "INV-REQ-4");
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let mut quotes = vec![quote(1, "1.00"), quote(2, "1.00")];
        let mut invoices = vec![invoice(1, "1.00"), invoice(2, "1.00")];
        for q in quotes.iter_mut() {
            q.total_amount = Decimal::MAX;
        }
        for i in invoices.iter_mut() {
            i.total_amount = Decimal::MAX;
            i.payment_status = PaymentStatus::Paid;
        }

        let sales = SalesDashboard::compute(&quotes, &invoices);
        assert_eq!(sales.total_quotation_value, Decimal::MAX);
        let finance = FinanceDashboard::compute(&invoices);
        assert_eq!(finance.total_value, Decimal::MAX);
        assert_eq!(finance.paid_value, Decimal::MAX);
    }
}
