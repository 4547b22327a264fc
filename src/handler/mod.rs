pub mod session_handler;
pub mod quotation_handler;
pub mod invoice_handler;
pub mod dashboard_handler;
