pub mod session;
pub mod line_item;
pub mod quotation;
pub mod invoice;
pub mod dashboard;
