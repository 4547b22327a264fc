pub mod repository_error;
pub mod memory_store;
pub mod quotation_repo;
pub mod invoice_repo;
