pub mod session_dto;
pub mod draft_dto;
pub mod invoice_dto;
