pub mod notification_service;
pub mod session_service;
pub mod workflow_service;
