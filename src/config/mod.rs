pub mod app_conf;
pub mod notifier_conf;
pub mod document_conf;


pub use app_conf::AppConfig;
pub use notifier_conf::NotifierConfig;
pub use document_conf::DocumentConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
    
    #[error("Validation error: {0}")]
    ValidationError(String),
}
