use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Invoice document upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Base URL prepended to uploaded document links (optional)
    pub links_prefix: Option<String>,
    /// Largest accepted upload in bytes
    pub max_upload_bytes: usize,
}

impl DocumentConfig {
    /// Load document configuration from environment variables
    ///
    /// Expected environment variables:
    /// - DOCUMENT_LINKS_PREFIX: base URL for invoice document links (optional)
    /// - DOCUMENT_MAX_UPLOAD_BYTES: upload size limit (defaults to 10 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading document configuration from environment variables");

        let links_prefix = env::var("DOCUMENT_LINKS_PREFIX").ok().filter(|p| !p.trim().is_empty());
        if let Some(ref prefix) = links_prefix {
            debug!("Document links prefix: {}", prefix);
        } else {
            debug!("No document links prefix specified, using local anchors");
        }

        let max_upload_bytes = env::var("DOCUMENT_MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| {
                warn!("DOCUMENT_MAX_UPLOAD_BYTES not set, using default: 10485760");
                "10485760".to_string()
            })
            .parse::<usize>()
            .map_err(|_| {
                error!("Invalid DOCUMENT_MAX_UPLOAD_BYTES value");
                ConfigError::InvalidValue("Invalid DOCUMENT_MAX_UPLOAD_BYTES value".to_string())
            })?;

        let config = DocumentConfig {
            links_prefix,
            max_upload_bytes,
        };

        config.validate()?;
        info!("Document configuration loaded successfully");
        Ok(config)
    }

    /// Create DocumentConfig for testing
    pub fn from_test_env() -> Self {
        DocumentConfig {
            links_prefix: Some("https://files.test.local/".to_string()),
            max_upload_bytes: 1024 * 1024,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_upload_bytes == 0 {
            error!("Document upload limit is 0");
            return Err(ConfigError::ValidationError("Upload limit must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Build the display link for an uploaded invoice document.
    /// The filename is percent-encoded as a single path segment.
    pub fn document_link(&self, invoice_id: &str, filename: &str) -> String {
        match &self.links_prefix {
            Some(prefix) => format!(
                "{}/invoices/{}/{}",
                prefix.trim_end_matches('/'),
                urlencoding::encode(invoice_id),
                urlencoding::encode(filename)
            ),
            None => format!("#{}", filename),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        DocumentConfig {
            links_prefix: None,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DocumentConfig::default();
        assert_eq!(config.links_prefix, None);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_link_with_prefix() {
        let config = DocumentConfig::from_test_env();
        assert_eq!(
            config.document_link("INV-1", "invoice.pdf"),
            "https://files.test.local/invoices/INV-1/invoice.pdf"
        );
    }

    #[test]
    fn test_link_encodes_filename() {
        let config = DocumentConfig::from_test_env();
        assert_eq!(
            config.document_link("INV-1", "inv #1.pdf"),
            "https://files.test.local/invoices/INV-1/inv%20%231.pdf"
        );
        assert_eq!(
            config.document_link("INV-1", "a?b/c.pdf"),
            "https://files.test.local/invoices/INV-1/a%3Fb%2Fc.pdf"
        );
    }

    #[test]
    fn test_link_without_prefix() {
        let config = DocumentConfig::default();
        assert_eq!(config.document_link("INV-1", "invoice.pdf"), "#invoice.pdf");
    }

    #[test]
    fn test_validate_zero_limit() {
        let mut config = DocumentConfig::default();
        config.max_upload_bytes = 0;
        assert!(config.validate().is_err());
    }
}
