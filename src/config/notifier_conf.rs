use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Document notifier configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Spreadsheet script endpoint receiving record notifications (optional)
    pub endpoint: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NotifierConfig {
    /// Load notifier configuration from environment variables
    ///
    /// Expected environment variables:
    /// - NOTIFIER_URL: endpoint that generates PDFs and mirrors records (optional,
    ///   notifications are disabled when unset)
    /// - NOTIFIER_TIMEOUT_SECS: request timeout in seconds (defaults to 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading notifier configuration from environment variables");

        let endpoint = env::var("NOTIFIER_URL").ok().filter(|url| !url.trim().is_empty());
        if let Some(ref url) = endpoint {
            debug!("Notifier endpoint: {}", url);
        } else {
            warn!("NOTIFIER_URL not set, document notifications are disabled");
        }

        let timeout_secs = env::var("NOTIFIER_TIMEOUT_SECS")
            .unwrap_or_else(|_| {
                warn!("NOTIFIER_TIMEOUT_SECS not set, using default: 10 seconds");
                "10".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid NOTIFIER_TIMEOUT_SECS value");
                ConfigError::InvalidValue("Invalid NOTIFIER_TIMEOUT_SECS value".to_string())
            })?;
        debug!("Notifier timeout: {} seconds", timeout_secs);

        let config = NotifierConfig {
            endpoint,
            timeout_secs,
        };

        config.validate()?;
        info!("Notifier configuration loaded successfully");
        Ok(config)
    }

    /// Create NotifierConfig for testing
    pub fn from_test_env() -> Self {
        NotifierConfig {
            endpoint: Some("http://127.0.0.1:9/notify".to_string()),
            timeout_secs: 2,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.endpoint {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                error!("Notifier endpoint is not an http(s) URL: {}", url);
                return Err(ConfigError::ValidationError(
                    "Notifier endpoint must start with http:// or https://".to_string(),
                ));
            }
        }

        if self.timeout_secs == 0 {
            error!("Notifier timeout is 0");
            return Err(ConfigError::ValidationError("Notifier timeout must be greater than 0".to_string()));
        }

        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        NotifierConfig {
            endpoint: None,
            timeout_secs: 10,
        }
    }
}
