//! Configuration types for ACME DNS providers
//!
//! This module defines the provider configuration consumed by
//! [`ProviderRegistry`](crate::ProviderRegistry) factories.

use serde::{Deserialize, Serialize};

/// DNS provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// RcodeZero ACME RRset API
    #[serde(rename = "rcodezero")]
    RcodeZero {
        /// API token with ACME permissions for the zone
        api_token: String,
        /// Base URL (optional, defaults to the public endpoint)
        #[serde(default)]
        base_url: Option<String>,
        /// Per-request HTTP timeout in seconds (optional)
        #[serde(default)]
        timeout_secs: Option<u64>,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::RcodeZero {
                api_token,
                base_url,
                timeout_secs,
            } => {
                if api_token.trim().is_empty() {
                    return Err(crate::Error::config("RcodeZero API token cannot be empty"));
                }
                if base_url.as_ref().is_some_and(|u| u.trim().is_empty()) {
                    return Err(crate::Error::config(
                        "RcodeZero base URL cannot be empty when set",
                    ));
                }
                if *timeout_secs == Some(0) {
                    return Err(crate::Error::config("RcodeZero timeout must be > 0"));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::RcodeZero { .. } => "rcodezero",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::RcodeZero {
                base_url,
                timeout_secs,
                ..
            } => f
                .debug_struct("RcodeZero")
                .field("api_token", &"<REDACTED>")
                .field("base_url", base_url)
                .field("timeout_secs", timeout_secs)
                .finish(),
            ProviderConfig::Custom { factory, config } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .field("config", config)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rcodezero(token: &str) -> ProviderConfig {
        ProviderConfig::RcodeZero {
            api_token: token.to_string(),
            base_url: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn test_validate() {
        assert!(rcodezero("secret").validate().is_ok());
        assert!(rcodezero("").validate().is_err());
        assert!(rcodezero("   ").validate().is_err());

        let zero_timeout = ProviderConfig::RcodeZero {
            api_token: "secret".into(),
            base_url: None,
            timeout_secs: Some(0),
        };
        assert!(zero_timeout.validate().is_err());

        let custom = ProviderConfig::Custom {
            factory: String::new(),
            config: serde_json::json!({}),
        };
        assert!(custom.validate().is_err());
    }

    #[test]
    fn test_deserialize_tagged() {
        let config: ProviderConfig = serde_json::from_value(serde_json::json!({
            "type": "rcodezero",
            "api_token": "secret",
            "base_url": "https://rcodezero.test"
        }))
        .unwrap();

        assert_eq!(config.type_name(), "rcodezero");
        assert!(matches!(
            config,
            ProviderConfig::RcodeZero { base_url: Some(ref u), timeout_secs: None, .. } if u == "https://rcodezero.test"
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", rcodezero("secret_token_12345"));
        assert!(!debug.contains("secret_token_12345"));
        assert!(debug.contains("<REDACTED>"));
    }
}
