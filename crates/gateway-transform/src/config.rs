// Gateway connection configuration.

use secrecy::SecretString;

use gateway_transform_types::{AdapterTimeout, Error};

use crate::sign::ConsumerIdentity;
use crate::util::normalize_base_url;

/// Everything needed to reach one gateway deployment.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub identity: ConsumerIdentity,
    pub timeout: AdapterTimeout,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, identity: ConsumerIdentity) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            identity,
            timeout: AdapterTimeout::default(),
        }
    }

    pub fn timeout(mut self, timeout: AdapterTimeout) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read configuration from the environment.
    ///
    /// Required: `GATEWAY_TRANSFORM_BASE_URL`, `LLM_AUTH_CONSUMER_ID`,
    /// `LLM_AUTH_SERVICE_NAME`, `LLM_AUTH_SERVICE_ENV`.
    /// Optional: `LLM_AUTH_PK_VALUE` (private key material for custom
    /// signers), `LLM_AUTH_KEY_VERSION`.
    pub fn from_env() -> Result<Self, Error> {
        let require = |name: &str| {
            std::env::var(name).map_err(|_| Error::configuration(format!("{name} not set")))
        };

        let base_url = require("GATEWAY_TRANSFORM_BASE_URL")?;
        let mut identity = ConsumerIdentity::new(
            require("LLM_AUTH_CONSUMER_ID")?,
            require("LLM_AUTH_SERVICE_NAME")?,
            require("LLM_AUTH_SERVICE_ENV")?,
        );
        if let Ok(version) = std::env::var("LLM_AUTH_KEY_VERSION") {
            identity = identity.key_version(version);
        }
        if let Ok(key) = std::env::var("LLM_AUTH_PK_VALUE") {
            identity = identity.private_key(SecretString::from(key));
        }

        Ok(Self::new(base_url, identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_base_url() {
        let config = GatewayConfig::new(
            "https://gw.example.com/",
            ConsumerIdentity::new("c", "s", "dev"),
        );
        assert_eq!(config.base_url, "https://gw.example.com");
    }

    #[test]
    fn test_default_timeouts() {
        let config = GatewayConfig::new(
            "https://gw.example.com",
            ConsumerIdentity::new("c", "s", "dev"),
        );
        assert_eq!(config.timeout.connect, 10.0);
        assert_eq!(config.timeout.request, 120.0);
        assert_eq!(config.timeout.stream_read, 30.0);
    }

    #[test]
    fn test_timeout_override() {
        let config = GatewayConfig::new(
            "https://gw.example.com",
            ConsumerIdentity::new("c", "s", "dev"),
        )
        .timeout(AdapterTimeout {
            connect: 1.0,
            request: 5.0,
            stream_read: 2.0,
        });
        assert_eq!(config.timeout.request, 5.0);
    }
}
