//! API credentials and endpoint configuration

use secrecy::{ExposeSecret, SecretString};

/// Production API base URL
pub const API_URL: &str = "https://api.novofon.com";

/// Sandbox API base URL
pub const SANDBOX_URL: &str = "https://api-sandbox.novofon.com";

/// Configuration for [`Api`](crate::Api)
///
/// Holds the user key, the shared secret and the base URL. The secret is
/// read-only after construction and is only exposed while signing.
#[derive(Clone)]
pub struct ApiConfig {
    key: String,
    secret: SecretString,
    base_url: String,
}

impl ApiConfig {
    /// Create a configuration for the production API
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: SecretString::new(secret.into().into()),
            base_url: API_URL.to_string(),
        }
    }

    /// Switch to the sandbox API
    pub fn sandbox(mut self) -> Self {
        self.base_url = SANDBOX_URL.to_string();
        self
    }

    /// Override the base URL (used in tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// User key sent in the `Authorization` header
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_production_url() {
        let config = ApiConfig::new("key", "secret");
        assert_eq!(config.base_url(), API_URL);
    }

    #[test]
    fn test_sandbox_url() {
        let config = ApiConfig::new("key", "secret").sandbox();
        assert_eq!(config.base_url(), SANDBOX_URL);
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = ApiConfig::new("key", "hunter2");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
    }
}
