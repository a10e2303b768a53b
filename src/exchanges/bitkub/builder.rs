use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::bitkub::{connector::BitkubConnector, signer::BitkubSigner};
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "https://api.bitkub.com";

/// Builder for Bitkub connectors
///
/// Without credentials the connector is still usable for public market data;
/// private calls then fail with `AuthenticationRequired` before any request.
pub struct BitkubBuilder {
    config: ExchangeConfig,
    user_agent: Option<String>,
}

impl Default for BitkubBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BitkubBuilder {
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig::read_only(),
            user_agent: None,
        }
    }

    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_credentials(mut self, api_key: String, secret_key: String) -> Self {
        let base = ExchangeConfig::new(api_key, secret_key).timeout(self.config.timeout_seconds);
        self.config = match self.config.base_url.take() {
            Some(url) => base.base_url(url),
            None => base,
        };
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    /// Per-request timeout in seconds
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    pub fn build(self) -> Result<BitkubConnector<ReqwestRest>, ExchangeError> {
        if self.config.timeout_seconds == 0 {
            return Err(ExchangeError::ConfigurationError(
                "timeout must be at least one second".to_string(),
            ));
        }

        let base_url = self
            .config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut rest_config = RestClientConfig::new(base_url, "bitkub".to_string())
            .with_timeout(self.config.timeout_seconds);
        if let Some(user_agent) = self.user_agent {
            rest_config = rest_config.with_user_agent(user_agent);
        }

        let mut rest_builder = RestClientBuilder::new(rest_config);
        if self.config.has_credentials() {
            let signer = Arc::new(BitkubSigner::new(
                self.config.api_key.clone(),
                self.config.secret_key.clone(),
            ));
            rest_builder = rest_builder.with_signer(signer);
        }

        let rest = rest_builder.build()?;
        Ok(BitkubConnector::new(rest, &self.config))
    }
}

/// Build a Bitkub connector from configuration
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<BitkubConnector<ReqwestRest>, ExchangeError> {
    BitkubBuilder::new().with_config(config).build()
}
