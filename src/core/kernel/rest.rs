use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{Payload, Signer};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, instrument, trace};

/// REST client trait for making HTTP requests
///
/// Implementations return the raw body of a successful (HTTP 200) response.
/// Any other status is reported as `ExchangeError::HttpStatus`; interpreting
/// the body is left to the exchange codec.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make an unauthenticated GET request
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `query_params` - Query parameters as key-value pairs
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError>;

    /// Sign `payload` and POST it as a JSON body
    ///
    /// The payload is owned by the call; signing happens right before the
    /// request is sent so the timestamp is always fresh.
    async fn post_signed(&self, endpoint: &str, payload: Payload)
        -> Result<Vec<u8>, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            timeout_seconds: 10,
            user_agent: concat!("bitkub-connector/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn new(
        base_url: String,
        exchange_name: String,
        signer: Option<Arc<dyn Signer>>,
    ) -> Result<Self, ExchangeError> {
        let config = RestClientConfig::new(base_url, exchange_name);
        let mut builder = RestClientBuilder::new(config);
        if let Some(signer) = signer {
            builder = builder.with_signer(signer);
        }
        builder.build()
    }

    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    pub fn has_signer(&self) -> bool {
        self.signer.is_some()
    }


    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    #[instrument(skip(self, response), fields(exchange = %self.config.exchange_name, status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<Vec<u8>, ExchangeError> {
        let status = response.status();
        let body = response.bytes().await?;

        trace!("Response body: {}", String::from_utf8_lossy(&body));

        if status == StatusCode::OK {
            Ok(body.to_vec())
        } else {
            Err(ExchangeError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            })
        }
    }
}

/// Milliseconds since the Unix epoch. A clock set before 1970 is a local
/// setup problem, so nothing is sent.
fn unix_millis(now: SystemTime) -> Result<u64, ExchangeError> {
    now.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .map_err(|e| ExchangeError::ConfigurationError(format!("System clock is invalid: {}", e)))
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query_params), fields(exchange = %self.config.exchange_name, endpoint = %endpoint, param_count = query_params.len()))]
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError> {
        let response = self
            .client
            .get(self.build_url(endpoint))
            .query(query_params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    #[instrument(skip(self, payload), fields(exchange = %self.config.exchange_name, endpoint = %endpoint))]
    async fn post_signed(
        &self,
        endpoint: &str,
        payload: Payload,
    ) -> Result<Vec<u8>, ExchangeError> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            ExchangeError::AuthError("Authentication required but no signer provided".to_string())
        })?;

        let timestamp = unix_millis(SystemTime::now())?;
        let signed = signer.sign_request(endpoint, payload, timestamp)?;
        debug!(timestamp, body_len = signed.body.len(), "Signed request");

        let mut request = self.client.post(self.build_url(endpoint));
        for (key, value) in &signed.headers {
            request = request.header(key, value);
        }

        let response = request.body(signed.body).send().await?;

        self.handle_response(response).await
    }
}
