use crate::core::errors::ExchangeError;
use crate::core::kernel::{hmac_sha256_hex, Payload, SignedRequest, Signer};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::collections::HashMap;

pub const API_KEY_HEADER: &str = "X-BTK-APIKEY";

/// Signs private Bitkub requests.
///
/// The signature is the hex HMAC-SHA256 of the canonical JSON body with `ts`
/// already present and `sig` absent.
pub struct BitkubSigner {
    api_key: Secret<String>,
    secret_key: Secret<String>,
}

impl BitkubSigner {
    pub fn new(api_key: Secret<String>, secret_key: Secret<String>) -> Self {
        Self {
            api_key,
            secret_key,
        }
    }
}

impl Signer for BitkubSigner {
    fn sign_request(
        &self,
        _endpoint: &str,
        payload: Payload,
        timestamp: u64,
    ) -> Result<SignedRequest, ExchangeError> {
        let (body, signature) =
            sign_payload(payload, self.secret_key.expose_secret(), timestamp)?;

        let mut headers = HashMap::new();
        headers.insert(
            API_KEY_HEADER.to_string(),
            self.api_key.expose_secret().clone(),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        Ok(SignedRequest {
            headers,
            body,
            timestamp,
            signature,
        })
    }
}

/// Inject `ts`, sign, inject `sig` and serialize the final body.
///
/// Returns the body bytes and the signature. A `sig` key supplied by the
/// caller is dropped before signing.
pub fn sign_payload(
    mut payload: Payload,
    secret: &str,
    timestamp: u64,
) -> Result<(Vec<u8>, String), ExchangeError> {
    payload.remove("sig");
    payload.insert("ts".to_string(), Value::from(timestamp));

    let unsigned = serde_json::to_vec(&payload).map_err(|e| {
        ExchangeError::SerializationError(format!("Failed to serialize payload: {}", e))
    })?;
    let signature = hmac_sha256_hex(secret.as_bytes(), &unsigned)?;

    payload.insert("sig".to_string(), Value::from(signature.clone()));
    let body = serde_json::to_vec(&payload).map_err(|e| {
        ExchangeError::SerializationError(format!("Failed to serialize payload: {}", e))
    })?;

    Ok((body, signature))
}
