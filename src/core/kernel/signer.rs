use crate::core::errors::ExchangeError;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use std::collections::{BTreeMap, HashMap};

type HmacSha256 = Hmac<Sha256>;

/// Request parameters for a signed call.
///
/// A `BTreeMap` keeps keys sorted, so two serializations of the same logical
/// payload are byte-identical.
pub type Payload = BTreeMap<String, Value>;

/// A request body that is ready to be put on the wire.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// Headers the transport must attach (API key, content type).
    pub headers: HashMap<String, String>,
    /// Final body bytes, signature included.
    pub body: Vec<u8>,
    /// Timestamp that was injected and covered by the signature.
    pub timestamp: u64,
    pub signature: String,
}

/// Signer trait for request authentication
///
/// Implementations take ownership of the payload, inject whatever the exchange
/// needs (timestamp, signature) and hand back the exact bytes to send. The
/// transport calls this immediately before sending, never earlier.
pub trait Signer: Send + Sync {
    /// Sign a payload for `endpoint` at `timestamp` (Unix milliseconds)
    fn sign_request(
        &self,
        endpoint: &str,
        payload: Payload,
        timestamp: u64,
    ) -> Result<SignedRequest, ExchangeError>;
}

/// Lowercase hex HMAC-SHA256 of `message` keyed with `secret`
pub fn hmac_sha256_hex(secret: &[u8], message: &[u8]) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}
