//! Exchange-agnostic transport layer.
//!
//! - `RestClient`: HTTP seam returning raw response bodies
//! - `ReqwestRest`: reqwest-backed implementation that signs right before send
//! - `Signer`: pluggable request authentication
//!
//! The kernel contains no exchange-specific logic. Envelope decoding and
//! error-code mapping live with each exchange.
pub mod rest;
pub mod signer;

pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{hmac_sha256_hex, Payload, SignedRequest, Signer};
