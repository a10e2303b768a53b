use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::bitkub::types::OrderRef;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// Bitkub connector that composes the public and private endpoint groups
///
/// Every private method checks its arguments locally before anything is
/// signed or sent, so a rejected call never reaches the transport.
pub struct BitkubConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
}

impl<R: RestClient + Clone> BitkubConnector<R> {
    pub fn new(rest: R, config: &ExchangeConfig) -> Self {
        let authenticated = config.has_credentials();
        Self {
            market: MarketData::new(&rest),
            trading: Trading::new(&rest, authenticated),
            account: Account::new(&rest, authenticated),
        }
    }

    /// Whether private calls will pass the credential check.
    pub fn is_authenticated(&self) -> bool {
        self.account.is_authenticated()
    }
}

pub(crate) fn ensure_authenticated(authenticated: bool) -> Result<(), ExchangeError> {
    if authenticated {
        Ok(())
    } else {
        Err(ExchangeError::AuthenticationRequired)
    }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), ExchangeError> {
    if value.is_empty() {
        return Err(ExchangeError::InvalidParameters(format!("{} is empty", field)));
    }
    Ok(())
}

pub(crate) fn require_finite(field: &str, value: f64) -> Result<(), ExchangeError> {
    if !value.is_finite() {
        return Err(ExchangeError::InvalidParameters(format!(
            "{} is not a finite number",
            field
        )));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &str, value: f64) -> Result<(), ExchangeError> {
    // NaN fails the comparison too
    if value > 0.0 && value.is_finite() {
        return Ok(());
    }
    Err(ExchangeError::InvalidParameters(format!(
        "{} is invalid: {}",
        field, value
    )))
}

pub(crate) fn validate_order_ref(order: &OrderRef) -> Result<(), ExchangeError> {
    match order {
        OrderRef::Hash(hash) => require_non_empty("hash", hash),
        OrderRef::Id { symbol, id, .. } => {
            require_non_empty("symbol", symbol)?;
            if *id == 0 {
                return Err(ExchangeError::InvalidParameters("id is empty".to_string()));
            }
            Ok(())
        }
    }
}
