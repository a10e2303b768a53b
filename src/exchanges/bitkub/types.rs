use crate::core::errors::ExchangeError;
use crate::exchanges::bitkub::conversions::{
    deserialize_integral, deserialize_integral_vec, deserialize_optional_integral,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Request-side types

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Market => "market",
        }
    }
}

impl FromStr for OrderType {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "limit" => Ok(Self::Limit),
            "market" => Ok(Self::Market),
            "" => Err(ExchangeError::InvalidParameters(
                "order type is empty".to_string(),
            )),
            other => Err(ExchangeError::InvalidParameters(format!(
                "order type is invalid: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl FromStr for OrderSide {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            "" => Err(ExchangeError::InvalidParameters("side is empty".to_string())),
            other => Err(ExchangeError::InvalidParameters(format!(
                "side is invalid: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional fields for order placement.
#[derive(Debug, Clone, Default)]
pub struct OrderOptions {
    /// Caller-chosen reference echoed back by the exchange. Not sent when `None`.
    pub client_id: Option<String>,
}

/// Paging for list endpoints. `None` leaves the exchange default in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Paging plus a time window, for order history.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryRequest {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Unix timestamp lower bound
    pub start: Option<i64>,
    /// Unix timestamp upper bound
    pub end: Option<i64>,
}

/// Identifies an existing order for lookup or cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRef {
    Hash(String),
    Id {
        symbol: String,
        id: i64,
        side: OrderSide,
    },
}

// Response-side types

/// Paging metadata attached to list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pagination {
    #[serde(deserialize_with = "deserialize_integral")]
    pub page: i64,
    #[serde(deserialize_with = "deserialize_integral")]
    pub last: i64,
    /// Only order history reports `next` and `prev`.
    #[serde(default, deserialize_with = "deserialize_optional_integral")]
    pub next: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_integral")]
    pub prev: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerStatus {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarketSymbol {
    #[serde(deserialize_with = "deserialize_integral")]
    pub id: i64,
    pub symbol: String,
    pub info: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Ticker {
    #[serde(deserialize_with = "deserialize_integral")]
    pub id: i64,
    pub last: f64,
    #[serde(rename = "lowestAsk")]
    pub lowest_ask: f64,
    #[serde(rename = "highestBid")]
    pub highest_bid: f64,
    #[serde(rename = "percentChange")]
    pub percent_change: f64,
    #[serde(rename = "baseVolume")]
    pub base_volume: f64,
    #[serde(rename = "quoteVolume")]
    pub quote_volume: f64,
    #[serde(rename = "isFrozen", deserialize_with = "deserialize_integral")]
    pub is_frozen: i64,
    #[serde(rename = "high24hr")]
    pub high_24hr: f64,
    #[serde(rename = "low24hr")]
    pub low_24hr: f64,
}

/// Public trade, from the row `[timestamp, rate, amount, side]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub timestamp: i64,
    pub rate: f64,
    pub amount: f64,
    pub side: String,
}

/// Open bid or ask, from the row `[order_id, timestamp, volume, rate, amount]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BidAsk {
    pub order_id: i64,
    pub timestamp: i64,
    pub volume: f64,
    pub rate: f64,
    pub amount: f64,
}

/// Aggregated depth level, from the row `[price, volume]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthLevel {
    pub price: f64,
    pub volume: f64,
}

/// Candles for the TradingView chart feed, as parallel arrays.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TradingViewHistory {
    #[serde(rename = "s")]
    pub status: String,
    #[serde(rename = "t", deserialize_with = "deserialize_integral_vec")]
    pub time: Vec<i64>,
    #[serde(rename = "o")]
    pub open: Vec<f64>,
    #[serde(rename = "h")]
    pub high: Vec<f64>,
    #[serde(rename = "l")]
    pub low: Vec<f64>,
    #[serde(rename = "c")]
    pub close: Vec<f64>,
    #[serde(rename = "v")]
    pub volume: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Balance {
    pub available: f64,
    pub reserved: f64,
}

/// Acknowledgement for a placed order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Order {
    #[serde(deserialize_with = "deserialize_integral")]
    pub id: i64,
    pub hash: String,
    #[serde(rename = "typ")]
    pub order_type: String,
    /// Spending amount
    #[serde(rename = "amt")]
    pub amount: f64,
    #[serde(rename = "rat")]
    pub rate: f64,
    pub fee: f64,
    /// Credit used
    #[serde(rename = "cre")]
    pub credit: f64,
    /// Amount to receive
    #[serde(rename = "rec")]
    pub receive: f64,
    #[serde(rename = "ts", deserialize_with = "deserialize_integral")]
    pub timestamp: i64,
    pub client_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OpenOrder {
    #[serde(deserialize_with = "deserialize_integral")]
    pub id: i64,
    pub hash: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub rate: f64,
    pub fee: f64,
    pub credit: f64,
    pub amount: f64,
    pub receive: f64,
    #[serde(deserialize_with = "deserialize_integral")]
    pub parent_id: i64,
    #[serde(deserialize_with = "deserialize_integral")]
    pub super_id: i64,
    #[serde(rename = "ts", deserialize_with = "deserialize_integral")]
    pub timestamp: i64,
    pub client_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OrderHistory {
    pub txn_id: String,
    #[serde(deserialize_with = "deserialize_integral")]
    pub order_id: i64,
    pub hash: String,
    #[serde(deserialize_with = "deserialize_integral")]
    pub parent_order_id: i64,
    #[serde(deserialize_with = "deserialize_integral")]
    pub super_order_id: i64,
    pub taken_by_me: bool,
    pub is_maker: bool,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub rate: f64,
    pub fee: f64,
    pub credit: f64,
    pub amount: f64,
    pub receive: f64,
    #[serde(deserialize_with = "deserialize_integral")]
    pub ts: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OrderInfoHistory {
    pub amount: f64,
    pub credit: f64,
    pub fee: f64,
    #[serde(deserialize_with = "deserialize_integral")]
    pub id: i64,
    pub rate: f64,
    #[serde(deserialize_with = "deserialize_integral")]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OrderInfo {
    #[serde(deserialize_with = "deserialize_integral")]
    pub id: i64,
    /// First order id in the chain
    #[serde(deserialize_with = "deserialize_integral")]
    pub first: i64,
    #[serde(deserialize_with = "deserialize_integral")]
    pub parent: i64,
    #[serde(deserialize_with = "deserialize_integral")]
    pub last: i64,
    pub amount: f64,
    pub rate: f64,
    pub fee: f64,
    pub credit: f64,
    pub filled: f64,
    pub total: f64,
    /// `filled` or `unfilled`
    pub status: String,
    /// Set only while some but not all of the order has executed
    pub partial_filled: bool,
    pub remaining: f64,
    pub history: Vec<OrderInfoHistory>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CryptoAddress {
    pub currency: String,
    pub address: String,
    #[serde(deserialize_with = "deserialize_integral")]
    pub tag: i64,
    #[serde(rename = "time", deserialize_with = "deserialize_integral")]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CryptoWithdraw {
    /// Local transaction id
    #[serde(rename = "txn")]
    pub txn_id: String,
    #[serde(rename = "adr")]
    pub address: String,
    #[serde(rename = "mem")]
    pub memo: String,
    #[serde(rename = "cur")]
    pub currency: String,
    #[serde(rename = "amt")]
    pub amount: f64,
    pub fee: f64,
    #[serde(rename = "ts", deserialize_with = "deserialize_integral")]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CryptoDeposit {
    pub hash: String,
    pub currency: String,
    pub amount: f64,
    pub from_address: String,
    pub to_address: String,
    #[serde(deserialize_with = "deserialize_integral")]
    pub confirmations: i64,
    pub status: String,
    #[serde(rename = "time", deserialize_with = "deserialize_integral")]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CryptoGenerateAddress {
    pub currency: String,
    pub address: String,
    #[serde(rename = "mem")]
    pub memo: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BankAccount {
    pub id: String,
    pub bank: String,
    pub name: String,
    #[serde(rename = "time", deserialize_with = "deserialize_integral")]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FiatWithdraw {
    #[serde(rename = "txn")]
    pub txn_id: String,
    /// Bank account id
    #[serde(rename = "acc")]
    pub account_id: String,
    #[serde(rename = "cur")]
    pub currency: String,
    #[serde(rename = "amt")]
    pub amount: f64,
    pub fee: f64,
    /// Amount to receive
    #[serde(rename = "rec")]
    pub receive: f64,
    #[serde(rename = "ts", deserialize_with = "deserialize_integral")]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FiatDeposit {
    pub txn_id: String,
    pub currency: String,
    pub amount: f64,
    pub status: String,
    #[serde(rename = "time", deserialize_with = "deserialize_integral")]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Limit {
    pub deposit: f64,
    pub withdraw: f64,
}

/// Limits by KYC level. Crypto is valued in BTC, fiat in THB.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Limits {
    pub crypto: Limit,
    pub fiat: Limit,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CryptoUsage {
    pub deposit: f64,
    pub withdraw: f64,
    pub deposit_percentage: f64,
    pub withdraw_percentage: f64,
    pub deposit_thb_equivalent: f64,
    pub withdraw_thb_equivalent: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FiatUsage {
    pub deposit: f64,
    pub withdraw: f64,
    pub deposit_percentage: f64,
    pub withdraw_percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Usage {
    pub crypto: CryptoUsage,
    pub fiat: FiatUsage,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UserLimits {
    pub limits: Limits,
    pub usage: Usage,
    /// THB rate used for the equivalents above
    pub rate: f64,
}
