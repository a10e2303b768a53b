use crate::core::errors::ExchangeError;
use crate::core::kernel::{Payload, RestClient};
use crate::exchanges::bitkub::codec::{self, Decoded};
use crate::exchanges::bitkub::conversions::{f64_to_i64, format_amount, server_time_to_datetime};
use crate::exchanges::bitkub::types::{
    Balance, BankAccount, BidAsk, CryptoAddress, CryptoDeposit, CryptoGenerateAddress,
    CryptoWithdraw, DepthLevel, FiatDeposit, FiatWithdraw, HistoryRequest, MarketSymbol,
    OpenOrder, Order, OrderHistory, OrderInfo, OrderOptions, OrderRef, OrderType, PageRequest,
    ServerStatus, Ticker, Trade, TradingViewHistory, UserLimits,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

pub const PLACE_BID: &str = "/api/market/place-bid";
pub const PLACE_BID_TEST: &str = "/api/market/place-bid/test";
pub const PLACE_ASK: &str = "/api/market/place-ask";
pub const PLACE_ASK_TEST: &str = "/api/market/place-ask/test";
pub const PLACE_ASK_BY_FIAT: &str = "/api/market/place-ask-by-fiat";
pub const CRYPTO_WITHDRAW: &str = "/api/crypto/withdraw";
pub const CRYPTO_INTERNAL_WITHDRAW: &str = "/api/crypto/internal-withdraw";

/// Bitkub REST endpoints.
///
/// Builds query strings and payloads, hands them to the transport and decodes
/// the reply. Argument validation happens one layer up, in the connector.
#[derive(Debug, Clone)]
pub struct BitkubRest<R: RestClient> {
    rest_client: R,
}

fn limit_param(limit: Option<u32>) -> Option<String> {
    limit.filter(|l| *l > 0).map(|l| l.to_string())
}

fn insert_page(payload: &mut Payload, page: PageRequest) {
    if let Some(p) = page.page.filter(|p| *p > 0) {
        payload.insert("p".to_string(), Value::from(p));
    }
    if let Some(lmt) = page.limit.filter(|l| *l > 0) {
        payload.insert("lmt".to_string(), Value::from(lmt));
    }
}

fn order_ref_payload(order: &OrderRef) -> Payload {
    let mut payload = Payload::new();
    match order {
        OrderRef::Hash(hash) => {
            payload.insert("hash".to_string(), Value::from(hash.as_str()));
        }
        OrderRef::Id { symbol, id, side } => {
            payload.insert("sym".to_string(), Value::from(symbol.as_str()));
            payload.insert("id".to_string(), Value::from(id.to_string()));
            payload.insert("sd".to_string(), Value::from(side.as_str()));
        }
    }
    payload
}

impl<R: RestClient> BitkubRest<R> {
    pub fn new(rest_client: R) -> Self {
        Self { rest_client }
    }

    async fn get_public(
        &self,
        endpoint: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<Vec<u8>, ExchangeError> {
        let query: Vec<(&str, &str)> = params
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (*k, v)))
            .collect();
        self.rest_client.get(endpoint, &query).await
    }

    async fn symbol_rows(
        &self,
        endpoint: &str,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<u8>, ExchangeError> {
        self.get_public(
            endpoint,
            &[("sym", Some(symbol.to_string())), ("lmt", limit_param(limit))],
        )
        .await
    }

    // Public market data

    pub async fn get_server_status(&self) -> Result<Vec<ServerStatus>, ExchangeError> {
        let body = self.rest_client.get("/api/status", &[]).await?;
        codec::decode_bare(&body)
    }

    pub async fn get_server_time(&self) -> Result<DateTime<Utc>, ExchangeError> {
        let body = self.rest_client.get("/api/servertime", &[]).await?;
        let raw: f64 = codec::decode_bare(&body)?;
        server_time_to_datetime(f64_to_i64(raw))
    }

    pub async fn get_symbols(&self) -> Result<Vec<MarketSymbol>, ExchangeError> {
        let body = self.rest_client.get("/api/market/symbols", &[]).await?;
        codec::decode_object(&body).map(|d| d.result)
    }

    pub async fn get_tickers(
        &self,
        symbol: Option<&str>,
    ) -> Result<HashMap<String, Ticker>, ExchangeError> {
        let sym = symbol.filter(|s| !s.is_empty()).map(str::to_string);
        let body = self.get_public("/api/market/ticker", &[("sym", sym)]).await?;
        codec::decode_bare(&body)
    }

    pub async fn get_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>, ExchangeError> {
        let body = self.symbol_rows("/api/market/trades", symbol, limit).await?;
        codec::decode_tuple_list(&body).map(|d| d.result)
    }

    pub async fn get_bids(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<BidAsk>, ExchangeError> {
        let body = self.symbol_rows("/api/market/bids", symbol, limit).await?;
        codec::decode_tuple_list(&body).map(|d| d.result)
    }

    pub async fn get_asks(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<BidAsk>, ExchangeError> {
        let body = self.symbol_rows("/api/market/asks", symbol, limit).await?;
        codec::decode_tuple_list(&body).map(|d| d.result)
    }

    pub async fn get_books(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<HashMap<String, Vec<BidAsk>>, ExchangeError> {
        let body = self.symbol_rows("/api/market/books", symbol, limit).await?;
        codec::decode_keyed_tuple_lists(&body).map(|d| d.result)
    }

    pub async fn get_depth(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<HashMap<String, Vec<DepthLevel>>, ExchangeError> {
        let body = self.symbol_rows("/api/market/depth", symbol, limit).await?;
        codec::decode_bare_keyed_tuple_lists(&body)
    }

    pub async fn get_tradingview_history(
        &self,
        symbol: &str,
        resolution: &str,
        from: Option<i64>,
        to: Option<i64>,
    ) -> Result<TradingViewHistory, ExchangeError> {
        let body = self
            .get_public(
                "/tradingview/history",
                &[
                    ("sym", Some(symbol.to_string())),
                    ("resolution", Some(resolution.to_string())),
                    ("from", from.filter(|t| *t > 0).map(|t| t.to_string())),
                    ("to", to.filter(|t| *t > 0).map(|t| t.to_string())),
                ],
            )
            .await?;
        codec::decode_bare(&body)
    }

    // Private trading

    /// Place an order on one of the `PLACE_*` endpoints.
    ///
    /// `rate` is sent as `0` for market orders whatever the caller passed.
    pub async fn place_order(
        &self,
        endpoint: &str,
        symbol: &str,
        amount: f64,
        rate: f64,
        order_type: OrderType,
        options: &OrderOptions,
    ) -> Result<Order, ExchangeError> {
        let rate = match order_type {
            OrderType::Limit => rate,
            OrderType::Market => 0.0,
        };

        let mut payload = Payload::new();
        payload.insert("sym".to_string(), Value::from(symbol));
        payload.insert("typ".to_string(), Value::from(order_type.as_str()));
        payload.insert("amt".to_string(), Value::from(format_amount(amount)));
        payload.insert("rat".to_string(), Value::from(format_amount(rate)));
        if let Some(client_id) = options.client_id.as_deref().filter(|c| !c.is_empty()) {
            payload.insert("client_id".to_string(), Value::from(client_id));
        }

        let body = self.rest_client.post_signed(endpoint, payload).await?;
        codec::decode_object(&body).map(|d| d.result)
    }

    pub async fn cancel_order(&self, order: &OrderRef) -> Result<(), ExchangeError> {
        let body = self
            .rest_client
            .post_signed("/api/market/cancel-order", order_ref_payload(order))
            .await?;
        codec::decode_ack(&body)
    }

    pub async fn get_open_orders(&self, symbol: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        let mut payload = Payload::new();
        payload.insert("sym".to_string(), Value::from(symbol));
        let body = self
            .rest_client
            .post_signed("/api/market/my-open-orders", payload)
            .await?;
        codec::decode_object(&body).map(|d| d.result)
    }

    pub async fn get_order_history(
        &self,
        symbol: &str,
        request: HistoryRequest,
    ) -> Result<Decoded<Vec<OrderHistory>>, ExchangeError> {
        let mut payload = Payload::new();
        payload.insert("sym".to_string(), Value::from(symbol));
        insert_page(
            &mut payload,
            PageRequest {
                page: request.page,
                limit: request.limit,
            },
        );
        if let Some(start) = request.start.filter(|t| *t > 0) {
            payload.insert("start".to_string(), Value::from(start));
        }
        if let Some(end) = request.end.filter(|t| *t > 0) {
            payload.insert("end".to_string(), Value::from(end));
        }

        let body = self
            .rest_client
            .post_signed("/api/market/my-order-history", payload)
            .await?;
        codec::decode_object(&body)
    }

    pub async fn get_order_info(&self, order: &OrderRef) -> Result<OrderInfo, ExchangeError> {
        let body = self
            .rest_client
            .post_signed("/api/market/order-info", order_ref_payload(order))
            .await?;
        codec::decode_object(&body).map(|d| d.result)
    }

    // Private account

    async fn post_empty(&self, endpoint: &str) -> Result<Vec<u8>, ExchangeError> {
        self.rest_client.post_signed(endpoint, Payload::new()).await
    }

    async fn post_paged<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        page: PageRequest,
    ) -> Result<Decoded<Vec<T>>, ExchangeError> {
        let mut payload = Payload::new();
        insert_page(&mut payload, page);
        let body = self.rest_client.post_signed(endpoint, payload).await?;
        codec::decode_object(&body)
    }

    pub async fn get_wallet(&self) -> Result<HashMap<String, f64>, ExchangeError> {
        let body = self.post_empty("/api/market/wallet").await?;
        codec::decode_object(&body).map(|d| d.result)
    }

    pub async fn get_balances(&self) -> Result<HashMap<String, Balance>, ExchangeError> {
        let body = self.post_empty("/api/market/balances").await?;
        codec::decode_object(&body).map(|d| d.result)
    }

    pub async fn get_crypto_addresses(
        &self,
        page: PageRequest,
    ) -> Result<Decoded<Vec<CryptoAddress>>, ExchangeError> {
        self.post_paged("/api/crypto/addresses", page).await
    }

    /// `endpoint` is either the external or the internal withdrawal path.
    pub async fn crypto_withdraw(
        &self,
        endpoint: &str,
        currency: &str,
        address: &str,
        amount: f64,
        memo: Option<&str>,
    ) -> Result<CryptoWithdraw, ExchangeError> {
        let mut payload = Payload::new();
        payload.insert("cur".to_string(), Value::from(currency));
        payload.insert("adr".to_string(), Value::from(address));
        payload.insert("amt".to_string(), Value::from(format_amount(amount)));
        if let Some(memo) = memo.filter(|m| !m.is_empty()) {
            payload.insert("mem".to_string(), Value::from(memo));
        }

        let body = self.rest_client.post_signed(endpoint, payload).await?;
        codec::decode_object(&body).map(|d| d.result)
    }

    pub async fn get_crypto_deposit_history(
        &self,
        page: PageRequest,
    ) -> Result<Decoded<Vec<CryptoDeposit>>, ExchangeError> {
        self.post_paged("/api/crypto/deposit-history", page).await
    }

    pub async fn get_crypto_withdraw_history(
        &self,
        page: PageRequest,
    ) -> Result<Decoded<Vec<CryptoWithdraw>>, ExchangeError> {
        self.post_paged("/api/crypto/withdraw-history", page).await
    }

    pub async fn generate_crypto_address(
        &self,
        symbol: &str,
    ) -> Result<Vec<CryptoGenerateAddress>, ExchangeError> {
        let mut payload = Payload::new();
        payload.insert("sym".to_string(), Value::from(symbol));
        let body = self
            .rest_client
            .post_signed("/api/crypto/generate-address", payload)
            .await?;
        codec::decode_object(&body).map(|d| d.result)
    }

    pub async fn get_bank_accounts(
        &self,
        page: PageRequest,
    ) -> Result<Decoded<Vec<BankAccount>>, ExchangeError> {
        self.post_paged("/api/fiat/accounts", page).await
    }

    pub async fn fiat_withdraw(
        &self,
        bank_id: &str,
        amount: f64,
    ) -> Result<FiatWithdraw, ExchangeError> {
        let mut payload = Payload::new();
        payload.insert("id".to_string(), Value::from(bank_id));
        // fiat amounts travel as a JSON number, unlike the `amt` strings
        payload.insert("amount".to_string(), Value::from(amount));
        let body = self
            .rest_client
            .post_signed("/api/fiat/withdraw", payload)
            .await?;
        codec::decode_object(&body).map(|d| d.result)
    }

    pub async fn get_fiat_deposit_history(
        &self,
        page: PageRequest,
    ) -> Result<Decoded<Vec<FiatDeposit>>, ExchangeError> {
        self.post_paged("/api/fiat/deposit-history", page).await
    }

    pub async fn get_fiat_withdraw_history(
        &self,
        page: PageRequest,
    ) -> Result<Decoded<Vec<FiatWithdraw>>, ExchangeError> {
        self.post_paged("/api/fiat/withdraw-history", page).await
    }

    pub async fn get_websocket_token(&self) -> Result<String, ExchangeError> {
        let body = self.post_empty("/api/market/wstoken").await?;
        codec::decode_string(&body)
    }

    pub async fn get_user_limits(&self) -> Result<UserLimits, ExchangeError> {
        let body = self.post_empty("/api/user/limits").await?;
        codec::decode_object(&body).map(|d| d.result)
    }

    pub async fn get_trading_credits(&self) -> Result<f64, ExchangeError> {
        let body = self.post_empty("/api/user/trading-credits").await?;
        codec::decode_number(&body)
    }
}
