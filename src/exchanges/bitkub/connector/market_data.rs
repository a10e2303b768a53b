use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::bitkub::connector::require_non_empty;
use crate::exchanges::bitkub::rest::BitkubRest;
use crate::exchanges::bitkub::types::{
    BidAsk, DepthLevel, MarketSymbol, ServerStatus, Ticker, Trade, TradingViewHistory,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::instrument;

/// Public Bitkub market data. No credentials needed.
pub struct MarketData<R: RestClient> {
    rest: BitkubRest<R>,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: BitkubRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> MarketData<R> {
    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_server_status(&self) -> Result<Vec<ServerStatus>, ExchangeError> {
        self.rest.get_server_status().await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_server_time(&self) -> Result<DateTime<Utc>, ExchangeError> {
        self.rest.get_server_time().await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_symbols(&self) -> Result<Vec<MarketSymbol>, ExchangeError> {
        self.rest.get_symbols().await
    }

    /// Tickers keyed by symbol. `None` returns every market.
    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_tickers(
        &self,
        symbol: Option<&str>,
    ) -> Result<HashMap<String, Ticker>, ExchangeError> {
        self.rest.get_tickers(symbol).await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>, ExchangeError> {
        require_non_empty("symbol", symbol)?;
        self.rest.get_trades(symbol, limit).await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_bids(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<BidAsk>, ExchangeError> {
        require_non_empty("symbol", symbol)?;
        self.rest.get_bids(symbol, limit).await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_asks(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<BidAsk>, ExchangeError> {
        require_non_empty("symbol", symbol)?;
        self.rest.get_asks(symbol, limit).await
    }

    /// Open bids and asks in one call, keyed `bids` and `asks`.
    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_books(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<HashMap<String, Vec<BidAsk>>, ExchangeError> {
        require_non_empty("symbol", symbol)?;
        self.rest.get_books(symbol, limit).await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_depth(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<HashMap<String, Vec<DepthLevel>>, ExchangeError> {
        require_non_empty("symbol", symbol)?;
        self.rest.get_depth(symbol, limit).await
    }

    /// Candles in TradingView's column layout. `from` and `to` are Unix seconds.
    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_tradingview_history(
        &self,
        symbol: &str,
        resolution: &str,
        from: Option<i64>,
        to: Option<i64>,
    ) -> Result<TradingViewHistory, ExchangeError> {
        require_non_empty("symbol", symbol)?;
        require_non_empty("resolution", resolution)?;
        self.rest
            .get_tradingview_history(symbol, resolution, from, to)
            .await
    }
}
