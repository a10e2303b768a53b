use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::bitkub::codec::Decoded;
use crate::exchanges::bitkub::connector::{
    ensure_authenticated, require_finite, require_non_empty, validate_order_ref,
};
use crate::exchanges::bitkub::rest::{
    BitkubRest, PLACE_ASK, PLACE_ASK_BY_FIAT, PLACE_ASK_TEST, PLACE_BID, PLACE_BID_TEST,
};
use crate::exchanges::bitkub::types::{
    HistoryRequest, OpenOrder, Order, OrderHistory, OrderInfo, OrderOptions, OrderRef, OrderType,
};
use tracing::{debug, instrument};

/// Order placement and lookup on Bitkub
pub struct Trading<R: RestClient> {
    rest: BitkubRest<R>,
    authenticated: bool,
}

impl<R: RestClient + Clone> Trading<R> {
    pub fn new(rest: &R, authenticated: bool) -> Self {
        Self {
            rest: BitkubRest::new(rest.clone()),
            authenticated,
        }
    }
}

impl<R: RestClient> Trading<R> {
    async fn place(
        &self,
        endpoint: &str,
        symbol: &str,
        amount: f64,
        rate: f64,
        order_type: OrderType,
        options: &OrderOptions,
    ) -> Result<Order, ExchangeError> {
        ensure_authenticated(self.authenticated)?;
        require_non_empty("symbol", symbol)?;
        require_finite("amount", amount)?;
        if order_type == OrderType::Limit {
            require_finite("rate", rate)?;
        }

        let order = self
            .rest
            .place_order(endpoint, symbol, amount, rate, order_type, options)
            .await?;
        debug!(order_id = order.id, hash = %order.hash, "Order accepted");
        Ok(order)
    }

    /// Buy `amount` of quote currency worth of `symbol`.
    ///
    /// For market orders `rate` is ignored and sent as zero.
    #[instrument(skip(self, options), fields(exchange = "bitkub"))]
    pub async fn place_bid(
        &self,
        symbol: &str,
        amount: f64,
        rate: f64,
        order_type: OrderType,
        options: OrderOptions,
    ) -> Result<Order, ExchangeError> {
        self.place(PLACE_BID, symbol, amount, rate, order_type, &options)
            .await
    }

    /// Same as [`Self::place_bid`] against the validation-only endpoint.
    #[instrument(skip(self, options), fields(exchange = "bitkub"))]
    pub async fn place_bid_test(
        &self,
        symbol: &str,
        amount: f64,
        rate: f64,
        order_type: OrderType,
        options: OrderOptions,
    ) -> Result<Order, ExchangeError> {
        self.place(PLACE_BID_TEST, symbol, amount, rate, order_type, &options)
            .await
    }

    /// Sell `amount` of base currency.
    #[instrument(skip(self, options), fields(exchange = "bitkub"))]
    pub async fn place_ask(
        &self,
        symbol: &str,
        amount: f64,
        rate: f64,
        order_type: OrderType,
        options: OrderOptions,
    ) -> Result<Order, ExchangeError> {
        self.place(PLACE_ASK, symbol, amount, rate, order_type, &options)
            .await
    }

    #[instrument(skip(self, options), fields(exchange = "bitkub"))]
    pub async fn place_ask_test(
        &self,
        symbol: &str,
        amount: f64,
        rate: f64,
        order_type: OrderType,
        options: OrderOptions,
    ) -> Result<Order, ExchangeError> {
        self.place(PLACE_ASK_TEST, symbol, amount, rate, order_type, &options)
            .await
    }

    /// Sell enough base currency to receive `amount` of fiat.
    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn place_ask_by_fiat(
        &self,
        symbol: &str,
        amount: f64,
        rate: f64,
        order_type: OrderType,
    ) -> Result<Order, ExchangeError> {
        self.place(
            PLACE_ASK_BY_FIAT,
            symbol,
            amount,
            rate,
            order_type,
            &OrderOptions::default(),
        )
        .await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn cancel_order(&self, order: &OrderRef) -> Result<(), ExchangeError> {
        ensure_authenticated(self.authenticated)?;
        validate_order_ref(order)?;
        self.rest.cancel_order(order).await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_open_orders(&self, symbol: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        ensure_authenticated(self.authenticated)?;
        require_non_empty("symbol", symbol)?;
        self.rest.get_open_orders(symbol).await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_order_history(
        &self,
        symbol: &str,
        request: HistoryRequest,
    ) -> Result<Decoded<Vec<OrderHistory>>, ExchangeError> {
        ensure_authenticated(self.authenticated)?;
        require_non_empty("symbol", symbol)?;
        self.rest.get_order_history(symbol, request).await
    }

    /// Fill state of one order. A partial fill is a normal result, see
    /// [`OrderInfo::partial_filled`].
    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_order_info(&self, order: &OrderRef) -> Result<OrderInfo, ExchangeError> {
        ensure_authenticated(self.authenticated)?;
        validate_order_ref(order)?;
        self.rest.get_order_info(order).await
    }
}
