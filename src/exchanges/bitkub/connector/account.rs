use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::bitkub::codec::Decoded;
use crate::exchanges::bitkub::connector::{
    ensure_authenticated, require_non_empty, require_positive,
};
use crate::exchanges::bitkub::rest::{BitkubRest, CRYPTO_INTERNAL_WITHDRAW, CRYPTO_WITHDRAW};
use crate::exchanges::bitkub::types::{
    Balance, BankAccount, CryptoAddress, CryptoDeposit, CryptoGenerateAddress, CryptoWithdraw,
    FiatDeposit, FiatWithdraw, PageRequest, UserLimits,
};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Wallet, funding and account-limit endpoints
pub struct Account<R: RestClient> {
    rest: BitkubRest<R>,
    authenticated: bool,
}

impl<R: RestClient + Clone> Account<R> {
    pub fn new(rest: &R, authenticated: bool) -> Self {
        Self {
            rest: BitkubRest::new(rest.clone()),
            authenticated,
        }
    }
}

impl<R: RestClient> Account<R> {
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn gate(&self) -> Result<(), ExchangeError> {
        ensure_authenticated(self.authenticated)
    }

    /// Available balance per currency.
    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_wallet(&self) -> Result<HashMap<String, f64>, ExchangeError> {
        self.gate()?;
        self.rest.get_wallet().await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_balances(&self) -> Result<HashMap<String, Balance>, ExchangeError> {
        self.gate()?;
        self.rest.get_balances().await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_crypto_addresses(
        &self,
        page: PageRequest,
    ) -> Result<Decoded<Vec<CryptoAddress>>, ExchangeError> {
        self.gate()?;
        self.rest.get_crypto_addresses(page).await
    }

    /// Withdraw to a whitelisted external address.
    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn crypto_withdraw(
        &self,
        currency: &str,
        address: &str,
        amount: f64,
        memo: Option<&str>,
    ) -> Result<CryptoWithdraw, ExchangeError> {
        self.withdraw_crypto(CRYPTO_WITHDRAW, currency, address, amount, memo)
            .await
    }

    /// Withdraw to another Bitkub account.
    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn crypto_internal_withdraw(
        &self,
        currency: &str,
        address: &str,
        amount: f64,
        memo: Option<&str>,
    ) -> Result<CryptoWithdraw, ExchangeError> {
        self.withdraw_crypto(CRYPTO_INTERNAL_WITHDRAW, currency, address, amount, memo)
            .await
    }

    async fn withdraw_crypto(
        &self,
        endpoint: &str,
        currency: &str,
        address: &str,
        amount: f64,
        memo: Option<&str>,
    ) -> Result<CryptoWithdraw, ExchangeError> {
        self.gate()?;
        require_non_empty("currency", currency)?;
        require_non_empty("address", address)?;
        require_positive("amount", amount)?;

        let withdrawal = self
            .rest
            .crypto_withdraw(endpoint, currency, address, amount, memo)
            .await?;
        info!(txn_id = %withdrawal.txn_id, currency, "Crypto withdrawal submitted");
        Ok(withdrawal)
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_crypto_deposit_history(
        &self,
        page: PageRequest,
    ) -> Result<Decoded<Vec<CryptoDeposit>>, ExchangeError> {
        self.gate()?;
        self.rest.get_crypto_deposit_history(page).await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_crypto_withdraw_history(
        &self,
        page: PageRequest,
    ) -> Result<Decoded<Vec<CryptoWithdraw>>, ExchangeError> {
        self.gate()?;
        self.rest.get_crypto_withdraw_history(page).await
    }

    /// Create a new deposit address for `symbol`, e.g. `THB_ETH`.
    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn generate_crypto_address(
        &self,
        symbol: &str,
    ) -> Result<Vec<CryptoGenerateAddress>, ExchangeError> {
        self.gate()?;
        require_non_empty("symbol", symbol)?;
        self.rest.generate_crypto_address(symbol).await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_bank_accounts(
        &self,
        page: PageRequest,
    ) -> Result<Decoded<Vec<BankAccount>>, ExchangeError> {
        self.gate()?;
        self.rest.get_bank_accounts(page).await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn fiat_withdraw(
        &self,
        bank_id: &str,
        amount: f64,
    ) -> Result<FiatWithdraw, ExchangeError> {
        self.gate()?;
        require_non_empty("bank id", bank_id)?;
        require_positive("amount", amount)?;

        let withdrawal = self.rest.fiat_withdraw(bank_id, amount).await?;
        info!(txn_id = %withdrawal.txn_id, "Fiat withdrawal submitted");
        Ok(withdrawal)
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_fiat_deposit_history(
        &self,
        page: PageRequest,
    ) -> Result<Decoded<Vec<FiatDeposit>>, ExchangeError> {
        self.gate()?;
        self.rest.get_fiat_deposit_history(page).await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_fiat_withdraw_history(
        &self,
        page: PageRequest,
    ) -> Result<Decoded<Vec<FiatWithdraw>>, ExchangeError> {
        self.gate()?;
        self.rest.get_fiat_withdraw_history(page).await
    }

    /// Opaque token for the private websocket feed.
    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_websocket_token(&self) -> Result<String, ExchangeError> {
        self.gate()?;
        self.rest.get_websocket_token().await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_user_limits(&self) -> Result<UserLimits, ExchangeError> {
        self.gate()?;
        self.rest.get_user_limits().await
    }

    #[instrument(skip(self), fields(exchange = "bitkub"))]
    pub async fn get_trading_credits(&self) -> Result<f64, ExchangeError> {
        self.gate()?;
        self.rest.get_trading_credits().await
    }
}
