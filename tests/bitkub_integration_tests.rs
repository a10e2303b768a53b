
use async_trait::async_trait;
use bitkub_connector::core::config::ExchangeConfig;
use bitkub_connector::core::errors::{ErrorClass, ExchangeError};
use bitkub_connector::core::kernel::{Payload, RestClient, Signer};
use bitkub_connector::exchanges::bitkub::signer::{BitkubSigner, API_KEY_HEADER};
use bitkub_connector::exchanges::bitkub::{
    BitkubConnector, HistoryRequest, OrderOptions, OrderRef, OrderSide, OrderType, PageRequest,
};
use integration_test_config::TestConfig;
use secrecy::Secret;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const FIXED_TS: u64 = 1_700_000_000_000;

#[derive(Debug, Clone)]
enum Call {
    Get {
        endpoint: String,
        query: Vec<(String, String)>,
    },
    Post {
        endpoint: String,
        body: Payload,
        headers: HashMap<String, String>,
    },
}

struct MockState {
    responses: HashMap<String, String>,
    calls: Mutex<Vec<Call>>,
    signer: BitkubSigner,
}

/// Transport double: canned bodies per endpoint, every call recorded
#[derive(Clone)]
struct MockRest {
    state: Arc<MockState>,
}

impl MockRest {
    fn with_responses(responses: &[(&str, &str)]) -> Self {
        Self {
            state: Arc::new(MockState {
                responses: responses
                    .iter()
                    .map(|(endpoint, body)| ((*endpoint).to_string(), (*body).to_string()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
                signer: BitkubSigner::new(
                    Secret::new("test_api_key".to_string()),
                    Secret::new("test_secret_key".to_string()),
                ),
            }),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.state.calls.lock().unwrap().clone()
    }

    fn call_count(&self) -> usize {
        self.state.calls.lock().unwrap().len()
    }

    fn last_post_body(&self) -> Payload {
        match self.calls().pop() {
            Some(Call::Post { body, .. }) => body,
            other => panic!("expected a POST, got {:?}", other),
        }
    }

    fn respond(&self, endpoint: &str) -> Result<Vec<u8>, ExchangeError> {
        self.state
            .responses
            .get(endpoint)
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| ExchangeError::HttpStatus {
                status: 404,
                body: "not found".to_string(),
            })
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError> {
        self.state.calls.lock().unwrap().push(Call::Get {
            endpoint: endpoint.to_string(),
            query: query_params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        });
        self.respond(endpoint)
    }

    async fn post_signed(
        &self,
        endpoint: &str,
        payload: Payload,
    ) -> Result<Vec<u8>, ExchangeError> {
        let signed = self.state.signer.sign_request(endpoint, payload, FIXED_TS)?;
        self.state.calls.lock().unwrap().push(Call::Post {
            endpoint: endpoint.to_string(),
            body: serde_json::from_slice(&signed.body).unwrap(),
            headers: signed.headers,
        });
        self.respond(endpoint)
    }
}

fn authenticated(mock: &MockRest) -> BitkubConnector<MockRest> {
    BitkubConnector::new(mock.clone(), &TestConfig::create_safe_config())
}

fn read_only(mock: &MockRest) -> BitkubConnector<MockRest> {
    BitkubConnector::new(mock.clone(), &ExchangeConfig::read_only())
}

const ORDER_ACK: &str = r#"{"error":0,"result":{"id":1,"hash":"fwQ6dnQWQPs4cbatF5Am2xCDP1J",
    "typ":"limit","amt":1000,"rat":15000,"fee":2.5,"cre":2.5,"rec":0.06666666,"ts":1533834547}}"#;

#[cfg(test)]
mod precondition_tests {
    use super::*;

    #[tokio::test]
    async fn test_private_calls_without_credentials_never_reach_transport() {
        let mock = MockRest::with_responses(&[]);
        let bitkub = read_only(&mock);
        assert!(!bitkub.is_authenticated());

        let results = vec![
            bitkub.account.get_wallet().await.map(|_| ()),
            bitkub.account.get_balances().await.map(|_| ()),
            bitkub.account.get_websocket_token().await.map(|_| ()),
            bitkub
                .account
                .crypto_withdraw("BTC", "1Addr", 0.1, None)
                .await
                .map(|_| ()),
            bitkub.account.fiat_withdraw("1", 100.0).await.map(|_| ()),
            bitkub
                .trading
                .place_bid("THB_BTC", 1000.0, 216_000.0, OrderType::Limit, OrderOptions::default())
                .await
                .map(|_| ()),
            bitkub
                .trading
                .cancel_order(&OrderRef::Hash("abc".to_string()))
                .await,
            bitkub.trading.get_open_orders("THB_BTC").await.map(|_| ()),
        ];

        for result in results {
            let err = result.unwrap_err();
            assert!(matches!(err, ExchangeError::AuthenticationRequired));
            assert_eq!(err.class(), ErrorClass::Precondition);
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_credentials_are_checked_before_fields() {
        let mock = MockRest::with_responses(&[]);
        let bitkub = read_only(&mock);

        // empty symbol would also be rejected; credentials come first
        let err = bitkub.trading.get_open_orders("").await.unwrap_err();
        assert!(matches!(err, ExchangeError::AuthenticationRequired));
    }

    #[tokio::test]
    async fn test_invalid_fields_never_reach_transport() {
        let mock = MockRest::with_responses(&[]);
        let bitkub = authenticated(&mock);

        let errors = vec![
            bitkub
                .trading
                .place_ask("", 1.0, 1.0, OrderType::Limit, OrderOptions::default())
                .await
                .map(|_| ())
                .unwrap_err(),
            bitkub
                .trading
                .place_bid("THB_BTC", f64::NAN, 1.0, OrderType::Limit, OrderOptions::default())
                .await
                .map(|_| ())
                .unwrap_err(),
            bitkub
                .trading
                .cancel_order(&OrderRef::Id {
                    symbol: "THB_BTC".to_string(),
                    id: 0,
                    side: OrderSide::Buy,
                })
                .await
                .unwrap_err(),
            bitkub
                .trading
                .get_order_info(&OrderRef::Hash(String::new()))
                .await
                .map(|_| ())
                .unwrap_err(),
            bitkub
                .account
                .crypto_withdraw("BTC", "1Addr", 0.0, None)
                .await
                .map(|_| ())
                .unwrap_err(),
            bitkub
                .account
                .crypto_internal_withdraw("", "1Addr", 1.0, None)
                .await
                .map(|_| ())
                .unwrap_err(),
            bitkub
                .account
                .fiat_withdraw("", 100.0)
                .await
                .map(|_| ())
                .unwrap_err(),
            bitkub
                .account
                .generate_crypto_address("")
                .await
                .map(|_| ())
                .unwrap_err(),
            bitkub.market.get_trades("", None).await.map(|_| ()).unwrap_err(),
        ];

        for err in errors {
            assert!(
                matches!(err, ExchangeError::InvalidParameters(_)),
                "unexpected error: {:?}",
                err
            );
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_order_type_and_side_parsing() {
        assert_eq!("limit".parse::<OrderType>().unwrap(), OrderType::Limit);
        assert!("".parse::<OrderType>().is_err());
        assert!("stop".parse::<OrderType>().is_err());
        assert!("hold".parse::<OrderSide>().is_err());
    }
}

#[cfg(test)]
mod trading_tests {
    use super::*;

    #[tokio::test]
    async fn test_place_bid_sends_formatted_signed_payload() {
        let mock = MockRest::with_responses(&[("/api/market/place-bid", ORDER_ACK)]);
        let bitkub = authenticated(&mock);

        let order = bitkub
            .trading
            .place_bid(
                "THB_BTC",
                1000.0,
                15000.100,
                OrderType::Limit,
                OrderOptions {
                    client_id: Some("my-ref".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(order.id, 1);
        assert_eq!(order.hash, "fwQ6dnQWQPs4cbatF5Am2xCDP1J");
        assert_eq!(order.amount, 1000.0);

        match mock.calls().pop().unwrap() {
            Call::Post {
                endpoint,
                body,
                headers,
            } => {
                assert_eq!(endpoint, "/api/market/place-bid");
                assert_eq!(body["sym"], "THB_BTC");
                assert_eq!(body["typ"], "limit");
                assert_eq!(body["amt"], "1000");
                assert_eq!(body["rat"], "15000.1");
                assert_eq!(body["client_id"], "my-ref");
                assert_eq!(body["ts"], Value::from(FIXED_TS));
                assert_eq!(body["sig"].as_str().unwrap().len(), 64);
                assert_eq!(headers[API_KEY_HEADER], "test_api_key");
            }
            other => panic!("expected a POST, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_market_order_forces_zero_rate() {
        let mock = MockRest::with_responses(&[("/api/market/place-ask/test", ORDER_ACK)]);
        let bitkub = authenticated(&mock);

        bitkub
            .trading
            .place_ask_test(
                "THB_BTC",
                0.0010,
                999_999.0,
                OrderType::Market,
                OrderOptions::default(),
            )
            .await
            .unwrap();

        let body = mock.last_post_body();
        assert_eq!(body["typ"], "market");
        assert_eq!(body["amt"], "0.001");
        assert_eq!(body["rat"], "0");
        assert!(!body.contains_key("client_id"));
    }

    #[tokio::test]
    async fn test_cancel_by_id_sends_string_id() {
        let mock = MockRest::with_responses(&[("/api/market/cancel-order", r#"{"error":0}"#)]);
        let bitkub = authenticated(&mock);

        bitkub
            .trading
            .cancel_order(&OrderRef::Id {
                symbol: "THB_BTC".to_string(),
                id: 9876,
                side: OrderSide::Sell,
            })
            .await
            .unwrap();

        let body = mock.last_post_body();
        assert_eq!(body["id"], "9876");
        assert_eq!(body["sd"], "sell");
        assert!(!body.contains_key("hash"));
    }

    #[tokio::test]
    async fn test_domain_error_surfaces_catalog_message() {
        let mock = MockRest::with_responses(&[(
            "/api/market/place-bid",
            r#"{"error":18,"result":null}"#,
        )]);
        let bitkub = authenticated(&mock);

        let err = bitkub
            .trading
            .place_bid("THB_BTC", 1000.0, 1.0, OrderType::Limit, OrderOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Domain);
        assert_eq!(err.api_code(), Some(18));
        assert_eq!(err.to_string(), "API error: 18 - Insufficient balance");
    }

    #[tokio::test]
    async fn test_order_history_with_pagination() {
        let body = r#"{"error":0,"result":[{"txn_id":"ETHBUY0000000197","order_id":240,
            "hash":"abc","side":"buy","type":"limit","rate":13335.57,"fee":0.34,"credit":0.34,
            "amount":0.00999987,"ts":1531386182}],
            "pagination":{"page":1,"last":3,"next":2}}"#;
        let mock = MockRest::with_responses(&[("/api/market/my-order-history", body)]);
        let bitkub = authenticated(&mock);

        let history = bitkub
            .trading
            .get_order_history(
                "THB_ETH",
                HistoryRequest {
                    page: Some(1),
                    limit: Some(10),
                    start: Some(1_531_000_000),
                    end: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(history.result.len(), 1);
        assert_eq!(history.result[0].order_id, 240);
        let pagination = history.pagination.unwrap();
        assert_eq!(pagination.last, 3);
        assert_eq!(pagination.next, Some(2));
        assert_eq!(pagination.prev, None);

        let sent = mock.last_post_body();
        assert_eq!(sent["p"], 1);
        assert_eq!(sent["lmt"], 10);
        assert_eq!(sent["start"], 1_531_000_000_i64);
        assert!(!sent.contains_key("end"));
    }

    #[tokio::test]
    async fn test_partial_fill_is_a_successful_decode() {
        let body = r#"{"error":0,"result":{"id":289,"first":289,"parent":0,"last":316,
            "amount":4000,"rate":291000,"fee":10,"credit":10,"filled":3999.97,"total":4010,
            "status":"unfilled","partial_filled":true,"remaining":0.03,"history":[]}}"#;
        let mock = MockRest::with_responses(&[("/api/market/order-info", body)]);
        let bitkub = authenticated(&mock);

        let info = bitkub
            .trading
            .get_order_info(&OrderRef::Hash("fwQ6dnQWQPs4cbatF5Am2xCDP1J".to_string()))
            .await
            .unwrap();
        assert!(info.partial_filled);
        assert_eq!(info.status, "unfilled");
    }

    #[tokio::test]
    async fn test_place_ask_by_fiat_payload() {
        let mock = MockRest::with_responses(&[("/api/market/place-ask-by-fiat", ORDER_ACK)]);
        let bitkub = authenticated(&mock);

        let order = bitkub
            .trading
            .place_ask_by_fiat("THB_BTC", 1000.0, 216_000.50, OrderType::Limit)
            .await
            .unwrap();
        assert_eq!(order.rate, 15000.0);
        assert_eq!(order.receive, 0.06666666);

        match mock.calls().pop().unwrap() {
            Call::Post { endpoint, body, .. } => {
                assert_eq!(endpoint, "/api/market/place-ask-by-fiat");
                assert_eq!(body["sym"], "THB_BTC");
                assert_eq!(body["typ"], "limit");
                assert_eq!(body["amt"], "1000");
                assert_eq!(body["rat"], "216000.5");
                assert!(!body.contains_key("client_id"));
            }
            other => panic!("expected a POST, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_open_orders_decode() {
        let body = r#"{"error":0,"result":[{"id":2,"hash":"fwQ6dnQWQPs4cbatFSJpMCcKTFR",
            "side":"sell","type":"limit","rate":0,"fee":0,"credit":0,"amount":0.999,
            "receive":0,"parent_id":1,"super_id":1,"client_id":"client_id","ts":1533834844}]}"#;
        let mock = MockRest::with_responses(&[("/api/market/my-open-orders", body)]);
        let bitkub = authenticated(&mock);

        let orders = bitkub.trading.get_open_orders("THB_BTC").await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, 2);
        assert_eq!(orders[0].hash, "fwQ6dnQWQPs4cbatFSJpMCcKTFR");
        assert_eq!(orders[0].side, "sell");
        assert_eq!(orders[0].order_type, "limit");
        assert_eq!(orders[0].amount, 0.999);
        assert_eq!(orders[0].parent_id, 1);
        assert_eq!(orders[0].super_id, 1);
        assert_eq!(orders[0].client_id.as_deref(), Some("client_id"));
        assert_eq!(orders[0].timestamp, 1_533_834_844);

        match mock.calls().pop().unwrap() {
            Call::Post { endpoint, body, .. } => {
                assert_eq!(endpoint, "/api/market/my-open-orders");
                assert_eq!(body["sym"], "THB_BTC");
                assert_eq!(body.len(), 3);
            }
            other => panic!("expected a POST, got {:?}", other),
        }
    }
}

#[cfg(test)]
mod account_tests {
    use super::*;

    #[tokio::test]
    async fn test_wallet_and_balances() {
        let mock = MockRest::with_responses(&[
            (
                "/api/market/wallet",
                r#"{"error":0,"result":{"THB":188379.27,"BTC":8.90397323}}"#,
            ),
            (
                "/api/market/balances",
                r#"{"error":0,"result":{"THB":{"available":188379.27,"reserved":0}}}"#,
            ),
        ]);
        let bitkub = authenticated(&mock);

        let wallet = bitkub.account.get_wallet().await.unwrap();
        assert_eq!(wallet["BTC"], 8.903_973_23);

        let balances = bitkub.account.get_balances().await.unwrap();
        assert_eq!(balances["THB"].available, 188_379.27);

        // empty payloads are still signed
        let body = mock.last_post_body();
        assert_eq!(body.keys().collect::<Vec<_>>(), vec!["sig", "ts"]);
    }

    #[tokio::test]
    async fn test_crypto_withdraw_payload() {
        let body = r#"{"error":0,"result":{"txn":"BTCWD0000012345","adr":"4asyjKw1XnzS",
            "mem":"","cur":"BTC","amt":0.1,"fee":0.0002,"ts":1569999999}}"#;
        let mock = MockRest::with_responses(&[("/api/crypto/internal-withdraw", body)]);
        let bitkub = authenticated(&mock);

        let withdrawal = bitkub
            .account
            .crypto_internal_withdraw("BTC", "4asyjKw1XnzS", 0.100, Some("memo-1"))
            .await
            .unwrap();
        assert_eq!(withdrawal.txn_id, "BTCWD0000012345");

        let sent = mock.last_post_body();
        assert_eq!(sent["cur"], "BTC");
        assert_eq!(sent["adr"], "4asyjKw1XnzS");
        assert_eq!(sent["amt"], "0.1");
        assert_eq!(sent["mem"], "memo-1");
    }

    #[tokio::test]
    async fn test_scalar_results() {
        let mock = MockRest::with_responses(&[
            ("/api/market/wstoken", r#"{"error":0,"result":"tokenXyz"}"#),
            ("/api/user/trading-credits", r#"{"error":0,"result":1000}"#),
        ]);
        let bitkub = authenticated(&mock);

        assert_eq!(bitkub.account.get_websocket_token().await.unwrap(), "tokenXyz");
        assert_eq!(bitkub.account.get_trading_credits().await.unwrap(), 1000.0);
    }

    #[tokio::test]
    async fn test_paged_history_omits_unset_paging() {
        let mock = MockRest::with_responses(&[(
            "/api/fiat/deposit-history",
            r#"{"error":0,"result":[],"pagination":{"page":1,"last":1}}"#,
        )]);
        let bitkub = authenticated(&mock);

        let deposits = bitkub
            .account
            .get_fiat_deposit_history(PageRequest::default())
            .await
            .unwrap();
        assert!(deposits.result.is_empty());
        assert_eq!(deposits.pagination.unwrap().page, 1);

        let sent = mock.last_post_body();
        assert!(!sent.contains_key("p"));
        assert!(!sent.contains_key("lmt"));
    }

    #[tokio::test]
    async fn test_generate_crypto_address() {
        let body = r#"{"error":0,"result":[{"currency":"ETH",
            "address":"0x520165471daa570ab632dd504c6af257bd36edfb","mem":""}]}"#;
        let mock = MockRest::with_responses(&[("/api/crypto/generate-address", body)]);
        let bitkub = authenticated(&mock);

        let addresses = bitkub
            .account
            .generate_crypto_address("THB_ETH")
            .await
            .unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].currency, "ETH");
        assert_eq!(
            addresses[0].address,
            "0x520165471daa570ab632dd504c6af257bd36edfb"
        );
        assert_eq!(addresses[0].memo, "");

        match mock.calls().pop().unwrap() {
            Call::Post { endpoint, body, .. } => {
                assert_eq!(endpoint, "/api/crypto/generate-address");
                assert_eq!(body["sym"], "THB_ETH");
            }
            other => panic!("expected a POST, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fiat_withdraw_sends_numeric_amount() {
        let body = r#"{"error":0,"result":{"txn":"THBWD0000012345","acc":"7262109099",
            "cur":"THB","amt":21,"fee":20,"rec":1,"ts":1569999999}}"#;
        let mock = MockRest::with_responses(&[("/api/fiat/withdraw", body)]);
        let bitkub = authenticated(&mock);

        let withdrawal = bitkub
            .account
            .fiat_withdraw("7262109099", 21.5)
            .await
            .unwrap();
        assert_eq!(withdrawal.txn_id, "THBWD0000012345");
        assert_eq!(withdrawal.account_id, "7262109099");
        assert_eq!(withdrawal.currency, "THB");
        assert_eq!(withdrawal.amount, 21.0);
        assert_eq!(withdrawal.fee, 20.0);
        assert_eq!(withdrawal.receive, 1.0);
        assert_eq!(withdrawal.timestamp, 1_569_999_999);

        match mock.calls().pop().unwrap() {
            Call::Post { endpoint, body, .. } => {
                assert_eq!(endpoint, "/api/fiat/withdraw");
                assert_eq!(body["id"], "7262109099");
                assert_eq!(body["amount"], Value::from(21.5));
                assert!(body["amount"].is_number());
            }
            other => panic!("expected a POST, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_user_limits_nested_fields() {
        let body = r#"{"error":0,"result":{
            "limits":{"crypto":{"deposit":0.88971929,"withdraw":0.88971929},
                      "fiat":{"deposit":200000,"withdraw":200000}},
            "usage":{"crypto":{"deposit":0,"withdraw":0,"deposit_percentage":0,
                               "withdraw_percentage":0,"deposit_thb_equivalent":0,
                               "withdraw_thb_equivalent":0},
                     "fiat":{"deposit":0,"withdraw":0,"deposit_percentage":0,
                             "withdraw_percentage":0}},
            "rate":224790}}"#;
        let mock = MockRest::with_responses(&[("/api/user/limits", body)]);
        let bitkub = authenticated(&mock);

        let limits = bitkub.account.get_user_limits().await.unwrap();
        assert_eq!(limits.limits.crypto.deposit, 0.88971929);
        assert_eq!(limits.limits.crypto.withdraw, 0.88971929);
        assert_eq!(limits.limits.fiat.deposit, 200_000.0);
        assert_eq!(limits.limits.fiat.withdraw, 200_000.0);
        assert_eq!(limits.usage.crypto.deposit_thb_equivalent, 0.0);
        assert_eq!(limits.usage.fiat.withdraw_percentage, 0.0);
        assert_eq!(limits.rate, 224_790.0);

        match mock.calls().pop().unwrap() {
            Call::Post { endpoint, body, .. } => {
                assert_eq!(endpoint, "/api/user/limits");
                assert_eq!(body.keys().collect::<Vec<_>>(), vec!["sig", "ts"]);
            }
            other => panic!("expected a POST, got {:?}", other),
        }
    }
}

#[cfg(test)]
mod market_data_tests {
    use super::*;

    #[tokio::test]
    async fn test_public_calls_are_unsigned_gets() {
        let mock = MockRest::with_responses(&[(
            "/api/market/trades",
            r#"{"error":0,"result":[[1529516287,10000.00,0.09975000,"BUY"]]}"#,
        )]);
        // public endpoints work without credentials
        let bitkub = read_only(&mock);

        let trades = bitkub.market.get_trades("THB_BTC", None).await.unwrap();
        assert_eq!(trades[0].timestamp, 1_529_516_287);
        assert_eq!(trades[0].rate, 10000.0);
        assert_eq!(trades[0].amount, 0.09975);
        assert_eq!(trades[0].side, "BUY");

        match mock.calls().pop().unwrap() {
            Call::Get { endpoint, query } => {
                assert_eq!(endpoint, "/api/market/trades");
                assert_eq!(query, vec![("sym".to_string(), "THB_BTC".to_string())]);
            }
            other => panic!("expected a GET, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_books_and_depth() {
        let mock = MockRest::with_responses(&[
            (
                "/api/market/books",
                r#"{"error":0,"result":{"bids":[[1,1529453033,997.50,10000.00,0.09975000]],
                    "asks":[[680,1529491094,997.50,10000.00,0.09975000]]}}"#,
            ),
            (
                "/api/market/depth",
                r#"{"asks":[[900999,3.3]],"bids":[[700000,0.14285714]]}"#,
            ),
        ]);
        let bitkub = read_only(&mock);

        let books = bitkub.market.get_books("THB_BTC", Some(1)).await.unwrap();
        assert_eq!(books["bids"][0].order_id, 1);
        assert_eq!(books["asks"][0].order_id, 680);

        let depth = bitkub.market.get_depth("THB_BTC", Some(1)).await.unwrap();
        assert_eq!(depth["asks"][0].price, 900_999.0);

        match &mock.calls()[0] {
            Call::Get { query, .. } => {
                assert!(query.contains(&("lmt".to_string(), "1".to_string())))
            }
            other => panic!("expected a GET, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_symbols_error_gate() {
        let mock = MockRest::with_responses(&[(
            "/api/market/symbols",
            r#"{"error":11,"result":null}"#,
        )]);
        let bitkub = read_only(&mock);

        let err = bitkub.market.get_symbols().await.unwrap_err();
        assert_eq!(err.to_string(), "API error: 11 - Invalid symbol");
    }

    #[tokio::test]
    async fn test_server_time_and_status() {
        let mock = MockRest::with_responses(&[
            ("/api/servertime", "1529999999"),
            (
                "/api/status",
                r#"[{"name":"Non-secure endpoints","status":"ok","message":""}]"#,
            ),
        ]);
        let bitkub = read_only(&mock);

        let time = bitkub.market.get_server_time().await.unwrap();
        assert_eq!(time.timestamp(), 1_529_999_999);

        let status = bitkub.market.get_server_status().await.unwrap();
        assert_eq!(status[0].status, "ok");
    }

    #[tokio::test]
    async fn test_tickers_decode_exchange_field_names() {
        let mock = MockRest::with_responses(&[(
            "/api/market/ticker",
            r#"{"THB_BTC":{"id":1,"last":216415.00,"lowestAsk":216678.00,
                "highestBid":215000.00,"percentChange":1.91,"baseVolume":71.02603946,
                "quoteVolume":15302897.99,"isFrozen":0,"high24hr":221396.00,
                "low24hr":206414.00}}"#,
        )]);
        let bitkub = read_only(&mock);

        let tickers = bitkub.market.get_tickers(Some("THB_BTC")).await.unwrap();
        let ticker = &tickers["THB_BTC"];
        assert_eq!(ticker.id, 1);
        assert_eq!(ticker.last, 216_415.0);
        assert_eq!(ticker.lowest_ask, 216_678.0);
        assert_eq!(ticker.highest_bid, 215_000.0);
        assert_eq!(ticker.percent_change, 1.91);
        assert_eq!(ticker.base_volume, 71.02603946);
        assert_eq!(ticker.quote_volume, 15_302_897.99);
        assert_eq!(ticker.is_frozen, 0);
        assert_eq!(ticker.high_24hr, 221_396.0);
        assert_eq!(ticker.low_24hr, 206_414.0);

        // no symbol means every market, sent without a `sym` parameter
        bitkub.market.get_tickers(None).await.unwrap();
        let calls = mock.calls();
        match (&calls[0], &calls[1]) {
            (
                Call::Get {
                    endpoint,
                    query: with_symbol,
                },
                Call::Get {
                    query: without_symbol,
                    ..
                },
            ) => {
                assert_eq!(endpoint, "/api/market/ticker");
                assert_eq!(
                    with_symbol,
                    &vec![("sym".to_string(), "THB_BTC".to_string())]
                );
                assert!(without_symbol.is_empty());
            }
            other => panic!("expected two GETs, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_asks_rows_and_query() {
        let mock = MockRest::with_responses(&[(
            "/api/market/asks",
            r#"{"error":0,"result":[[680,1529491094,997.50,10000.00,0.09975000],
                                    [681,1529491095,100.0,10001.00,0.01]]}"#,
        )]);
        let bitkub = read_only(&mock);

        let asks = bitkub.market.get_asks("THB_BTC", Some(2)).await.unwrap();
        assert_eq!(asks.len(), 2);
        assert_eq!(asks[0].order_id, 680);
        assert_eq!(asks[0].timestamp, 1_529_491_094);
        assert_eq!(asks[0].volume, 997.5);
        assert_eq!(asks[0].rate, 10000.0);
        assert_eq!(asks[0].amount, 0.09975);
        assert_eq!(asks[1].rate, 10001.0);

        match mock.calls().pop().unwrap() {
            Call::Get { endpoint, query } => {
                assert_eq!(endpoint, "/api/market/asks");
                assert_eq!(
                    query,
                    vec![
                        ("sym".to_string(), "THB_BTC".to_string()),
                        ("lmt".to_string(), "2".to_string()),
                    ]
                );
            }
            other => panic!("expected a GET, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_tradingview_history_columns() {
        let mock = MockRest::with_responses(&[(
            "/tradingview/history",
            r#"{"c":[1685000,1680699.95],"h":[1685000,1685000],"l":[1680053.22,1671000],
                "o":[1682500,1685000],"s":"ok","t":[1633424400,1633425300],
                "v":[4.43227658,3.17298546]}"#,
        )]);
        let bitkub = read_only(&mock);

        let history = bitkub
            .market
            .get_tradingview_history("BTC_THB", "15", Some(1_633_424_427), None)
            .await
            .unwrap();
        assert_eq!(history.status, "ok");
        assert_eq!(history.time, vec![1_633_424_400, 1_633_425_300]);
        assert_eq!(history.open, vec![1_682_500.0, 1_685_000.0]);
        assert_eq!(history.high[1], 1_685_000.0);
        assert_eq!(history.low[0], 1_680_053.22);
        assert_eq!(history.close[1], 1_680_699.95);
        assert_eq!(history.volume[1], 3.17298546);

        match mock.calls().pop().unwrap() {
            Call::Get { endpoint, query } => {
                assert_eq!(endpoint, "/tradingview/history");
                assert_eq!(
                    query,
                    vec![
                        ("sym".to_string(), "BTC_THB".to_string()),
                        ("resolution".to_string(), "15".to_string()),
                        ("from".to_string(), "1633424427".to_string()),
                    ]
                );
            }
            other => panic!("expected a GET, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_passes_through() {
        let mock = MockRest::with_responses(&[]);
        let bitkub = read_only(&mock);

        let err = bitkub.market.get_tickers(Some("THB_BTC")).await.unwrap_err();
        assert!(matches!(err, ExchangeError::HttpStatus { status: 404, .. }));
        assert_eq!(err.class(), ErrorClass::Transport);
    }

    #[tokio::test]
    async fn test_connector_is_shareable_across_tasks() {
        let mock = MockRest::with_responses(&[(
            "/api/market/bids",
            r#"{"error":0,"result":[[1,1529453033,997.50,10000.00,0.09975000]]}"#,
        )]);
        let bitkub = Arc::new(read_only(&mock));

        let handles = (0..8).map(|_| {
            let bitkub = Arc::clone(&bitkub);
            tokio::spawn(async move { bitkub.market.get_bids("THB_BTC", None).await })
        });
        let results = futures::future::join_all(handles).await;

        for result in results {
            let bids = result.unwrap().unwrap();
            assert_eq!(bids[0].rate, 10000.0);
        }
        assert_eq!(mock.call_count(), 8);
    }
}
