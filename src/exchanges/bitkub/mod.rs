pub mod codec;
pub mod conversions;
pub mod error_codes;
pub mod signer;
pub mod types;

pub mod builder;
pub mod connector;
pub mod rest;

// Re-export main components
pub use builder::{build_connector, BitkubBuilder, DEFAULT_BASE_URL};
pub use codec::{Decoded, ResultShape, ShapedResult};
pub use connector::{Account, BitkubConnector, MarketData, Trading};
pub use error_codes::ErrorFamily;
pub use signer::BitkubSigner;
pub use types::{
    Balance, BidAsk, DepthLevel, HistoryRequest, MarketSymbol, Order, OrderInfo, OrderOptions,
    OrderRef, OrderSide, OrderType, PageRequest, Pagination, Ticker, Trade,
};
