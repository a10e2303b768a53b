pub mod core;
pub mod exchanges;

pub use crate::core::config::ExchangeConfig;
pub use crate::core::errors::{ErrorClass, ExchangeError};
pub use exchanges::bitkub::{build_connector, BitkubBuilder, BitkubConnector};
