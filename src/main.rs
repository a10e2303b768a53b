use anyhow::Context;
use bitkub_connector::core::config::ExchangeConfig;
use bitkub_connector::exchanges::bitkub::{build_connector, PageRequest};
use tracing::warn;

fn load_config() -> ExchangeConfig {
    #[cfg(feature = "env-file")]
    let loaded = ExchangeConfig::from_env_file("BITKUB");
    #[cfg(not(feature = "env-file"))]
    let loaded = ExchangeConfig::from_env("BITKUB");

    loaded.unwrap_or_else(|e| {
        warn!("{}; continuing with public endpoints only", e);
        ExchangeConfig::read_only()
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let bitkub = build_connector(load_config()).context("failed to build Bitkub connector")?;

    let server_time = bitkub
        .market
        .get_server_time()
        .await
        .context("failed to fetch server time")?;
    println!("Server time: {}", server_time);

    let symbols = bitkub.market.get_symbols().await?;
    println!("Found {} markets", symbols.len());
    for symbol in symbols.iter().take(5) {
        println!("  {} ({})", symbol.symbol, symbol.info);
    }

    let books = bitkub.market.get_books("THB_BTC", Some(5)).await?;
    for side in ["bids", "asks"] {
        let best = books.get(side).and_then(|rows| rows.first());
        if let Some(row) = best {
            println!("Best {}: {} @ {}", side, row.volume, row.rate);
        }
    }

    if !bitkub.is_authenticated() {
        println!("No credentials set, skipping private endpoints");
        return Ok(());
    }

    let balances = bitkub.account.get_balances().await?;
    for (currency, balance) in balances.iter().filter(|(_, b)| b.available > 0.0) {
        println!("{}: {} available, {} reserved", currency, balance.available, balance.reserved);
    }

    let deposits = bitkub
        .account
        .get_crypto_deposit_history(PageRequest {
            page: Some(1),
            limit: Some(10),
        })
        .await?;
    println!("Recent crypto deposits: {}", deposits.result.len());

    Ok(())
}
