//! Example: account summary from fills and balances
//!
//! Fetches recent fills and balances, then prints traded volume, fees and an
//! approximate balance in USDC.
//!
//! Run with: cargo run --example portfolio
//!
//! Requires BPX_PUBLIC_KEY and BPX_SECRET_KEY.

use bpx_rest::portfolio::{approximate_balance_in_usdc, fill_fees, fill_volume, Balances, FillRecord};
use bpx_rest::{AccountClient, FillHistoryQuery, KlineInterval, Page, PublicClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let account = AccountClient::from_env()?;
    let public = PublicClient::new()?;

    let query = FillHistoryQuery {
        page: Page::limit(1000),
        ..Default::default()
    };
    let fills: Vec<FillRecord> = account.get_fill_history(&query, None).await?.json()?;
    println!("Fills:   {}", fills.len());
    println!("Volume:  {} USDC", fill_volume(&fills));
    println!("Fees:    {} USDC", fill_fees(&fills));

    let balances: Balances = account.get_balances(None).await?.json()?;
    let total = approximate_balance_in_usdc(&balances, KlineInterval::OneHour, &public).await?;
    println!("Balance: ~{} USDC", total);

    Ok(())
}
