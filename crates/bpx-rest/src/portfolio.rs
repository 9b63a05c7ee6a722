//! Portfolio helpers over fills and balances
//!
//! Everything is computed with [`Decimal`]; nothing here rounds.

use bpx_types::KlineInterval;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::blocking::BlockingPublicClient;
use crate::client::PublicClient;
use crate::error::{RestError, RestResult};
use crate::transport::{BlockingTransport, Transport};

/// Quote asset balances are valued in
pub const USDC: &str = "USDC";

/// Klines requested per asset when looking up a close price
const LOOKBACK_CANDLES: i64 = 10;

/// A fill as returned by the fill history endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillRecord {
    pub price: Decimal,
    pub quantity: Decimal,
    pub fee: Decimal,
    pub fee_symbol: String,
}

/// One asset's balance as returned by the balances endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct BalanceEntry {
    #[serde(default)]
    pub available: Decimal,
    #[serde(default)]
    pub locked: Decimal,
    #[serde(default)]
    pub staked: Decimal,
}

impl BalanceEntry {
    /// Available, locked and staked together
    pub fn total(&self) -> Decimal {
        self.available + self.locked + self.staked
    }
}

/// Balances keyed by asset symbol
pub type Balances = BTreeMap<String, BalanceEntry>;

/// A candle; only the close is used here
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Kline {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub close: Option<Decimal>,
}

/// Traded notional: sum of price × quantity
pub fn fill_volume(fills: &[FillRecord]) -> Decimal {
    fills.iter().map(|fill| fill.price * fill.quantity).sum()
}

/// Fees in USDC
///
/// Fees charged in USDC count as-is; fees charged in the base asset are
/// converted at the fill price.
pub fn fill_fees(fills: &[FillRecord]) -> Decimal {
    fills
        .iter()
        .map(|fill| {
            if fill.fee_symbol == USDC {
                fill.fee
            } else {
                fill.price * fill.fee
            }
        })
        .sum()
}

/// Value balances in USDC given each asset's close price
///
/// USDC counts at face value. Any other asset must have an entry in `closes`.
pub fn value_in_usdc(balances: &Balances, closes: &BTreeMap<String, Decimal>) -> RestResult<Decimal> {
    let mut total = Decimal::ZERO;
    for (asset, entry) in balances {
        if asset == USDC {
            total += entry.total();
            continue;
        }

        let close = closes
            .get(asset)
            .ok_or_else(|| RestError::Parse(format!("No {} price for {}", USDC, asset)))?;
        total += entry.total() * *close;
    }
    Ok(total)
}

/// Market symbol quoting `asset` in USDC
pub fn usdc_market(asset: &str) -> String {
    format!("{}_{}", asset, USDC)
}

fn interval_secs(interval: KlineInterval) -> i64 {
    match interval {
        KlineInterval::OneMinute => 60,
        KlineInterval::ThreeMinutes => 3 * 60,
        KlineInterval::FiveMinutes => 5 * 60,
        KlineInterval::FifteenMinutes => 15 * 60,
        KlineInterval::ThirtyMinutes => 30 * 60,
        KlineInterval::OneHour => 3600,
        KlineInterval::TwoHours => 2 * 3600,
        KlineInterval::FourHours => 4 * 3600,
        KlineInterval::SixHours => 6 * 3600,
        KlineInterval::EightHours => 8 * 3600,
        KlineInterval::TwelveHours => 12 * 3600,
        KlineInterval::OneDay => 86_400,
        KlineInterval::ThreeDays => 3 * 86_400,
        KlineInterval::OneWeek => 7 * 86_400,
        KlineInterval::OneMonth => 31 * 86_400,
    }
}

/// Kline start time covering the last few candles before `now` (seconds)
pub fn lookback_start(interval: KlineInterval, now: i64) -> i64 {
    (now - LOOKBACK_CANDLES * interval_secs(interval)).max(0)
}

fn last_close(asset: &str, klines: &[Kline]) -> RestResult<Decimal> {
    klines
        .last()
        .and_then(|kline| kline.close)
        .ok_or_else(|| RestError::Parse(format!("No kline close for {}", usdc_market(asset))))
}

/// Approximate total balance in USDC, pricing each asset at the last
/// kline close of its `<ASSET>_USDC` market
pub async fn approximate_balance_in_usdc<T: Transport>(
    balances: &Balances,
    interval: KlineInterval,
    public: &PublicClient<T>,
) -> RestResult<Decimal> {
    let start_time = lookback_start(interval, Utc::now().timestamp());
    let mut closes = BTreeMap::new();

    for asset in balances.keys().filter(|asset| asset.as_str() != USDC) {
        let klines: Vec<Kline> = public
            .get_klines(&usdc_market(asset), interval, start_time, None)
            .await?
            .json()?;
        let close = last_close(asset, &klines)?;
        debug!("{} close {}", usdc_market(asset), close);
        closes.insert(asset.clone(), close);
    }

    value_in_usdc(balances, &closes)
}

/// Blocking twin of [`approximate_balance_in_usdc`]
pub fn approximate_balance_in_usdc_blocking<T: BlockingTransport>(
    balances: &Balances,
    interval: KlineInterval,
    public: &BlockingPublicClient<T>,
) -> RestResult<Decimal> {
    let start_time = lookback_start(interval, Utc::now().timestamp());
    let mut closes = BTreeMap::new();

    for asset in balances.keys().filter(|asset| asset.as_str() != USDC) {
        let klines: Vec<Kline> = public
            .get_klines(&usdc_market(asset), interval, start_time, None)?
            .json()?;
        let close = last_close(asset, &klines)?;
        debug!("{} close {}", usdc_market(asset), close);
        closes.insert(asset.clone(), close);
    }

    value_in_usdc(balances, &closes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::PublicRequests;
    use crate::transport::MockTransport;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn fills() -> Vec<FillRecord> {
        serde_json::from_value(json!([
            {"price": "20", "quantity": "2", "fee": "0.01", "feeSymbol": "SOL", "side": "Bid"},
            {"price": "25", "quantity": "1", "fee": "0.05", "feeSymbol": "USDC", "side": "Ask"},
        ]))
        .unwrap()
    }

    fn balances() -> Balances {
        serde_json::from_value(json!({
            "USDC": {"available": "100", "locked": "5", "staked": "0"},
            "SOL": {"available": "1.5", "locked": "0.5", "staked": "1"},
        }))
        .unwrap()
    }

    #[test]
    fn test_fill_volume() {
        assert_eq!(fill_volume(&fills()), dec!(65));
        assert_eq!(fill_volume(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_fill_fees() {
        // 20 * 0.01 + 0.05
        assert_eq!(fill_fees(&fills()), dec!(0.25));
    }

    #[test]
    fn test_value_in_usdc() {
        let closes = BTreeMap::from([("SOL".to_string(), dec!(20))]);
        assert_eq!(value_in_usdc(&balances(), &closes).unwrap(), dec!(165));
        assert!(value_in_usdc(&balances(), &BTreeMap::new()).is_err());
    }

    #[test]
    fn test_lookback_start() {
        assert_eq!(lookback_start(KlineInterval::OneMinute, 1_000), 400);
        assert_eq!(lookback_start(KlineInterval::OneDay, 1_000), 0);
    }

    #[tokio::test]
    async fn test_approximate_balance_in_usdc() {
        let public = PublicClient::with_transport(PublicRequests::new(), MockTransport::new());
        public.transport().push_json(json!([
            {"start": "2024-01-01 00:00:00", "close": "19"},
            {"start": "2024-01-01 00:01:00", "close": "20"},
        ]));

        let total = approximate_balance_in_usdc(&balances(), KlineInterval::OneMinute, &public)
            .await
            .unwrap();
        assert_eq!(total, dec!(165));

        let request = public.transport().last_request().unwrap();
        let query = request.query.unwrap();
        assert_eq!(query.get("symbol").and_then(|v| v.as_str()), Some("SOL_USDC"));
        assert_eq!(query.get("interval").and_then(|v| v.as_str()), Some("1m"));
    }

    #[test]
    fn test_approximate_balance_blocking_without_klines() {
        let public = BlockingPublicClient::with_transport(PublicRequests::new(), MockTransport::new());
        public.transport().push_json(json!([]));

        let err = approximate_balance_in_usdc_blocking(&balances(), KlineInterval::OneHour, &public)
            .unwrap_err();
        assert!(matches!(err, RestError::Parse(_)));
    }
}
