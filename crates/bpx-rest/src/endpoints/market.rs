//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use bpx_types::validate::{check_limit, check_non_negative, check_non_negative_opt};
use bpx_types::{BorrowLendMarketHistoryInterval, KlineInterval, Params};
use tracing::instrument;

use crate::builder::PublicRequests;
use crate::error::RestResult;
use crate::request::RequestDescriptor;
use crate::types::Page;

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    requests: &'a PublicRequests,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(requests: &'a PublicRequests) -> Self {
        Self { requests }
    }

    /// All assets
    pub fn get_assets(&self) -> RequestDescriptor {
        self.requests.get("api/v1/assets", Params::new())
    }

    /// Collateral parameters for all assets
    pub fn get_collaterals(&self) -> RequestDescriptor {
        self.requests.get("api/v1/collateral", Params::new())
    }

    /// Borrow/lend markets
    pub fn get_borrow_lend_markets(&self) -> RequestDescriptor {
        self.requests.get("api/v1/borrowLend/markets", Params::new())
    }

    /// Borrow/lend market history
    pub fn get_borrow_lend_market_history(
        &self,
        interval: BorrowLendMarketHistoryInterval,
        symbol: Option<&str>,
    ) -> RequestDescriptor {
        let mut params = Params::new().with("interval", interval);
        params.insert_opt("symbol", symbol);
        self.requests.get("api/v1/borrowLend/markets/history", params)
    }

    /// All markets
    pub fn get_markets(&self) -> RequestDescriptor {
        self.requests.get("api/v1/markets", Params::new())
    }

    /// A single market
    pub fn get_market(&self, symbol: &str) -> RequestDescriptor {
        self.requests.get("api/v1/market", Params::new().with("symbol", symbol))
    }

    /// 24h ticker for one market
    pub fn get_ticker(&self, symbol: &str) -> RequestDescriptor {
        self.requests.get("api/v1/ticker", Params::new().with("symbol", symbol))
    }

    /// 24h tickers for all markets
    pub fn get_tickers(&self) -> RequestDescriptor {
        self.requests.get("api/v1/tickers", Params::new())
    }

    /// Order book depth
    pub fn get_depth(&self, symbol: &str) -> RequestDescriptor {
        self.requests.get("api/v1/depth", Params::new().with("symbol", symbol))
    }

    /// Candles for a market
    ///
    /// # Arguments
    /// * `start_time` - Seconds since the epoch, `>= 0`
    /// * `end_time` - Optional end, `>= 0`
    #[instrument(skip(self))]
    pub fn get_klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        start_time: i64,
        end_time: Option<i64>,
    ) -> RestResult<RequestDescriptor> {
        let mut params = Params::new()
            .with("symbol", symbol)
            .with("interval", interval)
            .with("startTime", check_non_negative("start_time", start_time)?);
        params.insert_opt("endTime", check_non_negative_opt("end_time", end_time)?);

        Ok(self.requests.get("api/v1/klines", params))
    }

    /// Mark prices, index prices and funding rates
    pub fn get_mark_prices(&self, symbol: Option<&str>) -> RequestDescriptor {
        let mut params = Params::new();
        params.insert_opt("symbol", symbol);
        self.requests.get("api/v1/markPrices", params)
    }

    /// Open interest
    pub fn get_open_interest(&self, symbol: Option<&str>) -> RequestDescriptor {
        let mut params = Params::new();
        params.insert_opt("symbol", symbol);
        self.requests.get("api/v1/openInterest", params)
    }

    /// Historical funding rates
    #[instrument(skip(self))]
    pub fn get_funding_interval_rates(&self, symbol: &str, page: Page) -> RestResult<RequestDescriptor> {
        let mut params = Params::new().with("symbol", symbol);
        page.apply(&mut params)?;
        Ok(self.requests.get("api/v1/fundingRates", params))
    }

    /// System status
    pub fn get_status(&self) -> RequestDescriptor {
        self.requests.get("api/v1/status", Params::new())
    }

    /// Liveness check, answers `pong`
    pub fn get_ping(&self) -> RequestDescriptor {
        self.requests.get("api/v1/ping", Params::new())
    }

    /// Server time
    pub fn get_time(&self) -> RequestDescriptor {
        self.requests.get("api/v1/time", Params::new())
    }

    /// Most recent trades
    #[instrument(skip(self))]
    pub fn get_recent_trades(&self, symbol: &str, limit: Option<i64>) -> RestResult<RequestDescriptor> {
        let mut params = Params::new().with("symbol", symbol);
        if let Some(limit) = limit {
            params.insert("limit", check_limit(limit)?);
        }
        Ok(self.requests.get("api/v1/trades", params))
    }

    /// Historical trades
    #[instrument(skip(self))]
    pub fn get_history_trades(&self, symbol: &str, page: Page) -> RestResult<RequestDescriptor> {
        let mut params = Params::new().with("symbol", symbol);
        page.apply(&mut params)?;
        Ok(self.requests.get("api/v1/trades/history", params))
    }
}
