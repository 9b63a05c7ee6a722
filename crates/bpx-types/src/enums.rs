//! Closed enums for the exchange's constant sets
//!
//! Every enum renders to the exact string the API expects via `as_str()` /
//! `Display`, and parses back via `FromStr`. Parsing an unknown value fails
//! with a [`ValidationError`], so an invalid constant never reaches request
//! construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::params::ParamValue;

/// Declares a string-valued API enum with `as_str`, `Display`, `FromStr`
/// and serde renames kept in one place.
macro_rules! api_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:tt {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// All variants, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the value as sent to the API
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(api_enum!(@error $kind, s)),
                }
            }
        }

        impl From<$name> for ParamValue {
            fn from(value: $name) -> Self {
                ParamValue::Str(value.as_str().to_string())
            }
        }
    };
    (@error "time interval", $s:expr) => {
        ValidationError::InvalidInterval($s.to_string())
    };
    (@error $kind:tt, $s:expr) => {
        ValidationError::InvalidEnum {
            kind: $kind,
            value: $s.to_string(),
        }
    };
}

api_enum! {
    /// Blockchains supported for deposits and withdrawals
    Blockchain, "blockchain" {
        Arbitrum => "Arbitrum",
        Base => "Base",
        Bitcoin => "Bitcoin",
        BitcoinCash => "BitcoinCash",
        Bsc => "Bsc",
        Cardano => "Cardano",
        Dogecoin => "Dogecoin",
        Ethereum => "Ethereum",
        Litecoin => "Litecoin",
        Polygon => "Polygon",
        Sui => "Sui",
        Solana => "Solana",
        Xrp => "XRP",
    }
}

api_enum! {
    /// Candle width for kline queries
    KlineInterval, "time interval" {
        OneMinute => "1m",
        ThreeMinutes => "3m",
        FiveMinutes => "5m",
        FifteenMinutes => "15m",
        ThirtyMinutes => "30m",
        OneHour => "1h",
        TwoHours => "2h",
        FourHours => "4h",
        SixHours => "6h",
        EightHours => "8h",
        TwelveHours => "12h",
        OneDay => "1d",
        ThreeDays => "3d",
        OneWeek => "1w",
        OneMonth => "1month",
    }
}

api_enum! {
    /// Time in force for resting orders
    TimeInForce, "time in force" {
        /// Good till cancelled
        Gtc => "GTC",
        /// Immediate or cancel
        Ioc => "IOC",
        /// Fill or kill
        Fok => "FOK",
    }
}

api_enum! {
    /// How the matching engine treats an order crossing the account's own resting order
    SelfTradePrevention, "self trade prevention" {
        RejectTaker => "RejectTaker",
        RejectMaker => "RejectMaker",
        RejectBoth => "RejectBoth",
        Allow => "Allow",
    }
}

impl Default for SelfTradePrevention {
    fn default() -> Self {
        Self::RejectBoth
    }
}

api_enum! {
    /// Order side
    Side, "side" {
        /// Buy
        Bid => "Bid",
        /// Sell
        Ask => "Ask",
    }
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Bid => Self::Ask,
            Self::Ask => Self::Bid,
        }
    }
}

api_enum! {
    /// Order type
    OrderType, "order type" {
        Market => "Market",
        Limit => "Limit",
    }
}

api_enum! {
    /// Market type filter
    MarketType, "market type" {
        Spot => "SPOT",
        Perp => "PERP",
        Iperp => "IPERP",
        Dated => "DATED",
        Prediction => "PREDICTION",
        Rfq => "RFQ",
    }
}

api_enum! {
    /// Borrow or lend
    BorrowLendSide, "borrow lend side" {
        Borrow => "Borrow",
        Lend => "Lend",
    }
}

api_enum! {
    /// Borrow/lend history event type
    BorrowLendEventType, "borrow lend event type" {
        Borrow => "Borrow",
        BorrowRepay => "BorrowRepay",
        Lend => "Lend",
        LendRedeem => "LendRedeem",
    }
}

api_enum! {
    /// Source of an interest payment
    InterestPaymentSource, "interest payment source" {
        UnrealizedPnl => "UnrealizedPnl",
        BorrowLend => "BorrowLend",
    }
}

api_enum! {
    /// Borrow/lend position state
    BorrowLendPositionState, "borrow lend position state" {
        Open => "Open",
        Closed => "Closed",
    }
}

api_enum! {
    /// Fill type filter
    FillType, "fill type" {
        User => "User",
        BookLiquidation => "BookLiquidation",
        Adl => "Adl",
        Backstop => "Backstop",
        Liquidation => "Liquidation",
        AllLiquidation => "AllLiquidation",
        CollateralConversion => "CollateralConversion",
        CollateralConversionAndSpotLiquidation => "CollateralConversionAndSpotLiquidation",
    }
}

api_enum! {
    /// Settlement history source filter
    SettlementSourceFilter, "settlement source" {
        BackstopLiquidation => "BackstopLiquidation",
        CulledBorrowInterest => "CulledBorrowInterest",
        CulledRealizePnl => "CulledRealizePnl",
        CulledRealizePnlBookUtilization => "CulledRealizePnlBookUtilization",
        FundingPayment => "FundingPayment",
        RealizePnl => "RealizePnl",
        TradingFees => "TradingFees",
        TradingFeesSystem => "TradingFeesSystem",
    }
}

api_enum! {
    /// Interval for borrow/lend market history
    BorrowLendMarketHistoryInterval, "borrow lend market history interval" {
        OneDay => "1d",
        OneWeek => "1w",
        OneMonth => "1month",
        OneYear => "1year",
    }
}
