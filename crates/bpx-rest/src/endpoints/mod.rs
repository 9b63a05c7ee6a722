//! API endpoint catalog
//!
//! Each group borrows a builder and returns [`RequestDescriptor`]s; nothing
//! here performs I/O.
//!
//! [`RequestDescriptor`]: crate::request::RequestDescriptor

pub mod account;
pub mod borrow_lend;
pub mod capital;
pub mod history;
pub mod market;
pub mod orders;
pub mod rfq;

pub use account::AccountEndpoints;
pub use borrow_lend::BorrowLendEndpoints;
pub use capital::CapitalEndpoints;
pub use history::HistoryEndpoints;
pub use market::MarketEndpoints;
pub use orders::OrderEndpoints;
pub use rfq::RfqEndpoints;
