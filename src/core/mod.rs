//! Core rate lookup logic

pub mod config;
pub mod currency;
pub mod error;
pub mod history;
pub mod live;
pub mod log;
pub mod snapshot;
pub mod zodiac;

// Re-export main types for cleaner imports
pub use currency::{CurrencyCode, RateMapping, RateProvider};
pub use error::RateError;
pub use history::{CurrencySeries, HistoryBuilder, HistoryMode, HistoryResult, RatePoint};
pub use live::LiveRates;
pub use snapshot::RateSnapshotRow;
