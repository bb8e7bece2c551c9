//! Conversion engine: rates, arithmetic, favorites and history

pub mod catalog;
pub mod config;
pub mod convert;
pub mod error;
pub mod favorites;
pub mod historical;
pub mod history;
pub mod log;
pub mod rates;
pub mod session;

// Re-export main types for cleaner imports
pub use convert::{convert, format_rate, parse_amount};
pub use error::FxError;
pub use favorites::FavoritesStore;
pub use historical::{
    HistoricalPeriod, HistoricalPoint, HistoricalRateProvider, MockHistoryGenerator, RateChange,
};
pub use history::{ConversionRecord, HistoryLog};
pub use rates::{RateProvider, RateTable};
pub use session::{ConversionSession, FetchTicket, SessionState, SessionStatus};
