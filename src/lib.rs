//! UF Security Atlas - Brazilian homicide and public-security spending data
//!
//! Loads the per-state homicide series and the per-year security spending
//! files, joins them by UF code and derives the indicators used to rank
//! states for budget allocation.

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod reference;
pub mod stats;

pub use config::DataConfig;
pub use error::{DataError, Result};
pub use pipeline::{
    top_priority, BudgetRecord, ConsolidatedRecord, HistoricalRateRecord, MortalityRecord,
    SecurityAtlas,
};
pub use reference::{Region, State, StateCoordinates, StateTables};
