//! Data module - source loading and reshaping

mod grid;
mod loader;
mod locale;
mod processor;

pub use grid::{read_first_sheet, Cell, Grid};
pub use loader::{read_spending_frame, SpendingLoader, SpendingRecord};
pub use locale::parse_locale_number;
pub use processor::{
    clean_state_name, extract_year_columns, HomicideProcessor, HomicideRecord, YearColumn,
};
