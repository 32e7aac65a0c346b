//! Homicide Processor Module
//! Reshapes the state × year homicide sheet into long format (melt).

use super::grid::{read_first_sheet, Grid};
use crate::config::DataConfig;
use crate::error::{DataError, Result};
use crate::reference::StateTables;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Row holding the year labels.
pub const YEAR_ROW: usize = 4;
/// First state row; the national total sits on the row above it.
pub const FIRST_STATE_ROW: usize = 6;
/// Number of state rows in the block.
pub const STATE_ROWS: usize = 27;
/// Year columns the published sheet carries after the state-name column.
pub const YEAR_COLUMNS: usize = 11;

/// One or more trailing parenthetical annotations: `(5)`, `(a)`, `(*)`.
static FOOTNOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\s*\([^)]*\))+\s*$").expect("footnote pattern is valid")
});

/// Homicide count of one state in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomicideRecord {
    /// `None` when the sheet's state name is not in the reference tables.
    pub state_code: Option<String>,
    pub state_name: String,
    pub year: i32,
    pub homicides: Option<f64>,
}

/// Strip trailing annotations such as `" (5)"` or `" (a)"` and surrounding
/// whitespace.
pub fn clean_state_name(name: &str) -> String {
    FOOTNOTE.replace_all(name, "").trim().to_string()
}

/// A year label bound to the sheet column it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearColumn {
    pub column: usize,
    pub year: i32,
}

/// Read the year header, keeping only non-blank cells.
///
/// The whole header row is scanned, so a sheet with more or fewer year
/// columns than the published layout declares exactly what it holds.
pub fn extract_year_columns(grid: &Grid) -> Result<Vec<YearColumn>> {
    let mut years = Vec::with_capacity(YEAR_COLUMNS);

    for column in 1..grid.row_width(YEAR_ROW) {
        let cell = grid.cell(YEAR_ROW, column);
        if cell.is_empty() {
            continue;
        }

        let year = cell
            .as_number()
            .filter(|v| v.fract() == 0.0 && *v >= f64::from(i32::MIN) && *v <= f64::from(i32::MAX))
            .ok_or_else(|| DataError::MalformedYearHeader {
                row: YEAR_ROW,
                column,
                value: cell.as_text().unwrap_or_default(),
            })?;

        #[allow(clippy::cast_possible_truncation)]
        years.push(YearColumn {
            column,
            year: year as i32,
        });
    }

    Ok(years)
}

/// Handles reshaping of the homicide sheet.
pub struct HomicideProcessor<'a> {
    tables: &'a StateTables,
    expected_year_columns: usize,
}

impl<'a> HomicideProcessor<'a> {
    pub fn new(tables: &'a StateTables) -> Self {
        Self {
            tables,
            expected_year_columns: YEAR_COLUMNS,
        }
    }

    pub fn with_expected_year_columns(mut self, count: usize) -> Self {
        self.expected_year_columns = count;
        self
    }

    /// Load and reshape the configured homicide workbook.
    ///
    /// Fails with [`DataError::NotFound`] when the workbook is absent.
    pub fn load(&self, config: &DataConfig) -> Result<Vec<HomicideRecord>> {
        let path = config.homicide_path();
        if !path.exists() {
            return Err(DataError::NotFound { path });
        }

        let grid = read_first_sheet(&path)?;
        let records = self.melt(&grid)?;
        log::info!(
            "Loaded {} homicide records from {}",
            records.len(),
            path.display()
        );
        Ok(records)
    }

    /// Transform the state × year block to one record per (state, year).
    ///
    /// Output is year-major: every state for the first header year, then
    /// every state for the next one. Blank state rows are dropped.
    pub fn melt(&self, grid: &Grid) -> Result<Vec<HomicideRecord>> {
        let year_columns = extract_year_columns(grid)?;
        self.check_year_span(&year_columns);

        let states = self.state_rows(grid);

        let mut records = Vec::with_capacity(year_columns.len() * states.len());
        for yc in &year_columns {
            for (row, name, code) in &states {
                records.push(HomicideRecord {
                    state_code: code.clone(),
                    state_name: name.clone(),
                    year: yc.year,
                    homicides: grid.cell(*row, yc.column).as_number(),
                });
            }
        }

        Ok(records)
    }

    /// Warn when the header declares a different number of years than
    /// expected. Returns whether the span matched.
    pub fn check_year_span(&self, year_columns: &[YearColumn]) -> bool {
        if year_columns.len() == self.expected_year_columns {
            return true;
        }

        log::warn!(
            "Homicide header declares {} year columns, expected {}",
            year_columns.len(),
            self.expected_year_columns
        );
        false
    }

    /// Non-blank state rows with cleaned name and resolved code.
    fn state_rows(&self, grid: &Grid) -> Vec<(usize, String, Option<String>)> {
        let mut unmatched = BTreeSet::new();

        let rows = (FIRST_STATE_ROW..FIRST_STATE_ROW + STATE_ROWS)
            .filter_map(|row| {
                let raw = grid.cell(row, 0).as_text()?;
                let name = clean_state_name(&raw);
                let code = self.tables.name_to_code(&name).map(str::to_string);
                if code.is_none() {
                    unmatched.insert(name.clone());
                }
                Some((row, name, code))
            })
            .collect();

        for name in unmatched {
            log::warn!("State name '{name}' has no UF code; its records keep an empty code");
        }

        rows
    }
}
