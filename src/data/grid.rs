//! Spreadsheet access: the first worksheet of a workbook as a cell grid.

use crate::error::{DataError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// A single worksheet cell, reduced to what the reshape needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Numeric value; text is parsed leniently, anything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v).filter(|v| v.is_finite()),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Cell::Empty => None,
        }
    }

    /// Cell rendered as text; `None` when empty.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) if s.trim().is_empty() => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(v) => Some(v.to_string()),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(v) => Cell::Number(*v as f64),
            Data::Float(v) => Cell::Number(*v),
            Data::String(s) => Cell::Text(s.clone()),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}

/// Row-major cell grid addressed from the worksheet's A1 origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Cell at `(row, col)`; out-of-bounds reads as [`Cell::Empty`].
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells stored in `row`; 0 past the last row.
    pub fn row_width(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }
}

/// Read the first worksheet of the workbook at `path`.
///
/// Calamine trims leading blank rows and columns; they are restored so row
/// and column indices match the sheet's own layout.
pub fn read_first_sheet(path: &Path) -> Result<Grid> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::EmptyWorkbook {
            path: path.to_path_buf(),
        })??;

    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows = vec![Vec::new(); row_offset];
    for source_row in range.rows() {
        let mut row = vec![Cell::Empty; col_offset];
        row.extend(source_row.iter().map(Cell::from));
        rows.push(row);
    }

    log::debug!(
        "Read {} rows from first worksheet of {}",
        rows.len(),
        path.display()
    );
    Ok(Grid::new(rows))
}
