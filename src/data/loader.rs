//! Spending Loader Module
//! Reads the per-year public-security spending CSV files using Polars.

use super::locale::parse_locale_number;
use crate::config::DataConfig;
use crate::error::{DataError, Result};
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;

/// Accepted headers for each canonical column, compared after
/// [`normalize_header`].
const STATE_CODE_HEADERS: &[&str] = &["uf", "sigla"];
const GEO_ID_HEADERS: &[&str] = &["codibge", "coduf"];
const POPULATION_HEADERS: &[&str] = &["populacao", "populao"];
const SPENDING_HEADERS: &[&str] = &["valor", "gastoseguranca"];

/// Security spending of one state in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingRecord {
    pub state_code: String,
    /// IBGE numeric code of the federative unit.
    pub geo_id: Option<i64>,
    pub population: Option<i64>,
    /// Spending in BRL. `None` when the source cell does not parse.
    pub spending: Option<f64>,
    pub year: i32,
}

/// Loads spending files laid out by a [`DataConfig`].
pub struct SpendingLoader<'a> {
    config: &'a DataConfig,
}

impl<'a> SpendingLoader<'a> {
    pub fn new(config: &'a DataConfig) -> Self {
        Self { config }
    }

    /// Load one year's spending file, in source row order.
    ///
    /// Rows with a blank state code cannot be joined and are dropped with a
    /// warning, so the result may be shorter than the file.
    ///
    /// Fails with [`DataError::NotFound`] when the file for `year` is absent.
    pub fn load_year(&self, year: i32) -> Result<Vec<SpendingRecord>> {
        let path = self.config.spending_path(year);
        if !path.exists() {
            return Err(DataError::NotFound { path });
        }

        let df = read_spending_frame(&path)?;
        let records = frame_to_records(&df, &path, year)?;
        log::debug!(
            "Loaded {} spending rows for {year} from {}",
            records.len(),
            path.display()
        );
        Ok(records)
    }

    /// Load every configured year, skipping years whose file is missing.
    ///
    /// Fails with [`DataError::NoData`] only if no year could be loaded.
    pub fn load_all_years(&self) -> Result<Vec<SpendingRecord>> {
        let mut records = Vec::new();
        let mut loaded_years = 0usize;

        for year in self.config.years() {
            match self.load_year(year) {
                Ok(rows) => {
                    records.extend(rows);
                    loaded_years += 1;
                }
                Err(DataError::NotFound { path }) => {
                    log::warn!(
                        "Spending data for {year} not found ({}), skipping",
                        path.display()
                    );
                }
                Err(e) => return Err(e),
            }
        }

        if loaded_years == 0 {
            return Err(DataError::NoData {
                dir: self.config.data_dir.clone(),
            });
        }

        log::info!(
            "Loaded {} spending rows across {loaded_years} years",
            records.len()
        );
        Ok(records)
    }
}

/// Read a semicolon-separated spending file with inferred column types.
pub fn read_spending_frame(path: &Path) -> Result<DataFrame> {
    let df = LazyCsvReader::new(path)
        .with_separator(b';')
        .with_has_header(true)
        .with_encoding(CsvEncoding::LossyUtf8)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;
    Ok(df)
}

/// Lowercase ASCII alphanumerics only, so "População", "Cod.IBGE" and a
/// mis-decoded "Popula��o" compare by their stable letters.
fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn find_column<'df>(
    df: &'df DataFrame,
    aliases: &[&str],
    canonical: &'static str,
    path: &Path,
) -> Result<&'df Column> {
    df.get_columns()
        .iter()
        .find(|col| aliases.contains(&normalize_header(col.name().as_str()).as_str()))
        .ok_or_else(|| DataError::MissingColumn {
            column: canonical,
            path: path.to_path_buf(),
        })
}

/// Text cells of a column, trimmed; blanks become `None`.
fn text_values(col: &Column) -> Result<Vec<Option<String>>> {
    let as_text = col.cast(&DataType::String)?;
    let values = as_text
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .collect();
    Ok(values)
}

/// Numeric cells of a column. Textual columns go through locale repair;
/// numeric columns are cast as-is.
fn numeric_values(col: &Column) -> Result<Vec<Option<f64>>> {
    if col.dtype() == &DataType::String {
        let values = col
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_locale_number))
            .collect();
        return Ok(values);
    }

    let as_f64 = col.cast(&DataType::Float64)?;
    let values = as_f64
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect();
    Ok(values)
}

#[allow(clippy::cast_possible_truncation)]
fn to_integer(value: f64) -> i64 {
    value.round() as i64
}

fn frame_to_records(df: &DataFrame, path: &Path, year: i32) -> Result<Vec<SpendingRecord>> {
    let codes = text_values(find_column(df, STATE_CODE_HEADERS, "state_code", path)?)?;
    let geo_ids = numeric_values(find_column(df, GEO_ID_HEADERS, "geo_id", path)?)?;
    let populations = numeric_values(find_column(df, POPULATION_HEADERS, "population", path)?)?;
    let spending = numeric_values(find_column(df, SPENDING_HEADERS, "spending", path)?)?;

    let mut records = Vec::with_capacity(df.height());
    for (row, code) in codes.into_iter().enumerate() {
        let Some(state_code) = code else {
            log::warn!("Row {row} of {} has no state code, skipping", path.display());
            continue;
        };

        if spending[row].is_none() {
            log::warn!("{state_code} {year}: spending value missing or unparsable");
        }

        records.push(SpendingRecord {
            state_code,
            geo_id: geo_ids[row].map(to_integer),
            population: populations[row].map(to_integer),
            spending: spending[row],
            year,
        });
    }

    Ok(records)
}
