//! Data source configuration.

use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides [`DataConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "UF_ATLAS_DATA_DIR";

/// Where the source files live and which years are supported.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub first_year: i32,
    pub last_year: i32,
    /// File name of one spending year; `{year}` is substituted.
    pub spending_file_template: String,
    pub homicide_file: String,
    /// Number of year columns the homicide header is expected to declare.
    pub expected_year_columns: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("dados").join("dados.novos"),
            first_year: 2013,
            last_year: 2023,
            spending_file_template: "gastos_{year}_filtrado.csv".to_string(),
            homicide_file: "Dados Homicidios 2013-2023.xlsx".to_string(),
            expected_year_columns: 11,
        }
    }
}

impl DataConfig {
    /// Defaults rooted at `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Apply the `UF_ATLAS_DATA_DIR` override, if set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            log::debug!("{DATA_DIR_ENV} overrides data directory");
            self.data_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.first_year..=self.last_year
    }

    pub fn spending_path(&self, year: i32) -> PathBuf {
        self.data_dir.join(
            self.spending_file_template
                .replace("{year}", &year.to_string()),
        )
    }

    pub fn homicide_path(&self) -> PathBuf {
        self.data_dir.join(&self.homicide_file)
    }
}
