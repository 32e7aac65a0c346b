//! Consolidation pipeline.
//!
//! [`SecurityAtlas`] owns the data configuration and the reference tables
//! and exposes every public entry point: the two loaders, the consolidated
//! table for a reference year and the historical rate series.

use crate::config::DataConfig;
use crate::data::{HomicideProcessor, HomicideRecord, SpendingLoader, SpendingRecord};
use crate::error::Result;
use crate::reference::{Region, StateCoordinates, StateTables};
use crate::stats::IndicatorCalculator;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One state in the reference year, ready for optimization/ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidatedRecord {
    pub state_code: String,
    pub state_name: Option<String>,
    pub region: Option<Region>,
    pub geo_id: Option<i64>,
    pub population: Option<i64>,
    pub homicides: Option<f64>,
    pub homicide_rate_100k: Option<f64>,
    pub spending: Option<f64>,
    pub spending_millions: Option<f64>,
    pub spending_per_capita: Option<f64>,
    pub elasticity: Option<f64>,
    pub priority_index: Option<f64>,
}

/// One (state, year) point of the homicide-rate history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalRateRecord {
    pub state_code: Option<String>,
    pub state_name: String,
    pub year: i32,
    pub homicides: Option<f64>,
    pub population: Option<i64>,
    pub homicide_rate_100k: Option<f64>,
}

/// Population and homicide rate of one state in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MortalityRecord {
    pub state_code: String,
    pub geo_id: Option<i64>,
    pub population: Option<i64>,
    pub state_name: Option<String>,
    pub homicides: Option<f64>,
    pub homicide_rate_100k: Option<f64>,
}

/// Security budget of one state in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRecord {
    pub state_code: String,
    pub state_name: Option<String>,
    pub geo_id: Option<i64>,
    pub population: Option<i64>,
    pub spending: Option<f64>,
    pub spending_millions: Option<f64>,
}

/// Entry point for loading and consolidating the two source series.
pub struct SecurityAtlas {
    config: DataConfig,
    tables: StateTables,
}

impl SecurityAtlas {
    /// Atlas over the 27 Brazilian federative units.
    pub fn new(config: DataConfig) -> Self {
        Self::with_tables(config, StateTables::brazil())
    }

    pub fn with_tables(config: DataConfig, tables: StateTables) -> Self {
        Self { config, tables }
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    pub fn tables(&self) -> &StateTables {
        &self.tables
    }

    pub fn load_spending(&self, year: i32) -> Result<Vec<SpendingRecord>> {
        SpendingLoader::new(&self.config).load_year(year)
    }

    pub fn load_spending_all_years(&self) -> Result<Vec<SpendingRecord>> {
        SpendingLoader::new(&self.config).load_all_years()
    }

    pub fn load_homicides(&self) -> Result<Vec<HomicideRecord>> {
        HomicideProcessor::new(&self.tables)
            .with_expected_year_columns(self.config.expected_year_columns)
            .load(&self.config)
    }

    pub fn coordinates_table(&self) -> Vec<StateCoordinates> {
        self.tables.coordinates_table()
    }

    /// Homicide counts of `year` keyed by state code. Records without a
    /// code cannot join; the first record wins on duplicates.
    fn homicides_for_year(&self, year: i32) -> Result<HashMap<String, Option<f64>>> {
        let mut by_code = HashMap::new();
        for record in self.load_homicides()? {
            if record.year != year {
                continue;
            }
            let Some(code) = record.state_code else {
                continue;
            };
            if by_code.contains_key(&code) {
                log::warn!("Duplicate homicide row for {code} in {year}, keeping the first");
                continue;
            }
            by_code.insert(code, record.homicides);
        }
        Ok(by_code)
    }

    /// Consolidated table for `year`, sorted by state code.
    ///
    /// Spending is the anchor: every spending row appears once, with a
    /// missing homicide count when the homicide sheet has no match.
    pub fn build_consolidated(&self, year: i32) -> Result<Vec<ConsolidatedRecord>> {
        let spending = self.load_spending(year)?;
        let by_code = self.homicides_for_year(year)?;

        let mut records: Vec<ConsolidatedRecord> = spending
            .into_iter()
            .map(|s| {
                if !by_code.contains_key(&s.state_code) {
                    log::warn!("{} has no homicide data for {year}", s.state_code);
                }
                let homicides = by_code.get(&s.state_code).copied().flatten();
                ConsolidatedRecord {
                    state_name: self.tables.code_to_name(&s.state_code).map(str::to_string),
                    region: self.tables.code_to_region(&s.state_code),
                    geo_id: s.geo_id,
                    population: s.population,
                    homicides,
                    homicide_rate_100k: IndicatorCalculator::rate_per_100k(homicides, s.population),
                    spending: s.spending,
                    spending_millions: IndicatorCalculator::millions(s.spending),
                    spending_per_capita: IndicatorCalculator::per_capita(s.spending, s.population),
                    elasticity: None,
                    priority_index: None,
                    state_code: s.state_code,
                }
            })
            .collect();

        let per_capita: Vec<Option<f64>> =
            records.iter().map(|r| r.spending_per_capita).collect();
        let elasticities = IndicatorCalculator::elasticities(&per_capita);

        for (record, elasticity) in records.iter_mut().zip(elasticities) {
            record.elasticity = elasticity;
            record.priority_index = IndicatorCalculator::priority_index(
                record.homicide_rate_100k,
                record.spending_per_capita,
            );
        }

        records.sort_by(|a, b| a.state_code.cmp(&b.state_code));

        log::info!("Consolidated {} states for {year}", records.len());
        Ok(records)
    }

    /// Homicide history with population and rate per 100k.
    ///
    /// Anchored on the homicide records; a (state, year) without spending
    /// population keeps a missing rate.
    pub fn build_historical_rates(&self) -> Result<Vec<HistoricalRateRecord>> {
        let homicides = self.load_homicides()?;
        let spending = self.load_spending_all_years()?;

        let mut population_by_key: HashMap<(String, i32), Option<i64>> = HashMap::new();
        for s in spending {
            population_by_key.entry((s.state_code, s.year)).or_insert(s.population);
        }

        let records: Vec<HistoricalRateRecord> = homicides
            .into_iter()
            .map(|h| {
                let population = h
                    .state_code
                    .as_ref()
                    .and_then(|code| population_by_key.get(&(code.clone(), h.year)).copied())
                    .flatten();
                HistoricalRateRecord {
                    homicide_rate_100k: IndicatorCalculator::rate_per_100k(h.homicides, population),
                    state_code: h.state_code,
                    state_name: h.state_name,
                    year: h.year,
                    homicides: h.homicides,
                    population,
                }
            })
            .collect();

        log::info!("Built {} historical rate points", records.len());
        Ok(records)
    }

    /// Spending population left-joined with the homicides of `year`.
    pub fn load_deaths_and_population(&self, year: i32) -> Result<Vec<MortalityRecord>> {
        let spending = self.load_spending(year)?;
        let by_code = self.homicides_for_year(year)?;

        Ok(spending
            .into_iter()
            .map(|s| {
                let count = by_code.get(&s.state_code).copied().flatten();
                MortalityRecord {
                    state_name: self.tables.code_to_name(&s.state_code).map(str::to_string),
                    geo_id: s.geo_id,
                    population: s.population,
                    homicides: count,
                    homicide_rate_100k: IndicatorCalculator::rate_per_100k(count, s.population),
                    state_code: s.state_code,
                }
            })
            .collect())
    }

    /// Spending of `year` with state names and amounts in millions.
    pub fn load_security_budget(&self, year: i32) -> Result<Vec<BudgetRecord>> {
        Ok(self
            .load_spending(year)?
            .into_iter()
            .map(|s| BudgetRecord {
                state_name: self.tables.code_to_name(&s.state_code).map(str::to_string),
                geo_id: s.geo_id,
                population: s.population,
                spending_millions: IndicatorCalculator::millions(s.spending),
                spending: s.spending,
                state_code: s.state_code,
            })
            .collect())
    }
}

/// The `n` records with the highest priority index; missing indices rank
/// last and ties keep state-code order.
pub fn top_priority(records: &[ConsolidatedRecord], n: usize) -> Vec<&ConsolidatedRecord> {
    let mut ranked: Vec<&ConsolidatedRecord> = records.iter().collect();
    ranked.sort_by(|a, b| match (a.priority_index, b.priority_index) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked.truncate(n);
    ranked
}
