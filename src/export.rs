//! Tabular export of the consolidated table.

use crate::error::Result;
use crate::pipeline::ConsolidatedRecord;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Output columns, in order.
pub const CONSOLIDATED_COLUMNS: [&str; 12] = [
    "state_code",
    "state_name",
    "region",
    "geo_id",
    "population",
    "homicides",
    "homicide_rate_100k",
    "spending",
    "spending_millions",
    "spending_per_capita",
    "elasticity",
    "priority_index",
];

/// Build the fixed-column frame; missing values become nulls.
pub fn consolidated_frame(records: &[ConsolidatedRecord]) -> Result<DataFrame> {
    let text = |f: fn(&ConsolidatedRecord) -> Option<String>| -> Vec<Option<String>> {
        records.iter().map(f).collect()
    };
    let int = |f: fn(&ConsolidatedRecord) -> Option<i64>| -> Vec<Option<i64>> {
        records.iter().map(f).collect()
    };
    let float = |f: fn(&ConsolidatedRecord) -> Option<f64>| -> Vec<Option<f64>> {
        records.iter().map(f).collect()
    };

    let [
        code,
        name,
        region,
        geo_id,
        population,
        homicides,
        rate,
        spending,
        millions,
        per_capita,
        elasticity,
        priority,
    ] = CONSOLIDATED_COLUMNS;

    let df = DataFrame::new(vec![
        Column::new(code.into(), text(|r| Some(r.state_code.clone()))),
        Column::new(name.into(), text(|r| r.state_name.clone())),
        Column::new(region.into(), text(|r| r.region.map(|g| g.to_string()))),
        Column::new(geo_id.into(), int(|r| r.geo_id)),
        Column::new(population.into(), int(|r| r.population)),
        Column::new(homicides.into(), float(|r| r.homicides)),
        Column::new(rate.into(), float(|r| r.homicide_rate_100k)),
        Column::new(spending.into(), float(|r| r.spending)),
        Column::new(millions.into(), float(|r| r.spending_millions)),
        Column::new(per_capita.into(), float(|r| r.spending_per_capita)),
        Column::new(elasticity.into(), float(|r| r.elasticity)),
        Column::new(priority.into(), float(|r| r.priority_index)),
    ])?;

    Ok(df)
}

/// Write the consolidated table as a semicolon-separated CSV with header.
pub fn write_csv(records: &[ConsolidatedRecord], path: &Path) -> Result<()> {
    let mut df = consolidated_frame(records)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b';')
        .finish(&mut df)?;

    log::info!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}
