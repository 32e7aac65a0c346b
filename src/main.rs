//! UF Security Atlas - consolidated table report
//!
//! Usage: `uf-security-atlas [YEAR] [--config FILE] [--out FILE]`

use anyhow::{bail, Context};
use std::path::PathBuf;
use uf_security_atlas::{export, top_priority, DataConfig, SecurityAtlas};

const DEFAULT_YEAR: i32 = 2022;

struct Args {
    year: i32,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        year: DEFAULT_YEAR,
        config: None,
        out: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                args.config = Some(iter.next().context("--config needs a path")?.into());
            }
            "--out" => args.out = Some(iter.next().context("--out needs a path")?.into()),
            other if other.starts_with("--") => bail!("unknown option {other}"),
            year => {
                args.year = year
                    .parse()
                    .with_context(|| format!("invalid year '{year}'"))?;
            }
        }
    }

    Ok(args)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => DataConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DataConfig::default(),
    }
    .with_env_overrides();

    let atlas = SecurityAtlas::new(config);
    let records = atlas
        .build_consolidated(args.year)
        .with_context(|| format!("building consolidated table for {}", args.year))?;

    let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |x| format!("{x:.2}"));

    println!(
        "{:<4} {:<22} {:>10} {:>12} {:>10} {:>8}",
        "UF", "Estado", "Taxa/100k", "Orç. (mi)", "Per capita", "Elast."
    );
    for r in &records {
        println!(
            "{:<4} {:<22} {:>10} {:>12} {:>10} {:>8}",
            r.state_code,
            r.state_name.as_deref().unwrap_or("?"),
            fmt(r.homicide_rate_100k),
            fmt(r.spending_millions),
            fmt(r.spending_per_capita),
            r.elasticity.map_or_else(|| "-".to_string(), |e| format!("{e:.4}")),
        );
    }

    println!("\nTop 5 by priority index (high rate / low spending):");
    for r in top_priority(&records, 5) {
        println!(
            "  {} {:<22} {:>10}",
            r.state_code,
            r.state_name.as_deref().unwrap_or("?"),
            fmt(r.priority_index)
        );
    }

    if let Some(out) = &args.out {
        export::write_csv(&records, out)
            .with_context(|| format!("writing {}", out.display()))?;
    }

    Ok(())
}
