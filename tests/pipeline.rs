use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use uf_security_atlas::{top_priority, DataConfig, DataError, Region, SecurityAtlas};

const HEADER: &str = "UF;Cod.IBGE;População;Valor\n";

/// Homicide workbook in the published layout: title on row 0, year labels
/// on row 4, national totals on row 5, states from row 6.
fn write_homicides(dir: &Path, years: &[i32], states: &[(&str, Vec<f64>)]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .write_string(0, 0, "Brasil e Unidades da Federação")
        .unwrap();

    for (i, year) in years.iter().enumerate() {
        let col = u16::try_from(i + 1).unwrap();
        sheet.write_number(4, col, f64::from(*year)).unwrap();
        sheet.write_number(5, col, 45000.0).unwrap();
    }
    sheet.write_string(5, 0, "Brasil").unwrap();

    for (i, (name, counts)) in states.iter().enumerate() {
        let row = u32::try_from(6 + i).unwrap();
        sheet.write_string(row, 0, *name).unwrap();
        for (j, count) in counts.iter().enumerate() {
            sheet
                .write_number(row, u16::try_from(j + 1).unwrap(), *count)
                .unwrap();
        }
    }

    workbook
        .save(DataConfig::with_data_dir(dir).homicide_path())
        .unwrap();
}

fn write_spending(dir: &Path, year: i32, rows: &str) {
    let path = DataConfig::with_data_dir(dir).spending_path(year);
    fs::write(path, format!("{HEADER}{rows}")).unwrap();
}

/// Two states with the textbook numbers: Acre at rate 10 and R$10 per
/// capita, Alagoas at rate 5 and R$20 per capita in 2022. In 2023 both
/// spend R$10 per capita.
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_homicides(
        dir.path(),
        &[2023, 2022],
        &[
            ("Acre (1)", vec![90.0, 100.0]),
            ("Alagoas", vec![80.0, 100.0]),
            ("Guanabara (2)", vec![5.0, 6.0]),
        ],
    );
    write_spending(
        dir.path(),
        2022,
        "AC;12;1000000;10.000.000,00\nAL;27;2000000;40.000.000,00\n",
    );
    write_spending(
        dir.path(),
        2023,
        "AC;12;1000000;10.000.000,00\nAL;27;2000000;20.000.000,00\n",
    );
    dir
}

fn atlas(dir: &TempDir) -> SecurityAtlas {
    SecurityAtlas::new(DataConfig::with_data_dir(dir.path()))
}

#[test]
fn consolidated_two_state_example() {
    let dir = fixture();
    let records = atlas(&dir).build_consolidated(2022).unwrap();

    assert_eq!(records.len(), 2);
    let (ac, al) = (&records[0], &records[1]);

    assert_eq!(ac.state_code, "AC");
    assert_eq!(ac.state_name.as_deref(), Some("Acre"));
    assert_eq!(ac.region, Some(Region::Norte));
    assert_eq!(ac.geo_id, Some(12));
    assert_eq!(ac.homicides, Some(100.0));
    assert_eq!(ac.homicide_rate_100k, Some(10.0));
    assert_eq!(ac.spending_millions, Some(10.0));
    assert_eq!(ac.spending_per_capita, Some(10.0));
    assert_eq!(ac.elasticity, Some(0.15));
    assert_eq!(ac.priority_index, Some(100.0));

    assert_eq!(al.state_code, "AL");
    assert_eq!(al.region, Some(Region::Nordeste));
    assert_eq!(al.homicide_rate_100k, Some(5.0));
    assert_eq!(al.spending_per_capita, Some(20.0));
    assert_eq!(al.elasticity, Some(0.08));
    assert_eq!(al.priority_index, Some(25.0));

    let top = top_priority(&records, 1);
    assert_eq!(top[0].state_code, "AC");
}

#[test]
fn uniform_per_capita_gives_upper_elasticity() {
    let dir = fixture();
    let records = atlas(&dir).build_consolidated(2023).unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.spending_per_capita == Some(10.0)));
    assert!(records.iter().all(|r| r.elasticity == Some(0.15)));
}

#[test]
fn spending_anchors_the_join() {
    let dir = fixture();
    write_spending(
        dir.path(),
        2021,
        "SP;35;46000000;1.000,00\nAL;27;2000000;1.000,00\nAC;12;1000000;0\n",
    );
    write_homicides(
        dir.path(),
        &[2021],
        &[("Acre", vec![50.0]), ("Alagoas", vec![40.0]), ("Bahia", vec![30.0])],
    );

    let atlas = atlas(&dir);
    let spending_codes: Vec<String> = atlas
        .load_spending(2021)
        .unwrap()
        .into_iter()
        .map(|s| s.state_code)
        .collect();
    let records = atlas.build_consolidated(2021).unwrap();

    let codes: Vec<&str> = records.iter().map(|r| r.state_code.as_str()).collect();
    assert_eq!(codes, ["AC", "AL", "SP"]);
    assert!(codes.iter().all(|c| spending_codes.iter().any(|s| s.as_str() == *c)));

    let sp = &records[2];
    assert_eq!(sp.homicides, None);
    assert_eq!(sp.homicide_rate_100k, None);
    assert_eq!(sp.priority_index, None);
    assert!(sp.elasticity.is_some());

    // Zero spending: per-capita 0, priority undefined.
    let ac = &records[0];
    assert_eq!(ac.spending_per_capita, Some(0.0));
    assert_eq!(ac.priority_index, None);
    assert_eq!(ac.elasticity, Some(0.15));
}

#[test]
fn homicides_melt_every_state_and_year() {
    let dir = fixture();
    let records = atlas(&dir).load_homicides().unwrap();

    assert_eq!(records.len(), 3 * 2);
    assert!(records.iter().all(|r| r.year == 2022 || r.year == 2023));

    let guanabara: Vec<_> = records
        .iter()
        .filter(|r| r.state_name == "Guanabara")
        .collect();
    assert_eq!(guanabara.len(), 2);
    assert!(guanabara.iter().all(|r| r.state_code.is_none()));
}

#[test]
fn historical_rates_keep_unmatched_rows() {
    let dir = fixture();
    let records = atlas(&dir).build_historical_rates().unwrap();

    assert_eq!(records.len(), 6);

    let ac_2023 = records
        .iter()
        .find(|r| r.state_code.as_deref() == Some("AC") && r.year == 2023)
        .unwrap();
    assert_eq!(ac_2023.population, Some(1_000_000));
    assert_eq!(ac_2023.homicide_rate_100k, Some(9.0));

    let guanabara = records
        .iter()
        .find(|r| r.state_name == "Guanabara")
        .unwrap();
    assert_eq!(guanabara.population, None);
    assert_eq!(guanabara.homicide_rate_100k, None);
}

#[test]
fn historical_rates_tolerate_missing_spending_year() {
    let dir = fixture();
    fs::remove_file(DataConfig::with_data_dir(dir.path()).spending_path(2023)).unwrap();

    let atlas = atlas(&dir);
    let err = atlas.load_spending(2023).unwrap_err();
    assert!(err.is_not_found());

    let all = atlas.load_spending_all_years().unwrap();
    assert!(all.iter().all(|s| s.year == 2022));

    let records = atlas.build_historical_rates().unwrap();
    let al_2023 = records
        .iter()
        .find(|r| r.state_code.as_deref() == Some("AL") && r.year == 2023)
        .unwrap();
    assert_eq!(al_2023.homicides, Some(80.0));
    assert_eq!(al_2023.homicide_rate_100k, None);
}

#[test]
fn missing_homicide_workbook_is_not_found() {
    let dir = TempDir::new().unwrap();
    write_spending(dir.path(), 2022, "AC;12;1000000;1,00\n");

    let err = atlas(&dir).build_consolidated(2022).unwrap_err();
    match err {
        DataError::NotFound { path } => {
            assert!(path.ends_with("Dados Homicidios 2013-2023.xlsx"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn mortality_and_budget_views() {
    let dir = fixture();
    let atlas = atlas(&dir);

    let mortality = atlas.load_deaths_and_population(2022).unwrap();
    assert_eq!(mortality.len(), 2);
    assert_eq!(mortality[1].state_name.as_deref(), Some("Alagoas"));
    assert_eq!(mortality[1].homicide_rate_100k, Some(5.0));

    let budget = atlas.load_security_budget(2022).unwrap();
    assert_eq!(budget[1].spending, Some(40_000_000.0));
    assert_eq!(budget[1].spending_millions, Some(40.0));
}

#[test]
fn coordinates_cover_every_uf() {
    let dir = TempDir::new().unwrap();
    let table = atlas(&dir).coordinates_table();

    assert_eq!(table.len(), 27);
    let df = table.iter().find(|c| c.code == "DF").unwrap();
    assert_eq!((df.latitude, df.longitude), (-15.78, -47.93));
}
