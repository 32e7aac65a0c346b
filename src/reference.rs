//! Brazilian federative unit reference tables.
//!
//! Provides mappings between two-letter UF codes, full state names,
//! macro-regions and approximate capital coordinates for the 26 states
//! plus the Federal District. Every other module resolves state identity
//! through a [`StateTables`] value instead of re-encoding these mappings.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// One of the five official Brazilian macro-regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Region {
    Norte,
    Nordeste,
    CentroOeste,
    Sudeste,
    Sul,
}

impl Region {
    /// Portuguese label as used by IBGE.
    pub fn label(self) -> &'static str {
        match self {
            Region::Norte => "Norte",
            Region::Nordeste => "Nordeste",
            Region::CentroOeste => "Centro-Oeste",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of a single federative unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct State {
    /// Two-letter UF code (e.g. "MG").
    pub code: String,
    /// Full name with accents (e.g. "Minas Gerais").
    pub name: String,
    pub region: Region,
    /// Approximate capital latitude, decimal degrees.
    pub latitude: f64,
    /// Approximate capital longitude, decimal degrees.
    pub longitude: f64,
}

/// A `(code, latitude, longitude)` row of the coordinates table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateCoordinates {
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// The 27 federative units: code, name, region, capital lat/lon.
const BRAZIL_UFS: &[(&str, &str, Region, f64, f64)] = &[
    ("AC", "Acre", Region::Norte, -9.97, -67.81),
    ("AL", "Alagoas", Region::Nordeste, -9.67, -35.74),
    ("AP", "Amapá", Region::Norte, 0.03, -51.07),
    ("AM", "Amazonas", Region::Norte, -3.12, -60.02),
    ("BA", "Bahia", Region::Nordeste, -12.97, -38.51),
    ("CE", "Ceará", Region::Nordeste, -3.72, -38.54),
    ("DF", "Distrito Federal", Region::CentroOeste, -15.78, -47.93),
    ("ES", "Espírito Santo", Region::Sudeste, -20.32, -40.34),
    ("GO", "Goiás", Region::CentroOeste, -16.68, -49.26),
    ("MA", "Maranhão", Region::Nordeste, -2.53, -44.27),
    ("MT", "Mato Grosso", Region::CentroOeste, -15.60, -56.10),
    ("MS", "Mato Grosso do Sul", Region::CentroOeste, -20.44, -54.64),
    ("MG", "Minas Gerais", Region::Sudeste, -19.92, -43.94),
    ("PA", "Pará", Region::Norte, -1.46, -48.50),
    ("PB", "Paraíba", Region::Nordeste, -7.12, -34.86),
    ("PR", "Paraná", Region::Sul, -25.42, -49.27),
    ("PE", "Pernambuco", Region::Nordeste, -8.05, -34.88),
    ("PI", "Piauí", Region::Nordeste, -5.09, -42.80),
    ("RJ", "Rio de Janeiro", Region::Sudeste, -22.91, -43.17),
    ("RN", "Rio Grande do Norte", Region::Nordeste, -5.79, -35.21),
    ("RS", "Rio Grande do Sul", Region::Sul, -30.03, -51.23),
    ("RO", "Rondônia", Region::Norte, -8.76, -63.90),
    ("RR", "Roraima", Region::Norte, 2.82, -60.67),
    ("SC", "Santa Catarina", Region::Sul, -27.59, -48.55),
    ("SP", "São Paulo", Region::Sudeste, -23.55, -46.64),
    ("SE", "Sergipe", Region::Nordeste, -10.91, -37.07),
    ("TO", "Tocantins", Region::Norte, -10.18, -48.33),
];

/// Immutable lookup tables over a fixed universe of states.
///
/// [`StateTables::brazil`] is the production universe; tests can build an
/// alternate one with [`StateTables::new`].
#[derive(Debug, Clone)]
pub struct StateTables {
    states: Vec<State>,
    by_code: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl Default for StateTables {
    fn default() -> Self {
        Self::brazil()
    }
}

impl StateTables {
    /// Build tables over an arbitrary state universe.
    ///
    /// Later duplicates of a code or name shadow earlier ones.
    pub fn new(states: Vec<State>) -> Self {
        let by_code = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.code.clone(), i))
            .collect();
        let by_name = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();

        Self {
            states,
            by_code,
            by_name,
        }
    }

    /// The 27 Brazilian federative units.
    pub fn brazil() -> Self {
        Self::new(
            BRAZIL_UFS
                .iter()
                .map(|&(code, name, region, latitude, longitude)| State {
                    code: code.to_string(),
                    name: name.to_string(),
                    region,
                    latitude,
                    longitude,
                })
                .collect(),
        )
    }

    /// Full name → code. Exact match on the accented name.
    pub fn name_to_code(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&i| self.states[i].code.as_str())
    }

    pub fn code_to_name(&self, code: &str) -> Option<&str> {
        self.state(code).map(|s| s.name.as_str())
    }

    pub fn code_to_region(&self, code: &str) -> Option<Region> {
        self.state(code).map(|s| s.region)
    }

    /// Approximate capital `(latitude, longitude)`.
    pub fn code_to_coordinates(&self, code: &str) -> Option<(f64, f64)> {
        self.state(code).map(|s| (s.latitude, s.longitude))
    }

    pub fn state(&self, code: &str) -> Option<&State> {
        self.by_code.get(code).map(|&i| &self.states[i])
    }

    /// All states in table order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// One coordinates row per state, in table order.
    pub fn coordinates_table(&self) -> Vec<StateCoordinates> {
        self.states
            .iter()
            .map(|s| StateCoordinates {
                code: s.code.clone(),
                latitude: s.latitude,
                longitude: s.longitude,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uf_count() {
        let tables = StateTables::brazil();
        assert_eq!(tables.len(), 27);
        assert_eq!(tables.coordinates_table().len(), 27);
    }

    #[test]
    fn name_code_roundtrip() {
        let tables = StateTables::brazil();
        for state in tables.states() {
            assert_eq!(tables.name_to_code(&state.name), Some(state.code.as_str()));
            assert_eq!(tables.code_to_name(&state.code), Some(state.name.as_str()));
            assert!(tables.code_to_region(&state.code).is_some());
            assert!(tables.code_to_coordinates(&state.code).is_some());
        }
    }

    #[test]
    fn accented_names() {
        let tables = StateTables::brazil();
        assert_eq!(tables.name_to_code("São Paulo"), Some("SP"));
        assert_eq!(tables.name_to_code("Sao Paulo"), None);
        assert_eq!(tables.code_to_region("DF"), Some(Region::CentroOeste));
        assert_eq!(Region::CentroOeste.to_string(), "Centro-Oeste");
    }

    #[test]
    fn region_sizes() {
        let tables = StateTables::brazil();
        let count = |r: Region| tables.states().iter().filter(|s| s.region == r).count();
        assert_eq!(count(Region::Norte), 7);
        assert_eq!(count(Region::Nordeste), 9);
        assert_eq!(count(Region::CentroOeste), 4);
        assert_eq!(count(Region::Sudeste), 4);
        assert_eq!(count(Region::Sul), 3);
    }

    #[test]
    fn unknown_lookups() {
        let tables = StateTables::brazil();
        assert_eq!(tables.code_to_name("XX"), None);
        assert_eq!(tables.code_to_region("XX"), None);
        assert_eq!(tables.code_to_coordinates("XX"), None);
        assert_eq!(tables.name_to_code("Guanabara"), None);
    }

    #[test]
    fn custom_universe() {
        let tables = StateTables::new(vec![State {
            code: "ZZ".to_string(),
            name: "Zeta".to_string(),
            region: Region::Sul,
            latitude: 1.0,
            longitude: 2.0,
        }]);
        assert_eq!(tables.name_to_code("Zeta"), Some("ZZ"));
        assert_eq!(tables.code_to_coordinates("ZZ"), Some((1.0, 2.0)));
        assert_eq!(tables.code_to_name("SP"), None);
    }
}
