//! Indicator Calculator Module
//! Derived metrics for the consolidated table: rates, per-capita values,
//! the heuristic elasticity and the priority index.
//!
//! Every function takes and returns `Option<f64>`: a missing input, a zero
//! denominator or a non-finite result yields `None`.

/// Lower bound of the heuristic elasticity.
pub const ELASTICITY_BASE: f64 = 0.08;
/// Additional elasticity granted to the lowest per-capita spender.
pub const ELASTICITY_SPAN: f64 = 0.07;

/// Stateless calculator for consolidated indicators.
pub struct IndicatorCalculator;

impl IndicatorCalculator {
    /// Round half away from zero to `decimals` places.
    pub fn round_to(value: f64, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        (value * factor).round() / factor
    }

    fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
        let (n, d) = (numerator?, denominator?);
        if d == 0.0 {
            return None;
        }
        Some(n / d).filter(|v| v.is_finite())
    }

    /// Count per 100,000 inhabitants, 2 decimals.
    pub fn rate_per_100k(count: Option<f64>, population: Option<i64>) -> Option<f64> {
        #[allow(clippy::cast_precision_loss)]
        let population = population.map(|p| p as f64);
        Self::ratio(count, population).map(|r| Self::round_to(r * 100_000.0, 2))
    }

    /// Spending divided by population, 2 decimals.
    pub fn per_capita(amount: Option<f64>, population: Option<i64>) -> Option<f64> {
        #[allow(clippy::cast_precision_loss)]
        let population = population.map(|p| p as f64);
        Self::ratio(amount, population).map(|r| Self::round_to(r, 2))
    }

    /// Amount in millions, 2 decimals.
    pub fn millions(amount: Option<f64>) -> Option<f64> {
        amount.map(|a| Self::round_to(a / 1e6, 2))
    }

    /// Min–max normalization to [0, 1] over the present values.
    ///
    /// When every present value is equal the range is degenerate and all of
    /// them normalize to 0. Missing entries stay missing.
    pub fn normalize_min_max(values: &[Option<f64>]) -> Vec<Option<f64>> {
        let present = values.iter().flatten().copied();
        let min = present.clone().fold(f64::INFINITY, f64::min);
        let max = present.fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        values
            .iter()
            .map(|v| {
                v.map(|x| {
                    if range > 0.0 {
                        (x - min) / range
                    } else {
                        0.0
                    }
                })
            })
            .collect()
    }

    /// `0.08 + 0.07 × (1 − normalized)`, 4 decimals; lies in [0.08, 0.15].
    pub fn elasticity(normalized_per_capita: Option<f64>) -> Option<f64> {
        normalized_per_capita
            .map(|n| Self::round_to(ELASTICITY_BASE + ELASTICITY_SPAN * (1.0 - n), 4))
    }

    /// Heuristic elasticity for each per-capita value, lower spenders
    /// getting the higher elasticity.
    pub fn elasticities(per_capita: &[Option<f64>]) -> Vec<Option<f64>> {
        Self::normalize_min_max(per_capita)
            .into_iter()
            .map(Self::elasticity)
            .collect()
    }

    /// `rate / per_capita × 100`, 2 decimals.
    pub fn priority_index(rate: Option<f64>, per_capita: Option<f64>) -> Option<f64> {
        Self::ratio(rate, per_capita).map(|r| Self::round_to(r * 100.0, 2))
    }
}
