//! Synthetic drift generation
//!
//! Produces a perturbed production dataset from a reference dataset by
//! adding Gaussian noise to selected feature columns, scaled by each
//! column's standard deviation times a configurable intensity. Used to
//! exercise the drift detector end to end.

use crate::data::loader;
use crate::error::{DomusError, Result};
use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

/// Columns that receive injected noise
pub const DRIFTED_COLUMNS: [&str; 2] = ["GrLivArea", "TotalBsmtSF"];

/// How strongly the noise perturbs each column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriftLevel {
    Low,
    Medium,
    High,
}

impl DriftLevel {
    /// Noise scale as a fraction of the column's standard deviation
    pub fn intensity(&self) -> f64 {
        match self {
            DriftLevel::Low => 0.05,
            DriftLevel::Medium => 0.15,
            DriftLevel::High => 0.30,
        }
    }
}

impl FromStr for DriftLevel {
    type Err = DomusError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(DriftLevel::Low),
            "medium" => Ok(DriftLevel::Medium),
            "high" => Ok(DriftLevel::High),
            other => Err(DomusError::ConfigError(format!(
                "unknown drift level {other:?}, expected low, medium, or high"
            ))),
        }
    }
}

/// Seeded Gaussian-noise drift generator
#[derive(Debug, Clone)]
pub struct DriftGenerator {
    level: DriftLevel,
    seed: u64,
}

impl Default for DriftGenerator {
    fn default() -> Self {
        Self {
            level: DriftLevel::Medium,
            seed: 42,
        }
    }
}

impl DriftGenerator {
    pub fn new(level: DriftLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Perturb the drifted columns of an in-memory table.
    ///
    /// For each target column present, every value gains noise drawn from
    /// N(sigma * intensity, (sigma * intensity)^2) where sigma is the
    /// column's sample standard deviation. Absent columns are skipped.
    pub fn perturb(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut out = df.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        for name in DRIFTED_COLUMNS {
            let series = match out.column(name) {
                Ok(s) => s,
                Err(_) => {
                    warn!(column = name, "column absent, no drift injected");
                    continue;
                }
            };

            let casted = series.cast(&DataType::Float64)?;
            let ca = casted.f64()?;
            let values: Vec<Option<f64>> = ca.into_iter().collect();

            let sigma = sample_std(&values);
            let scale = sigma * self.level.intensity();

            let perturbed: Vec<Option<f64>> = values
                .iter()
                .map(|v| v.map(|x| x + scale + scale * standard_normal(&mut rng)))
                .collect();

            out.replace(name, Series::new(name, perturbed))?;
        }

        Ok(out)
    }

    /// Read the reference CSV, perturb it, and write the production CSV
    pub fn generate(&self, reference: &Path, output: &Path) -> Result<()> {
        let df = loader::load_table(reference)?;
        let mut perturbed = self.perturb(&df)?;
        loader::write_csv(&mut perturbed, output)?;

        info!(
            level = ?self.level,
            seed = self.seed,
            output = %output.display(),
            "synthetic production dataset generated"
        );

        Ok(())
    }
}

/// Sample standard deviation (ddof = 1) over non-null values
fn sample_std(values: &[Option<f64>]) -> f64 {
    let present: Vec<f64> = values.iter().copied().flatten().collect();
    if present.len() < 2 {
        return 0.0;
    }

    let n = present.len() as f64;
    let mean = present.iter().sum::<f64>() / n;
    let variance = present.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Standard normal draw via the Box-Muller transform
fn standard_normal(rng: &mut impl Rng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
