//! Feature drift detection between a reference and a production dataset

use crate::data::loader;
use crate::drift::ks::KolmogorovSmirnov;
use crate::drift::{DriftConfig, DriftReport, FeatureDrift};
use crate::error::{DomusError, Result};
use ndarray::Array1;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of a full detection run: the report plus where it was persisted
#[derive(Debug, Clone)]
pub struct DriftRun {
    pub report: DriftReport,
    pub report_path: PathBuf,
}

/// Compares monitored feature distributions between two datasets.
///
/// Each monitored feature present in both datasets is compared with a
/// two-sample KS test after dropping missing values independently per
/// column. Features absent from either dataset are skipped: the requested
/// list is intersected with the available columns rather than failing.
#[derive(Debug, Clone, Default)]
pub struct DriftDetector {
    config: DriftConfig,
}

impl DriftDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DriftConfig) -> Self {
        Self { config }
    }

    /// Set the p-value cutoff
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.config = self.config.with_threshold(threshold);
        self
    }

    /// Replace the monitored feature list
    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.config = self.config.with_features(features);
        self
    }

    /// Set the report output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_output_dir(dir);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Compare the monitored features of two in-memory datasets.
    ///
    /// A feature whose sample comes up empty after null removal, or whose
    /// column cannot be read as numeric, is omitted from the report with a
    /// warning; one bad feature never invalidates the rest. Errors only
    /// when no monitored feature is present in both datasets at all.
    pub fn detect(&self, reference: &DataFrame, production: &DataFrame) -> Result<DriftReport> {
        let mut report = DriftReport::new();
        let mut present_in_both = 0usize;

        for name in &self.config.features {
            if !has_column(reference, name) || !has_column(production, name) {
                continue;
            }
            present_in_both += 1;

            let ref_sample = match numeric_column(reference, name) {
                Ok(values) => values,
                Err(e) => {
                    warn!(feature = %name, error = %e, "reference column unreadable, feature omitted");
                    continue;
                }
            };
            let prod_sample = match numeric_column(production, name) {
                Ok(values) => values,
                Err(e) => {
                    warn!(feature = %name, error = %e, "production column unreadable, feature omitted");
                    continue;
                }
            };

            if ref_sample.is_empty() || prod_sample.is_empty() {
                warn!(feature = %name, "sample empty after null removal, feature omitted");
                continue;
            }

            match KolmogorovSmirnov::two_sample(&ref_sample, &prod_sample) {
                Ok(outcome) => {
                    report.insert(
                        name.clone(),
                        FeatureDrift {
                            p_value: outcome.p_value,
                            statistic: outcome.statistic,
                            drift_detected: outcome.p_value < self.config.threshold,
                        },
                    );
                }
                Err(e) => {
                    warn!(feature = %name, error = %e, "statistic computation failed, feature omitted");
                }
            }
        }

        if present_in_both == 0 {
            return Err(DomusError::EmptyFeatureSet);
        }

        Ok(report)
    }

    /// Read both datasets from disk, detect drift, and persist the report.
    ///
    /// Fails with a dataset-unreadable error if either input cannot be
    /// parsed as a table, and with a report-write error if the output
    /// directory is unusable. No retries; failures surface to the caller.
    pub fn run(&self, reference: &Path, production: &Path) -> Result<DriftRun> {
        let reference_df = loader::load_table(reference)?;
        let production_df = loader::load_table(production)?;

        let report = self.detect(&reference_df, &production_df)?;
        let report_path = report.write_timestamped(&self.config.output_dir)?;

        info!(
            features_analyzed = report.len(),
            features_drifted = report.drifted_count(),
            report = %report_path.display(),
            "drift detection complete"
        );

        Ok(DriftRun {
            report,
            report_path,
        })
    }
}

fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| *c == name)
}

/// Extract a column as f64, dropping nulls and non-finite values.
///
/// Missing values are removed per column; rows are not jointly aligned, so
/// a null in one column never affects another column's sample.
fn numeric_column(df: &DataFrame, name: &str) -> Result<Array1<f64>> {
    let series = df.column(name)?;
    let casted = series.cast(&DataType::Float64)?;
    let ca = casted.f64()?;

    let values: Vec<f64> = ca.into_iter().flatten().filter(|v| v.is_finite()).collect();
    Ok(Array1::from_vec(values))
}
