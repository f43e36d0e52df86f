//! Drift detection configuration

use crate::drift::MONITORED_FEATURES;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default p-value cutoff below which drift is declared
pub const DEFAULT_THRESHOLD: f64 = 0.05;

/// Default directory for persisted drift reports
pub const DEFAULT_OUTPUT_DIR: &str = "drift_reports";

/// Configuration for drift detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Ordered list of monitored feature columns
    pub features: Vec<String>,

    /// p-value cutoff in (0, 1); drift is declared when p_value < threshold
    pub threshold: f64,

    /// Directory where timestamped reports are written
    pub output_dir: PathBuf,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            features: MONITORED_FEATURES.iter().map(|s| s.to_string()).collect(),
            threshold: DEFAULT_THRESHOLD,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl DriftConfig {
    /// Set the p-value cutoff, clamped into (0, 1)
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(1e-6, 1.0 - 1e-6);
        self
    }

    /// Replace the monitored feature list
    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    /// Set the report output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DriftConfig::default();
        assert_eq!(config.threshold, 0.05);
        assert_eq!(config.features.len(), 5);
        assert_eq!(config.features[0], "GrLivArea");
    }

    #[test]
    fn test_threshold_clamped() {
        let config = DriftConfig::default().with_threshold(5.0);
        assert!(config.threshold < 1.0);

        let config = DriftConfig::default().with_threshold(-1.0);
        assert!(config.threshold > 0.0);
    }
}
