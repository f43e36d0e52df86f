//! Drift report types and persistence

use crate::error::{DomusError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Drift analysis result for a single monitored feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDrift {
    /// Two-sided p-value of the KS test
    pub p_value: f64,
    /// Maximum distance between the two empirical CDFs
    pub statistic: f64,
    /// True iff p_value fell below the detection threshold
    pub drift_detected: bool,
}

/// Mapping from feature name to its drift result.
///
/// Covers exactly the monitored features present in both datasets.
/// Immutable once written to disk; each detection run produces a new
/// timestamped file, never overwriting or merging prior reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriftReport {
    features: BTreeMap<String, FeatureDrift>,
}

impl DriftReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, feature: impl Into<String>, result: FeatureDrift) {
        self.features.insert(feature.into(), result);
    }

    pub fn get(&self, feature: &str) -> Option<&FeatureDrift> {
        self.features.get(feature)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FeatureDrift)> {
        self.features.iter()
    }

    /// Names of features flagged as drifted
    pub fn drifted_features(&self) -> Vec<&str> {
        self.features
            .iter()
            .filter(|(_, r)| r.drift_detected)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Number of features flagged as drifted
    pub fn drifted_count(&self) -> usize {
        self.features.values().filter(|r| r.drift_detected).count()
    }

    /// Parse a report back from its JSON wire format
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the JSON wire format (2-space pretty-printed object)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    /// Persist the report under `output_dir` as `drift_<YYYYMMDD_HHMMSS>.json`.
    ///
    /// The directory is created if absent. The UTC timestamp has second
    /// granularity, so reports from distinct runs never collide.
    pub fn write_timestamped(&self, output_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir).map_err(|e| DomusError::ReportWrite {
            path: output_dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let path = output_dir.join(format!("drift_{stamp}.json"));
        let json = self.to_json()?;

        std::fs::write(&path, json).map_err(|e| DomusError::ReportWrite {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(path)
    }
}
