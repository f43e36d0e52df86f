//! Prediction service
//!
//! Owns the loaded model behind an explicitly injected, immutable handle:
//! constructed once at startup, shared read-only afterwards, never
//! reloaded. Also drives the drift check flow for the monitoring side of
//! the service.

use crate::drift::{DriftDetector, DriftReport, DriftSummary};
use crate::error::Result;
use crate::model::ForestModel;
use crate::serving::types::{HouseFeatures, PredictionResponse, PriceRange};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Result of a drift check: the persisted report and its aggregate view
#[derive(Debug, Clone)]
pub struct DriftCheck {
    pub report: DriftReport,
    pub summary: DriftSummary,
    pub report_path: PathBuf,
}

/// Serves price predictions from an immutable model handle
#[derive(Debug, Clone)]
pub struct PredictionService {
    model: Arc<ForestModel>,
    detector: DriftDetector,
}

impl PredictionService {
    /// Wrap an already-loaded model
    pub fn new(model: ForestModel) -> Self {
        Self {
            model: Arc::new(model),
            detector: DriftDetector::new(),
        }
    }

    /// Load the model artifact and build the service
    pub fn from_artifact(path: &Path) -> Result<Self> {
        let model = ForestModel::load(path)?;
        info!(artifact = %path.display(), trees = model.n_trees(), "model loaded");
        Ok(Self::new(model))
    }

    /// Replace the drift detector (threshold, features, output directory)
    pub fn with_detector(mut self, detector: DriftDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn model(&self) -> &ForestModel {
        &self.model
    }

    /// Validate the input, predict, and bucket the price.
    ///
    /// The returned price is rounded to two decimals.
    pub fn predict(&self, features: &HouseFeatures) -> Result<PredictionResponse> {
        features.validate()?;

        let raw = self.model.predict(&features.to_array())?;
        let predicted_price = (raw * 100.0).round() / 100.0;
        let price_range = PriceRange::from_price(predicted_price);

        info!(
            event_type = "prediction",
            predicted_price,
            price_range = %price_range,
            "prediction served"
        );

        Ok(PredictionResponse {
            predicted_price,
            price_range,
        })
    }

    /// Run drift detection over the two dataset files and aggregate the result
    pub fn check_drift(&self, reference: &Path, production: &Path) -> Result<DriftCheck> {
        let run = self.detector.run(reference, production)?;
        let summary = DriftSummary::from_report(&run.report);

        info!(
            event_type = "drift_detection",
            features_analyzed = summary.features_analyzed,
            features_drifted = summary.features_drifted,
            drift_percentage = summary.drift_percentage,
            risk_level = %summary.risk,
            "drift check complete"
        );

        Ok(DriftCheck {
            report: run.report,
            summary,
            report_path: run.report_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RegressionTree, TreeNode};

    fn constant_service(price: f64) -> PredictionService {
        let tree = RegressionTree::new(vec![TreeNode::leaf(price)]);
        let names = vec![
            "GrLivArea".to_string(),
            "BedroomAbvGr".to_string(),
            "FullBath".to_string(),
            "YearBuilt".to_string(),
            "TotalBsmtSF".to_string(),
        ];
        PredictionService::new(ForestModel::from_trees(names, vec![tree]).unwrap())
    }

    fn sample_features() -> HouseFeatures {
        HouseFeatures {
            gr_liv_area: 1500.0,
            bedroom_abv_gr: 3,
            full_bath: 2,
            year_built: 2000,
            total_bsmt_sf: 800.0,
        }
    }

    #[test]
    fn test_predict_buckets_and_rounds() {
        let response = constant_service(250_000.456)
            .predict(&sample_features())
            .unwrap();
        assert_eq!(response.predicted_price, 250_000.46);
        assert_eq!(response.price_range, PriceRange::High);
    }

    #[test]
    fn test_predict_low_bucket() {
        let response = constant_service(85_000.0)
            .predict(&sample_features())
            .unwrap();
        assert_eq!(response.price_range, PriceRange::Low);
    }

    #[test]
    fn test_predict_very_high_bucket() {
        let response = constant_service(450_000.0)
            .predict(&sample_features())
            .unwrap();
        assert_eq!(response.price_range, PriceRange::VeryHigh);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut features = sample_features();
        features.bedroom_abv_gr = -1;
        assert!(constant_service(200_000.0).predict(&features).is_err());
    }
}
