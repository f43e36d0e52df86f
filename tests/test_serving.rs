//! Integration test: Prediction service flow
//! Tests: save artifact → load service → predict → bucket → drift check

use domus::data::loader;
use domus::drift::{DriftDetector, RiskTier};
use domus::model::{ForestModel, RegressionTree, TreeNode};
use domus::serving::{HouseFeatures, PredictionService, PriceRange};
use polars::prelude::*;
use std::path::Path;

const TEST_HOUSE: HouseFeatures = HouseFeatures {
    gr_liv_area: 1500.0,
    bedroom_abv_gr: 3,
    full_bath: 2,
    year_built: 2000,
    total_bsmt_sf: 800.0,
};

fn feature_names() -> Vec<String> {
    vec![
        "GrLivArea".to_string(),
        "BedroomAbvGr".to_string(),
        "FullBath".to_string(),
        "YearBuilt".to_string(),
        "TotalBsmtSF".to_string(),
    ]
}

fn area_forest() -> ForestModel {
    // Two trees splitting on living area; averaged predictions land in
    // different buckets depending on the input.
    let tree1 = RegressionTree::new(vec![
        TreeNode::split(0, 1400.0, 1, 2),
        TreeNode::leaf(90_000.0),
        TreeNode::leaf(210_000.0),
    ]);
    let tree2 = RegressionTree::new(vec![
        TreeNode::split(0, 1800.0, 1, 2),
        TreeNode::leaf(150_000.0),
        TreeNode::leaf(330_000.0),
    ]);
    ForestModel::from_trees(feature_names(), vec![tree1, tree2]).unwrap()
}

// ============================================================================
// Artifact Loading Tests
// ============================================================================

#[test]
fn test_service_from_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    area_forest().save(&path).unwrap();

    let service = PredictionService::from_artifact(&path).unwrap();
    assert_eq!(service.model().n_trees(), 2);
    assert_eq!(service.model().n_features(), 5);
}

#[test]
fn test_service_rejects_missing_artifact() {
    assert!(PredictionService::from_artifact(Path::new("/nonexistent/model.json")).is_err());
}

// ============================================================================
// Prediction Tests
// ============================================================================

#[test]
fn test_predict_returns_rounded_bucketed_price() {
    let service = PredictionService::new(area_forest());

    // 1500 sqft: tree1 -> 210000, tree2 -> 150000, mean 180000
    let response = service.predict(&TEST_HOUSE).unwrap();
    assert_eq!(response.predicted_price, 180_000.0);
    assert_eq!(response.price_range, PriceRange::Medium);
}

#[test]
fn test_predict_small_house_low_bucket() {
    let service = PredictionService::new(area_forest());
    let mut features = TEST_HOUSE;
    features.gr_liv_area = 1000.0;

    // 1000 sqft: tree1 -> 90000, tree2 -> 150000, mean 120000
    let response = service.predict(&features).unwrap();
    assert_eq!(response.predicted_price, 120_000.0);
    assert_eq!(response.price_range, PriceRange::Medium);
}

#[test]
fn test_predict_large_house_high_bucket() {
    let service = PredictionService::new(area_forest());
    let mut features = TEST_HOUSE;
    features.gr_liv_area = 2200.0;

    // 2200 sqft: tree1 -> 210000, tree2 -> 330000, mean 270000
    let response = service.predict(&features).unwrap();
    assert_eq!(response.predicted_price, 270_000.0);
    assert_eq!(response.price_range, PriceRange::High);
}

#[test]
fn test_predict_rejects_invalid_input() {
    let service = PredictionService::new(area_forest());
    let mut features = TEST_HOUSE;
    features.gr_liv_area = f64::INFINITY;
    assert!(service.predict(&features).is_err());
}

#[test]
fn test_response_wire_format() {
    let service = PredictionService::new(area_forest());
    let response = service.predict(&TEST_HOUSE).unwrap();

    let json = serde_json::to_value(&response).unwrap();
    assert!(json["predicted_price"].is_f64());
    assert_eq!(json["price_range"], "Medium");
}

// ============================================================================
// Drift Check Flow
// ============================================================================

#[test]
fn test_check_drift_through_the_service() {
    let dir = tempfile::tempdir().unwrap();

    let n = 60;
    let area: Vec<f64> = (0..n).map(|i| 900.0 + (i % 30) as f64 * 40.0).collect();
    let bedrooms: Vec<i64> = (0..n).map(|i| 1 + (i % 4) as i64).collect();
    let baths: Vec<i64> = (0..n).map(|i| 1 + (i % 3) as i64).collect();
    let years: Vec<i64> = (0..n).map(|i| 1950 + (i % 50) as i64).collect();
    let basement: Vec<f64> = (0..n).map(|i| 400.0 + (i % 40) as f64 * 15.0).collect();

    let mut df = df!(
        "GrLivArea" => &area,
        "BedroomAbvGr" => &bedrooms,
        "FullBath" => &baths,
        "YearBuilt" => &years,
        "TotalBsmtSF" => &basement
    )
    .unwrap();
    let reference = dir.path().join("reference.csv");
    loader::write_csv(&mut df, &reference).unwrap();

    let detector = DriftDetector::new().with_output_dir(dir.path().join("reports"));
    let service = PredictionService::new(area_forest()).with_detector(detector);

    let check = service.check_drift(&reference, &reference).unwrap();
    assert_eq!(check.summary.features_analyzed, 5);
    assert_eq!(check.summary.features_drifted, 0);
    assert_eq!(check.summary.risk, RiskTier::Low);
    assert!(check.report_path.exists());
}
