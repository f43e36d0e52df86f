//! Request and response types for the prediction service

use crate::error::{DomusError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed five-field input schema, serialized under the dataset column names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseFeatures {
    /// Above-ground living area in square feet
    #[serde(rename = "GrLivArea")]
    pub gr_liv_area: f64,

    /// Number of bedrooms above ground
    #[serde(rename = "BedroomAbvGr")]
    pub bedroom_abv_gr: i64,

    /// Number of full bathrooms
    #[serde(rename = "FullBath")]
    pub full_bath: i64,

    /// Year of construction
    #[serde(rename = "YearBuilt")]
    pub year_built: i64,

    /// Basement area in square feet
    #[serde(rename = "TotalBsmtSF")]
    pub total_bsmt_sf: f64,
}

impl HouseFeatures {
    /// Reject non-finite areas and negative counts or areas
    pub fn validate(&self) -> Result<()> {
        if !self.gr_liv_area.is_finite() || !self.total_bsmt_sf.is_finite() {
            return Err(DomusError::ValidationError(
                "areas must be finite numbers".to_string(),
            ));
        }
        if self.gr_liv_area < 0.0 || self.total_bsmt_sf < 0.0 {
            return Err(DomusError::ValidationError(
                "areas must be non-negative".to_string(),
            ));
        }
        if self.bedroom_abv_gr < 0 || self.full_bath < 0 {
            return Err(DomusError::ValidationError(
                "room counts must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Model input row in monitored-feature order
    pub fn to_array(&self) -> Array1<f64> {
        Array1::from_vec(vec![
            self.gr_liv_area,
            self.bedroom_abv_gr as f64,
            self.full_bath as f64,
            self.year_built as f64,
            self.total_bsmt_sf,
        ])
    }
}

/// Static price range buckets for a predicted price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceRange {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl PriceRange {
    /// Bucket a predicted price: below 100000 Low, below 200000 Medium,
    /// below 300000 High, everything else Very High.
    pub fn from_price(price: f64) -> Self {
        if price < 100_000.0 {
            PriceRange::Low
        } else if price < 200_000.0 {
            PriceRange::Medium
        } else if price < 300_000.0 {
            PriceRange::High
        } else {
            PriceRange::VeryHigh
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PriceRange::Low => "Low",
            PriceRange::Medium => "Medium",
            PriceRange::High => "High",
            PriceRange::VeryHigh => "Very High",
        };
        write!(f, "{s}")
    }
}

/// Prediction result returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Predicted sale price, rounded to two decimals
    pub predicted_price: f64,
    /// Bucket the prediction falls into
    pub price_range: PriceRange,
}
