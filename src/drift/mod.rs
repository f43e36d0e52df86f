//! Drift detection module
//!
//! Compares monitored feature distributions between a reference dataset and
//! a production dataset with a two-sample Kolmogorov-Smirnov test, persists
//! a timestamped JSON report, and classifies the aggregate result into a
//! risk tier.

mod config;
mod detector;
mod ks;
mod report;
mod summary;

pub use config::{DriftConfig, DEFAULT_OUTPUT_DIR, DEFAULT_THRESHOLD};
pub use detector::{DriftDetector, DriftRun};
pub use ks::{KolmogorovSmirnov, KsOutcome};
pub use report::{DriftReport, FeatureDrift};
pub use summary::{DriftSummary, RiskTier};

/// Feature columns monitored for drift, in fixed order
pub const MONITORED_FEATURES: [&str; 5] = [
    "GrLivArea",
    "BedroomAbvGr",
    "FullBath",
    "YearBuilt",
    "TotalBsmtSF",
];
