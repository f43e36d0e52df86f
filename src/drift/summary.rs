//! Aggregate drift summary and risk classification

use crate::drift::DriftReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse risk classification over a drift report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Classify a drift percentage. First match wins: above 50 is HIGH,
    /// above 20 is MEDIUM, everything else (20 and below) is LOW.
    pub fn from_percentage(drift_percentage: f64) -> Self {
        if drift_percentage > 50.0 {
            RiskTier::High
        } else if drift_percentage > 20.0 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        };
        write!(f, "{s}")
    }
}

/// Aggregate view over a drift report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftSummary {
    /// Number of features analyzed
    pub features_analyzed: usize,
    /// Number of features flagged as drifted
    pub features_drifted: usize,
    /// drifted / analyzed * 100, or 0.0 when nothing was analyzed
    pub drift_percentage: f64,
    /// Risk tier derived from the drift percentage
    pub risk: RiskTier,
}

impl DriftSummary {
    /// Pure, deterministic aggregation over a report. No side effects.
    pub fn from_report(report: &DriftReport) -> Self {
        let analyzed = report.len();
        let drifted = report.drifted_count();
        let drift_percentage = if analyzed == 0 {
            0.0
        } else {
            drifted as f64 / analyzed as f64 * 100.0
        };

        Self {
            features_analyzed: analyzed,
            features_drifted: drifted,
            drift_percentage,
            risk: RiskTier::from_percentage(drift_percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::FeatureDrift;

    fn report_with(drifted: usize, total: usize) -> DriftReport {
        let mut report = DriftReport::new();
        for i in 0..total {
            report.insert(
                format!("feature_{i}"),
                FeatureDrift {
                    p_value: if i < drifted { 0.001 } else { 0.8 },
                    statistic: if i < drifted { 0.9 } else { 0.1 },
                    drift_detected: i < drifted,
                },
            );
        }
        report
    }

    #[test]
    fn test_two_of_five_is_medium() {
        let summary = DriftSummary::from_report(&report_with(2, 5));
        assert_eq!(summary.features_analyzed, 5);
        assert_eq!(summary.features_drifted, 2);
        assert_eq!(summary.drift_percentage, 40.0);
        assert_eq!(summary.risk, RiskTier::Medium);
    }

    #[test]
    fn test_empty_report_is_zero_percent() {
        let summary = DriftSummary::from_report(&DriftReport::new());
        assert_eq!(summary.features_analyzed, 0);
        assert_eq!(summary.drift_percentage, 0.0);
        assert_eq!(summary.risk, RiskTier::Low);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskTier::from_percentage(0.0), RiskTier::Low);
        assert_eq!(RiskTier::from_percentage(20.0), RiskTier::Low);
        assert_eq!(RiskTier::from_percentage(20.01), RiskTier::Medium);
        assert_eq!(RiskTier::from_percentage(50.0), RiskTier::Medium);
        assert_eq!(RiskTier::from_percentage(50.01), RiskTier::High);
        assert_eq!(RiskTier::from_percentage(100.0), RiskTier::High);
    }

    #[test]
    fn test_all_drifted_is_high() {
        let summary = DriftSummary::from_report(&report_with(3, 3));
        assert_eq!(summary.drift_percentage, 100.0);
        assert_eq!(summary.risk, RiskTier::High);
    }

    #[test]
    fn test_one_of_five_is_low_boundary() {
        let summary = DriftSummary::from_report(&report_with(1, 5));
        assert_eq!(summary.drift_percentage, 20.0);
        assert_eq!(summary.risk, RiskTier::Low);
    }
}
