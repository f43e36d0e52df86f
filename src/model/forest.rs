//! Regression forest artifact
//!
//! Load-only model consumed by the serving layer: a set of decision trees
//! whose predictions are averaged. Trees are stored as flat node arenas in
//! a JSON artifact produced offline; the handle is deserialized once at
//! startup and never mutated or reloaded.

use crate::error::{DomusError, Result};
use ndarray::{Array1, Array2, ArrayView1};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One node of a regression tree.
///
/// Internal nodes route on `feature <= threshold` (left) versus greater
/// (right); leaves carry the predicted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub feature: usize,
    pub threshold: f64,
    pub left: usize,
    pub right: usize,
    pub value: f64,
    pub is_leaf: bool,
}

impl TreeNode {
    pub fn leaf(value: f64) -> Self {
        Self {
            feature: 0,
            threshold: 0.0,
            left: 0,
            right: 0,
            value,
            is_leaf: true,
        }
    }

    pub fn split(feature: usize, threshold: f64, left: usize, right: usize) -> Self {
        Self {
            feature,
            threshold,
            left,
            right,
            value: 0.0,
            is_leaf: false,
        }
    }
}

/// A single regression tree as a flat node arena rooted at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut idx = 0;
        loop {
            let node = &self.nodes[idx];
            if node.is_leaf {
                return node.value;
            }
            idx = if row[node.feature] <= node.threshold {
                node.left
            } else {
                node.right
            };
        }
    }

    /// Check node indices and feature indices against the arena bounds.
    ///
    /// Also rejects self-referencing children, which would loop forever
    /// during traversal.
    fn validate(&self, n_features: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(DomusError::ModelError("tree has no nodes".to_string()));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            if node.is_leaf {
                continue;
            }
            if node.feature >= n_features {
                return Err(DomusError::ModelError(format!(
                    "node {idx} routes on feature {} but the model has {n_features} features",
                    node.feature
                )));
            }
            if node.left >= self.nodes.len() || node.right >= self.nodes.len() {
                return Err(DomusError::ModelError(format!(
                    "node {idx} references a child outside the arena"
                )));
            }
            if node.left <= idx || node.right <= idx {
                return Err(DomusError::ModelError(format!(
                    "node {idx} references a non-descendant child"
                )));
            }
        }
        Ok(())
    }
}

/// Regression forest averaged over its trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    feature_names: Vec<String>,
    trees: Vec<RegressionTree>,
}

impl ForestModel {
    /// Assemble a forest from prebuilt trees
    pub fn from_trees(feature_names: Vec<String>, trees: Vec<RegressionTree>) -> Result<Self> {
        let model = Self {
            feature_names,
            trees,
        };
        model.validate()?;
        Ok(model)
    }

    /// Load the JSON artifact from disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            DomusError::ModelError(format!("cannot read artifact {}: {e}", path.display()))
        })?;
        let model: Self = serde_json::from_str(&json).map_err(|e| {
            DomusError::ModelError(format!("invalid artifact {}: {e}", path.display()))
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Write the JSON artifact
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(DomusError::ModelError("forest has no trees".to_string()));
        }
        if self.feature_names.is_empty() {
            return Err(DomusError::ModelError(
                "forest has no feature names".to_string(),
            ));
        }
        for tree in &self.trees {
            tree.validate(self.feature_names.len())?;
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Predict a single row, averaging over all trees
    pub fn predict(&self, features: &Array1<f64>) -> Result<f64> {
        if features.len() != self.n_features() {
            return Err(DomusError::ValidationError(format!(
                "expected {} features, got {}",
                self.n_features(),
                features.len()
            )));
        }

        let sum: f64 = self
            .trees
            .iter()
            .map(|tree| tree.predict_row(features.view()))
            .sum();
        Ok(sum / self.trees.len() as f64)
    }

    /// Predict a batch of rows in parallel
    pub fn predict_batch(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.n_features() {
            return Err(DomusError::ValidationError(format!(
                "expected {} features, got {}",
                self.n_features(),
                x.ncols()
            )));
        }

        let rows: Vec<ArrayView1<f64>> = x.outer_iter().collect();
        let predictions: Vec<f64> = rows
            .par_iter()
            .map(|row| {
                let sum: f64 = self.trees.iter().map(|tree| tree.predict_row(*row)).sum();
                sum / self.trees.len() as f64
            })
            .collect();

        Ok(Array1::from_vec(predictions))
    }
}
