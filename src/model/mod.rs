//! Model artifact loading and prediction

mod forest;

pub use forest::{ForestModel, RegressionTree, TreeNode};
