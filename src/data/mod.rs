//! Data loading, preparation, and synthetic drift generation

pub mod loader;
pub mod prepare;
pub mod synthetic;

pub use prepare::{prepare, PrepareOutcome, COLUMN_MAPPING};
pub use synthetic::{DriftGenerator, DriftLevel, DRIFTED_COLUMNS};
