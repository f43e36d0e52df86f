//! Serving layer
//!
//! Price prediction over an immutable, dependency-injected model handle,
//! plus the drift check flow that aggregates detector output into a risk
//! summary. Transport wiring is owned by whatever embeds the service.

mod service;
mod types;

pub use service::{DriftCheck, PredictionService};
pub use types::{HouseFeatures, PredictionResponse, PriceRange};
