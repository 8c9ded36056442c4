//! Statistical anomaly classification
//!
//! Readings flow one way: validity filtering and feature extraction,
//! threshold classification with confidence adjustment, then result
//! assembly. No feedback loops and no shared mutable state.

mod features;
mod output;
mod service;
mod thresholds;

pub use features::FeatureExtractor;
pub use output::ResultFormatter;
pub use service::AnomalyService;
pub use thresholds::ThresholdClassifier;
