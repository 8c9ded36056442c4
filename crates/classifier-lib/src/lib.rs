//! Core library for the temperature anomaly classification service
//!
//! This crate provides the core functionality for:
//! - Statistical feature extraction from raw sensor readings
//! - Threshold-based classification with confidence scoring
//! - The service facade tying extraction and classification together
//! - Health checks and observability

pub mod classifier;
pub mod config;
pub mod health;
pub mod models;
pub mod observability;

pub use classifier::{AnomalyService, FeatureExtractor, ResultFormatter, ThresholdClassifier};
pub use config::{ConfigError, ServiceConfiguration};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{ServiceMetrics, StructuredLogger};
