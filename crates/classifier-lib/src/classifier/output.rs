//! Result assembly and display rounding
//!
//! Classification decisions are made at full precision; this stage
//! rounds the reported numbers to one decimal place and assembles the
//! caller-facing result.

use crate::models::{ClassificationResult, FeatureVector, SensorStatus};

/// Assembles [`ClassificationResult`] values from one classification pass
#[derive(Debug, Clone, Default)]
pub struct ResultFormatter;

impl ResultFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(
        &self,
        status: SensorStatus,
        confidence: f64,
        features: &FeatureVector,
        input_sensor_count: usize,
    ) -> ClassificationResult {
        let feature_breakdown = FeatureVector {
            mean_temperature: round_one_decimal(features.mean_temperature),
            std_deviation: round_one_decimal(features.std_deviation),
            temperature_range: round_one_decimal(features.temperature_range),
            max_deviation: round_one_decimal(features.max_deviation),
            active_sensor_count: features.active_sensor_count,
        };

        ClassificationResult {
            status,
            confidence: round_one_decimal(confidence),
            raw_mean_temperature: feature_breakdown.mean_temperature,
            feature_breakdown,
            input_sensor_count,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
