//! Threshold classification with confidence adjustment
//!
//! Maps a feature vector to a status and confidence score. The band
//! formulas, adjustment multipliers, and override constants reproduce
//! the tuning of the original deployment and must not be changed
//! without flagging the compatibility break.

use crate::config::ServiceConfiguration;
use crate::models::{FeatureVector, SensorStatus};

/// Deviation beyond which critical status is forced regardless of bands
const HARD_OVERRIDE_DEVIATION: f64 = 5.0;

/// Confidence is never reported below this floor
const CONFIDENCE_FLOOR: f64 = 10.0;

/// Confidence is never reported above this ceiling
const CONFIDENCE_CEILING: f64 = 100.0;

/// Maps feature vectors to (status, confidence) pairs
///
/// Infallible at runtime: threshold ordering is rejected at
/// configuration validation, and every division below is guarded.
#[derive(Debug, Clone)]
pub struct ThresholdClassifier {
    warning_threshold: f64,
    critical_threshold: f64,
}

impl ThresholdClassifier {
    /// Build from a validated configuration
    pub fn new(config: &ServiceConfiguration) -> Self {
        Self {
            warning_threshold: config.warning_threshold,
            critical_threshold: config.critical_threshold,
        }
    }

    /// Classify one feature vector
    ///
    /// Confidence is computed at full precision; rounding for display is
    /// the formatter's job. The hard override is evaluated on every
    /// call, independent of which band the deviation landed in.
    pub fn classify(&self, features: &FeatureVector) -> (SensorStatus, f64) {
        let deviation = features.max_deviation;

        let (mut status, base_confidence) = self.primary_band(deviation);
        let mut confidence = adjust_confidence(base_confidence, features);

        if deviation > HARD_OVERRIDE_DEVIATION {
            status = SensorStatus::Critical;
            confidence = (80.0 + deviation * 2.0).min(95.0);
        }

        (status, confidence.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING))
    }

    fn primary_band(&self, deviation: f64) -> (SensorStatus, f64) {
        if deviation <= self.warning_threshold {
            // Zero warning threshold: the ratio is 0 at zero deviation
            // and saturates at 1 otherwise
            let ratio = if self.warning_threshold == 0.0 {
                if deviation == 0.0 {
                    0.0
                } else {
                    1.0
                }
            } else {
                deviation / self.warning_threshold
            };
            (SensorStatus::Normal, (100.0 - ratio * 40.0).max(60.0))
        } else if deviation <= self.critical_threshold {
            let fraction = (deviation - self.warning_threshold)
                / (self.critical_threshold - self.warning_threshold);
            (SensorStatus::Warning, (80.0 - fraction * 30.0).max(50.0))
        } else {
            (
                SensorStatus::Critical,
                (70.0 + (deviation - self.critical_threshold) * 10.0).min(95.0),
            )
        }
    }
}

/// Secondary statistical factors scale the band confidence, in order:
/// spread across sensors, per-sensor variance, then sensor count.
fn adjust_confidence(base: f64, features: &FeatureVector) -> f64 {
    let mut confidence = base;
    if features.temperature_range > 2.0 {
        confidence *= 0.9;
    }
    if features.std_deviation > 1.0 {
        confidence *= 0.95;
    }
    if features.active_sensor_count < 2 {
        confidence *= 0.8;
    } else if features.active_sensor_count >= 3 {
        confidence *= 1.1;
    }
    confidence
}
