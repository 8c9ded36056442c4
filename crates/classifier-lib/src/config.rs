//! Classifier configuration
//!
//! Consolidates the classification thresholds and reading validity
//! bounds into a single value object validated once at construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default reference temperature in degrees Celsius
pub const DEFAULT_REFERENCE_TEMPERATURE: f64 = 25.0;

/// Default warning threshold (deviation from reference, degrees Celsius)
pub const DEFAULT_WARNING_THRESHOLD: f64 = 1.5;

/// Default critical threshold (deviation from reference, degrees Celsius)
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 2.5;

/// Default soft cap on sensors per request, reported as metadata only
pub const DEFAULT_MAX_SUPPORTED_SENSORS: usize = 16;

/// Default lower validity bound for a single reading (exclusive)
pub const DEFAULT_MIN_VALID_TEMPERATURE: f64 = 0.0;

/// Default upper validity bound for a single reading (exclusive)
pub const DEFAULT_MAX_VALID_TEMPERATURE: f64 = 60.0;

/// Configuration errors, raised at construction time only
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("critical threshold {critical} must be greater than warning threshold {warning}")]
    ThresholdOrder { warning: f64, critical: f64 },

    #[error("thresholds must be non-negative (warning {warning}, critical {critical})")]
    NegativeThreshold { warning: f64, critical: f64 },

    #[error("reading validity range is inverted ({min} >= {max})")]
    InvalidValidityRange { min: f64, max: f64 },
}

/// Immutable classifier configuration
///
/// Set once at service construction. Thresholds are deviations from the
/// reference temperature, in the same units as the readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfiguration {
    pub reference_temperature: f64,
    pub warning_threshold: f64,
    pub critical_threshold: f64,
    /// Soft cap for documentation and metadata; larger inputs are accepted
    pub max_supported_sensors: usize,
    /// Readings at or below this value are discarded
    pub min_valid_temperature: f64,
    /// Readings at or above this value are discarded
    pub max_valid_temperature: f64,
}

impl Default for ServiceConfiguration {
    fn default() -> Self {
        Self {
            reference_temperature: DEFAULT_REFERENCE_TEMPERATURE,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
            max_supported_sensors: DEFAULT_MAX_SUPPORTED_SENSORS,
            min_valid_temperature: DEFAULT_MIN_VALID_TEMPERATURE,
            max_valid_temperature: DEFAULT_MAX_VALID_TEMPERATURE,
        }
    }
}

impl ServiceConfiguration {
    /// Check threshold ordering and validity bounds
    ///
    /// A warning threshold of zero is allowed; the classifier guards the
    /// resulting division. An inverted or collapsed threshold pair is a
    /// programmer error and is rejected here rather than at classify
    /// time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.warning_threshold < 0.0 || self.critical_threshold < 0.0 {
            return Err(ConfigError::NegativeThreshold {
                warning: self.warning_threshold,
                critical: self.critical_threshold,
            });
        }
        if self.critical_threshold <= self.warning_threshold {
            return Err(ConfigError::ThresholdOrder {
                warning: self.warning_threshold,
                critical: self.critical_threshold,
            });
        }
        if self.min_valid_temperature >= self.max_valid_temperature {
            return Err(ConfigError::InvalidValidityRange {
                min: self.min_valid_temperature,
                max: self.max_valid_temperature,
            });
        }
        Ok(())
    }
}
