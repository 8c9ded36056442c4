//! Core data models for the anomaly classification service

use serde::{Deserialize, Serialize};

/// Classification outcome for a batch of sensor readings
///
/// Variants are ordered by severity: `Normal < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    /// Readings sit within the expected band around the reference
    Normal,
    /// Deviation exceeds the warning threshold
    Warning,
    /// Deviation exceeds the critical threshold
    Critical,
}

impl SensorStatus {
    /// Returns true if the status should be surfaced as an anomaly
    pub fn is_anomalous(&self) -> bool {
        matches!(self, SensorStatus::Warning | SensorStatus::Critical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorStatus::Normal => "normal",
            SensorStatus::Warning => "warning",
            SensorStatus::Critical => "critical",
        }
    }
}

/// Statistical features derived from one batch of readings
///
/// Built fresh for every prediction call. When no reading survives
/// validity filtering, `mean_temperature` falls back to the reference
/// temperature and all spread measures are zero; `active_sensor_count`
/// of zero is the signal for that degenerate case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub mean_temperature: f64,
    /// Population standard deviation (divide by N, not N-1)
    pub std_deviation: f64,
    /// max(valid) - min(valid)
    pub temperature_range: f64,
    /// Largest |reading - reference_temperature| over valid readings
    pub max_deviation: f64,
    /// Number of readings that passed validity filtering
    pub active_sensor_count: usize,
}

/// Result returned to callers of [`crate::AnomalyService::predict`]
///
/// `confidence` is a heuristic certainty score on a [10, 100] percent
/// scale, not a calibrated probability. Reported values are rounded to
/// one decimal place; classification decisions are made at full
/// precision before rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub status: SensorStatus,
    pub confidence: f64,
    /// Mean temperature echoed from the feature vector
    pub raw_mean_temperature: f64,
    pub feature_breakdown: FeatureVector,
    /// Readings originally supplied, including ones filtered out
    pub input_sensor_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_severity_ordering() {
        assert!(SensorStatus::Normal < SensorStatus::Warning);
        assert!(SensorStatus::Warning < SensorStatus::Critical);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SensorStatus::Critical).unwrap(),
            "\"critical\""
        );
        assert_eq!(
            serde_json::from_str::<SensorStatus>("\"warning\"").unwrap(),
            SensorStatus::Warning
        );
    }

    #[test]
    fn test_anomalous_statuses() {
        assert!(!SensorStatus::Normal.is_anomalous());
        assert!(SensorStatus::Warning.is_anomalous());
        assert!(SensorStatus::Critical.is_anomalous());
    }
}
