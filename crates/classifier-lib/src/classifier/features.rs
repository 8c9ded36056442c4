//! Feature extraction for the statistical classifier
//!
//! Turns an arbitrary-length batch of temperature readings into a fixed
//! statistical feature vector, filtering invalid data without failing.

use crate::config::{DEFAULT_MAX_VALID_TEMPERATURE, DEFAULT_MIN_VALID_TEMPERATURE};
use crate::models::FeatureVector;

/// Extracts statistical features from raw temperature readings
///
/// A reading is usable iff it is finite and strictly inside the
/// physical validity range (exclusive on both ends). Everything else is
/// filtered silently; degraded input shows up as a reduced
/// `active_sensor_count`, never as an error.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    min_valid: f64,
    max_valid: f64,
}

impl FeatureExtractor {
    /// Create an extractor with the default (0, 60) °C validity range
    pub fn new() -> Self {
        Self {
            min_valid: DEFAULT_MIN_VALID_TEMPERATURE,
            max_valid: DEFAULT_MAX_VALID_TEMPERATURE,
        }
    }

    /// Create an extractor with custom exclusive validity bounds
    pub fn with_bounds(min_valid: f64, max_valid: f64) -> Self {
        Self {
            min_valid,
            max_valid,
        }
    }

    pub fn is_valid(&self, reading: f64) -> bool {
        reading.is_finite() && reading > self.min_valid && reading < self.max_valid
    }

    /// Derive the feature vector for one batch of readings
    ///
    /// Never fails. Zero surviving readings yield the degenerate vector
    /// (mean = reference, all spreads 0, count 0); a single survivor
    /// yields zero variance and range. `max_deviation` is measured
    /// against the reference temperature, not the extracted mean.
    pub fn extract(&self, readings: &[f64], reference_temperature: f64) -> FeatureVector {
        let valid: Vec<f64> = readings
            .iter()
            .copied()
            .filter(|r| self.is_valid(*r))
            .collect();

        if valid.is_empty() {
            return FeatureVector {
                mean_temperature: reference_temperature,
                std_deviation: 0.0,
                temperature_range: 0.0,
                max_deviation: 0.0,
                active_sensor_count: 0,
            };
        }

        let mean = mean(&valid);
        let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
        let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let max_deviation = valid
            .iter()
            .map(|r| (r - reference_temperature).abs())
            .fold(0.0_f64, f64::max);

        FeatureVector {
            mean_temperature: mean,
            std_deviation: population_std_dev(&valid, mean),
            temperature_range: max - min,
            max_deviation,
            active_sensor_count: valid.len(),
        }
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by N, not N-1)
fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / values.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: f64 = 25.0;

    #[test]
    fn test_basic_statistics() {
        let extractor = FeatureExtractor::new();
        let f = extractor.extract(&[24.0, 25.0, 26.0], REFERENCE);

        assert_eq!(f.active_sensor_count, 3);
        assert!((f.mean_temperature - 25.0).abs() < 1e-9);
        assert!((f.temperature_range - 2.0).abs() < 1e-9);
        assert!((f.max_deviation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_population_std_dev_divides_by_n() {
        // [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, population variance 4
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let extractor = FeatureExtractor::new();
        let f = extractor.extract(&values, REFERENCE);

        assert!((f.std_deviation - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_deviation_uses_reference_not_mean() {
        let extractor = FeatureExtractor::new();
        // Mean is 30.0; deviation from the 25.0 reference is what counts
        let f = extractor.extract(&[29.0, 31.0], REFERENCE);

        assert!((f.mean_temperature - 30.0).abs() < 1e-9);
        assert!((f.max_deviation - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_filters_non_finite_and_out_of_range() {
        let extractor = FeatureExtractor::new();
        let readings = [f64::NAN, f64::INFINITY, -5.0, 200.0, 23.5];
        let f = extractor.extract(&readings, REFERENCE);

        assert_eq!(f.active_sensor_count, 1);
        assert!((f.mean_temperature - 23.5).abs() < 1e-9);
    }

    #[test]
    fn test_validity_bounds_are_exclusive() {
        let extractor = FeatureExtractor::new();
        assert!(!extractor.is_valid(0.0));
        assert!(!extractor.is_valid(60.0));
        assert!(extractor.is_valid(0.1));
        assert!(extractor.is_valid(59.9));
    }

    #[test]
    fn test_custom_bounds() {
        let extractor = FeatureExtractor::with_bounds(10.0, 30.0);
        let f = extractor.extract(&[5.0, 20.0, 35.0], REFERENCE);

        assert_eq!(f.active_sensor_count, 1);
        assert!((f.mean_temperature - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_yields_degenerate_vector() {
        let extractor = FeatureExtractor::new();
        let f = extractor.extract(&[], REFERENCE);

        assert_eq!(f.active_sensor_count, 0);
        assert_eq!(f.mean_temperature, REFERENCE);
        assert_eq!(f.std_deviation, 0.0);
        assert_eq!(f.temperature_range, 0.0);
        assert_eq!(f.max_deviation, 0.0);
    }

    #[test]
    fn test_all_invalid_input_yields_degenerate_vector() {
        let extractor = FeatureExtractor::new();
        let f = extractor.extract(&[f64::NAN, -40.0, 99.0], REFERENCE);

        assert_eq!(f.active_sensor_count, 0);
        assert_eq!(f.mean_temperature, REFERENCE);
    }

    #[test]
    fn test_single_reading_has_zero_spread() {
        let extractor = FeatureExtractor::new();
        let f = extractor.extract(&[23.5], REFERENCE);

        assert_eq!(f.active_sensor_count, 1);
        assert!((f.mean_temperature - 23.5).abs() < 1e-9);
        assert_eq!(f.std_deviation, 0.0);
        assert_eq!(f.temperature_range, 0.0);
        assert!((f.max_deviation - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_no_nan_in_output_for_any_input() {
        let extractor = FeatureExtractor::new();
        let cases: [&[f64]; 4] = [
            &[],
            &[f64::NAN],
            &[f64::NEG_INFINITY, f64::INFINITY],
            &[25.0, f64::NAN, 24.0],
        ];

        for readings in cases {
            let f = extractor.extract(readings, REFERENCE);
            assert!(f.mean_temperature.is_finite());
            assert!(f.std_deviation.is_finite());
            assert!(f.temperature_range.is_finite());
            assert!(f.max_deviation.is_finite());
        }
    }
}
