//! Service facade for the anomaly classifier
//!
//! Owns the validated configuration and wires feature extraction,
//! classification, and result assembly behind a single `predict` call.
//! Stateless after construction; safe to share behind an `Arc` across
//! any number of concurrent request handlers.

use crate::classifier::{FeatureExtractor, ResultFormatter, ThresholdClassifier};
use crate::config::{ConfigError, ServiceConfiguration};
use crate::models::ClassificationResult;
use tracing::{debug, warn};

pub struct AnomalyService {
    config: ServiceConfiguration,
    extractor: FeatureExtractor,
    classifier: ThresholdClassifier,
    formatter: ResultFormatter,
    ready: bool,
}

impl AnomalyService {
    /// Construct the service from a configuration, validating it once
    ///
    /// The service is ready synchronously when this returns; there is no
    /// asynchronous warm-up.
    pub fn new(config: ServiceConfiguration) -> Result<Self, ConfigError> {
        config.validate()?;
        let extractor = FeatureExtractor::with_bounds(
            config.min_valid_temperature,
            config.max_valid_temperature,
        );
        let classifier = ThresholdClassifier::new(&config);
        Ok(Self {
            config,
            extractor,
            classifier,
            formatter: ResultFormatter::new(),
            ready: true,
        })
    }

    /// Classify one batch of readings
    ///
    /// Always returns a result for any slice: invalid readings are
    /// filtered, and a batch with no usable readings produces the
    /// degenerate low-confidence result instead of an error. Callers
    /// comparing `input_sensor_count` against the feature breakdown's
    /// `active_sensor_count` can detect silently degraded input.
    pub fn predict(&self, readings: &[f64]) -> ClassificationResult {
        let features = self
            .extractor
            .extract(readings, self.config.reference_temperature);

        if features.active_sensor_count == 0 && !readings.is_empty() {
            warn!(
                input_sensors = readings.len(),
                "All readings failed validity filtering"
            );
        }

        let (status, confidence) = self.classifier.classify(&features);

        debug!(
            status = status.as_str(),
            confidence,
            active_sensors = features.active_sensor_count,
            input_sensors = readings.len(),
            "Classified sensor batch"
        );

        self.formatter
            .format(status, confidence, &features, readings.len())
    }

    /// True once configuration has been loaded and validated
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Read-only configuration snapshot
    pub fn configuration(&self) -> &ServiceConfiguration {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SensorStatus;
    use std::sync::Arc;

    fn service() -> AnomalyService {
        AnomalyService::new(ServiceConfiguration::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        let config = ServiceConfiguration {
            warning_threshold: 3.0,
            critical_threshold: 2.0,
            ..Default::default()
        };
        assert!(AnomalyService::new(config).is_err());
    }

    #[test]
    fn test_ready_after_construction() {
        assert!(service().is_ready());
    }

    #[test]
    fn test_configuration_snapshot() {
        let service = service();
        assert_eq!(service.configuration().reference_temperature, 25.0);
        assert_eq!(service.configuration().max_supported_sensors, 16);
    }

    #[test]
    fn test_normal_scenario() {
        let result = service().predict(&[24.8, 25.1, 25.3]);

        assert_eq!(result.status, SensorStatus::Normal);
        assert_eq!(result.input_sensor_count, 3);
        assert_eq!(result.feature_breakdown.active_sensor_count, 3);
        assert!((result.feature_breakdown.max_deviation - 0.3).abs() < 1e-9);
        // Base 92 with the three-sensor bonus clamps to the ceiling
        assert!((result.confidence - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_warning_scenario() {
        let result = service().predict(&[23.0, 25.8, 26.5]);

        assert_eq!(result.status, SensorStatus::Warning);
        assert!((result.feature_breakdown.max_deviation - 2.0).abs() < 1e-9);
        // Base 65, x0.9 range, x0.95 std, x1.1 count, rounded
        assert!((result.confidence - 61.1).abs() < 1e-9);
    }

    #[test]
    fn test_critical_override_scenario() {
        let result = service().predict(&[18.0, 32.0, 15.5]);

        assert_eq!(result.status, SensorStatus::Critical);
        assert!((result.feature_breakdown.max_deviation - 9.5).abs() < 1e-9);
        assert!((result.confidence - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_scenario() {
        let result = service().predict(&[]);

        assert_eq!(result.status, SensorStatus::Normal);
        assert_eq!(result.input_sensor_count, 0);
        assert_eq!(result.feature_breakdown.active_sensor_count, 0);
        assert_eq!(result.raw_mean_temperature, 25.0);
        // Full base confidence with the zero-sensor penalty
        assert!((result.confidence - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_partially_invalid_input_scenario() {
        let result = service().predict(&[f64::NAN, 200.0, 23.5]);

        assert_eq!(result.status, SensorStatus::Normal);
        assert_eq!(result.input_sensor_count, 3);
        assert_eq!(result.feature_breakdown.active_sensor_count, 1);
        assert!((result.raw_mean_temperature - 23.5).abs() < 1e-9);
        // Deviation 1.5 sits on the band floor of 60, x0.8 single-sensor
        assert!((result.confidence - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_invalid_input_reports_zero_active() {
        let result = service().predict(&[f64::NAN, f64::INFINITY, -10.0]);

        assert_eq!(result.status, SensorStatus::Normal);
        assert_eq!(result.input_sensor_count, 3);
        assert_eq!(result.feature_breakdown.active_sensor_count, 0);
        assert_eq!(result.raw_mean_temperature, 25.0);
    }

    #[test]
    fn test_never_panics_on_arbitrary_input() {
        let service = service();
        let cases: [&[f64]; 6] = [
            &[],
            &[f64::NAN; 8],
            &[f64::INFINITY, f64::NEG_INFINITY],
            &[-273.15, 1000.0],
            &[25.0],
            &[24.9, 25.0, 25.1, 25.2, 24.8, 25.3, 24.7, 25.4, 24.6, 25.5],
        ];

        for readings in cases {
            let result = service.predict(readings);
            assert!((10.0..=100.0).contains(&result.confidence));
        }
    }

    #[test]
    fn test_predict_is_idempotent() {
        let service = service();
        let readings = [24.3, 26.1, 25.7, f64::NAN];

        let first = service.predict(&readings);
        let second = service.predict(&readings);

        assert_eq!(first, second);
    }

    #[test]
    fn test_soft_cap_does_not_reject_large_batches() {
        let service = service();
        let readings: Vec<f64> = (0..100).map(|i| 24.0 + (i % 10) as f64 * 0.1).collect();

        let result = service.predict(&readings);
        assert_eq!(result.input_sensor_count, 100);
        assert_eq!(result.feature_breakdown.active_sensor_count, 100);
    }

    #[test]
    fn test_shared_across_threads() {
        let service = Arc::new(service());
        let mut handles = Vec::new();

        for _ in 0..4 {
            let service = Arc::clone(&service);
            handles.push(std::thread::spawn(move || {
                service.predict(&[24.8, 25.1, 25.3])
            }));
        }

        let expected = service.predict(&[24.8, 25.1, 25.3]);
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
