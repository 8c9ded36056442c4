//! Service configuration

use anyhow::Result;
use classifier_lib::config::{
    DEFAULT_CRITICAL_THRESHOLD, DEFAULT_MAX_SUPPORTED_SENSORS, DEFAULT_MAX_VALID_TEMPERATURE,
    DEFAULT_MIN_VALID_TEMPERATURE, DEFAULT_REFERENCE_TEMPERATURE, DEFAULT_WARNING_THRESHOLD,
};
use classifier_lib::ServiceConfiguration;
use serde::Deserialize;

/// Service configuration, loaded from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    /// Site the service classifies readings for, used to tag log events
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// API server port for prediction/health/metrics
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Baseline temperature deviations are measured against
    #[serde(default = "default_reference_temperature")]
    pub reference_temperature: f64,

    /// Deviation above which a batch is classified as warning
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold: f64,

    /// Deviation above which a batch is classified as critical
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: f64,

    /// Soft cap on sensors per request, metadata only
    #[serde(default = "default_max_supported_sensors")]
    pub max_supported_sensors: usize,

    /// Exclusive lower validity bound for a single reading
    #[serde(default = "default_min_valid_temperature")]
    pub min_valid_temperature: f64,

    /// Exclusive upper validity bound for a single reading
    #[serde(default = "default_max_valid_temperature")]
    pub max_valid_temperature: f64,
}

fn default_site_name() -> String {
    std::env::var("SITE_NAME").unwrap_or_else(|_| "unknown".to_string())
}

fn default_api_port() -> u16 {
    8080
}

fn default_reference_temperature() -> f64 {
    DEFAULT_REFERENCE_TEMPERATURE
}

fn default_warning_threshold() -> f64 {
    DEFAULT_WARNING_THRESHOLD
}

fn default_critical_threshold() -> f64 {
    DEFAULT_CRITICAL_THRESHOLD
}

fn default_max_supported_sensors() -> usize {
    DEFAULT_MAX_SUPPORTED_SENSORS
}

fn default_min_valid_temperature() -> f64 {
    DEFAULT_MIN_VALID_TEMPERATURE
}

fn default_max_valid_temperature() -> f64 {
    DEFAULT_MAX_VALID_TEMPERATURE
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            api_port: default_api_port(),
            reference_temperature: default_reference_temperature(),
            warning_threshold: default_warning_threshold(),
            critical_threshold: default_critical_threshold(),
            max_supported_sensors: default_max_supported_sensors(),
            min_valid_temperature: default_min_valid_temperature(),
            max_valid_temperature: default_max_valid_temperature(),
        }
    }
}

impl ServiceSettings {
    /// Load configuration from environment variables (ANOMALY_ prefix)
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("ANOMALY"))
            .build()?;

        Ok(settings.try_deserialize().unwrap_or_default())
    }

    /// Classifier configuration derived from these settings
    ///
    /// Validation happens in `AnomalyService::new`, so an inverted
    /// threshold pair aborts startup rather than serving requests.
    pub fn classifier_configuration(&self) -> ServiceConfiguration {
        ServiceConfiguration {
            reference_temperature: self.reference_temperature,
            warning_threshold: self.warning_threshold,
            critical_threshold: self.critical_threshold,
            max_supported_sensors: self.max_supported_sensors,
            min_valid_temperature: self.min_valid_temperature,
            max_valid_temperature: self.max_valid_temperature,
        }
    }
}
