// Threshold configuration store
use crate::domain::sensor::MeasurementKind;
use crate::domain::thresholds::{Bound, ThresholdConfig, ThresholdStatus};

/// Holds the current thresholds. Validation is advisory: nothing here refuses
/// to store an inverted range.
#[derive(Debug, Clone, Default)]
pub struct ThresholdStore {
    config: ThresholdConfig,
}

impl ThresholdStore {
    pub fn get(&self) -> ThresholdConfig {
        self.config
    }

    /// Parse `value` and update one bound. Returns whether the update was applied;
    /// unparseable input leaves the store untouched.
    pub fn set(&mut self, kind: MeasurementKind, bound: Bound, value: &str) -> bool {
        match value.trim().parse::<f64>() {
            Ok(parsed) if !parsed.is_nan() => {
                self.config.bounds_mut(kind).set(bound, parsed);
                true
            }
            _ => {
                tracing::debug!("Ignoring non-numeric {} {:?} input: {:?}", kind, bound, value);
                false
            }
        }
    }

    pub fn replace(&mut self, config: ThresholdConfig) {
        self.config = config;
    }

    pub fn reset(&mut self) {
        self.config = ThresholdConfig::default();
    }

    pub fn validate(&self, kind: MeasurementKind) -> ThresholdStatus {
        self.config.bounds(kind).status()
    }
}
