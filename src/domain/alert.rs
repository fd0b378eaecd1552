// Threshold alert evaluation
use super::sensor::{MeasurementKind, SensorReading};
use super::thresholds::{ThresholdBounds, ThresholdConfig};
use serde::Serialize;

const STRAIN_HIGH_FACTOR: f64 = 1.2;
// Temperature severity is measured against a fixed reference, not the configured bounds.
const TEMPERATURE_REFERENCE: f64 = 25.0;
const TEMPERATURE_HIGH_DEVIATION: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub sensor: String,
    pub sensor_id: String,
    pub kind: MeasurementKind,
    pub value: f64,
    pub threshold: f64,
    pub severity: Severity,
    pub message: String,
}

fn alert_message(sensor: &str, kind: MeasurementKind, value: f64, threshold: f64) -> String {
    format!(
        "{} - {} value {:.2}{} exceeds threshold ({})",
        sensor,
        kind,
        value,
        kind.unit(),
        threshold
    )
}

/// Classify how far a breaching value lies beyond its bounds.
pub fn classify_severity(kind: MeasurementKind, value: f64, bounds: &ThresholdBounds) -> Severity {
    let high = match kind {
        MeasurementKind::Strain => value.abs() > bounds.max.abs() * STRAIN_HIGH_FACTOR,
        MeasurementKind::Temperature => {
            (value - TEMPERATURE_REFERENCE).abs() > TEMPERATURE_HIGH_DEVIATION
        }
    };

    if high { Severity::High } else { Severity::Medium }
}

fn check(reading: &SensorReading, kind: MeasurementKind, bounds: &ThresholdBounds) -> Option<Alert> {
    let value = reading.value(kind);
    if !bounds.is_exceeded(value) {
        return None;
    }

    let threshold = if value > bounds.max { bounds.max } else { bounds.min };

    Some(Alert {
        sensor: reading.name.clone(),
        sensor_id: reading.id.clone(),
        kind,
        value,
        threshold,
        severity: classify_severity(kind, value, bounds),
        message: alert_message(&reading.name, kind, value, threshold),
    })
}

/// One alert per (reading, kind) breach; readings in input order, strain before temperature.
pub fn evaluate_thresholds(readings: &[SensorReading], thresholds: &ThresholdConfig) -> Vec<Alert> {
    readings
        .iter()
        .flat_map(|reading| {
            MeasurementKind::ALL
                .into_iter()
                .filter_map(move |kind| check(reading, kind, thresholds.bounds(kind)))
        })
        .collect()
}
