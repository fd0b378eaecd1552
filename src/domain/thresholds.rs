// Threshold domain model
use super::sensor::MeasurementKind;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Acceptable `[min, max]` range for one measurement kind.
///
/// `min < max` is expected but not enforced; see [`ThresholdBounds::status`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBounds {
    pub min: f64,
    pub max: f64,
}

impl ThresholdBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Strictly outside `[min, max]`. NaN never counts as exceeded.
    pub fn is_exceeded(&self, value: f64) -> bool {
        value < self.min || value > self.max
    }

    pub fn set(&mut self, bound: Bound, value: f64) {
        match bound {
            Bound::Min => self.min = value,
            Bound::Max => self.max = value,
        }
    }

    pub fn status(&self) -> ThresholdStatus {
        if self.min < self.max {
            ThresholdStatus::Ok
        } else {
            ThresholdStatus::RangeInvalid
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    Min,
    Max,
}

impl FromStr for Bound {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(Bound::Min),
            "max" => Ok(Bound::Max),
            other => Err(format!("unknown bound: {}", other)),
        }
    }
}

/// Advisory validation result for one kind's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdStatus {
    Ok,
    RangeInvalid,
}

impl ThresholdStatus {
    pub fn message(&self) -> &'static str {
        match self {
            ThresholdStatus::Ok => "Valid range",
            ThresholdStatus::RangeInvalid => "Min value must be less than max value",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub strain: ThresholdBounds,
    pub temperature: ThresholdBounds,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            strain: ThresholdBounds::new(-100.0, 100.0),
            temperature: ThresholdBounds::new(-10.0, 50.0),
        }
    }
}

impl ThresholdConfig {
    pub fn bounds(&self, kind: MeasurementKind) -> &ThresholdBounds {
        match kind {
            MeasurementKind::Strain => &self.strain,
            MeasurementKind::Temperature => &self.temperature,
        }
    }

    pub fn bounds_mut(&mut self, kind: MeasurementKind) -> &mut ThresholdBounds {
        match kind {
            MeasurementKind::Strain => &mut self.strain,
            MeasurementKind::Temperature => &mut self.temperature,
        }
    }
}
