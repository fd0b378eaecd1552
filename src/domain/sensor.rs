// Sensor reading domain model
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which physical quantity a reading or threshold refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    Strain,
    Temperature,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 2] = [MeasurementKind::Strain, MeasurementKind::Temperature];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementKind::Strain => "strain",
            MeasurementKind::Temperature => "temperature",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MeasurementKind::Strain => "με",
            MeasurementKind::Temperature => "°C",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strain" => Ok(MeasurementKind::Strain),
            "temperature" => Ok(MeasurementKind::Temperature),
            other => Err(format!("unknown measurement kind: {}", other)),
        }
    }
}

/// Snapshot of one structural sensor, as produced by an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: String,
    pub name: String,
    pub strain: f64,
    pub temperature: f64,
    pub location: String,
}

impl SensorReading {
    pub fn new(id: &str, name: &str, strain: f64, temperature: f64, location: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            strain,
            temperature,
            location: location.to_string(),
        }
    }

    pub fn value(&self, kind: MeasurementKind) -> f64 {
        match kind {
            MeasurementKind::Strain => self.strain,
            MeasurementKind::Temperature => self.temperature,
        }
    }
}

/// Which measurement kinds the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisScope {
    #[default]
    Both,
    Strain,
    Temperature,
}

impl AnalysisScope {
    pub fn includes(&self, kind: MeasurementKind) -> bool {
        match self {
            AnalysisScope::Both => true,
            AnalysisScope::Strain => kind == MeasurementKind::Strain,
            AnalysisScope::Temperature => kind == MeasurementKind::Temperature,
        }
    }

    pub fn kinds(&self) -> Vec<MeasurementKind> {
        MeasurementKind::ALL
            .into_iter()
            .filter(|kind| self.includes(*kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_by_kind() {
        let reading = SensorReading::new("S001", "Strain Sensor 1", 85.0, 22.5, "North Tower");
        assert_eq!(reading.value(MeasurementKind::Strain), 85.0);
        assert_eq!(reading.value(MeasurementKind::Temperature), 22.5);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("strain".parse::<MeasurementKind>(), Ok(MeasurementKind::Strain));
        assert_eq!(
            "temperature".parse::<MeasurementKind>(),
            Ok(MeasurementKind::Temperature)
        );
        assert!("pressure".parse::<MeasurementKind>().is_err());
    }

    #[test]
    fn test_scope_kinds() {
        assert_eq!(AnalysisScope::Both.kinds().len(), 2);
        assert_eq!(AnalysisScope::Strain.kinds(), vec![MeasurementKind::Strain]);
        assert!(!AnalysisScope::Temperature.includes(MeasurementKind::Strain));
    }
}
