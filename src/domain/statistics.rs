// Summary statistics over a sensor reading set
use super::sensor::{MeasurementKind, SensorReading};
use serde::{Serialize, Serializer};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StatisticsError {
    #[error("cannot summarize {0} over an empty sensor set")]
    EmptyInput(MeasurementKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub max: f64,
    pub min: f64,
    /// Exact mean; serialized rounded to one decimal for display.
    #[serde(serialize_with = "serialize_one_decimal")]
    pub avg: f64,
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn serialize_one_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_one_decimal(*value))
}

pub fn summarize(
    readings: &[SensorReading],
    kind: MeasurementKind,
) -> Result<SummaryStats, StatisticsError> {
    if readings.is_empty() {
        return Err(StatisticsError::EmptyInput(kind));
    }

    let values = readings.iter().map(|r| r.value(kind));
    let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let avg = values.sum::<f64>() / readings.len() as f64;

    Ok(SummaryStats { max, min, avg })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings() -> Vec<SensorReading> {
        vec![
            SensorReading::new("S001", "Strain Sensor 1", 85.0, 22.5, "North Tower"),
            SensorReading::new("S002", "Strain Sensor 2", -45.0, 21.8, "South Tower"),
            SensorReading::new("S003", "Temperature Sensor 1", 12.0, 45.2, "Bridge Deck"),
            SensorReading::new("S004", "Strain Sensor 3", 110.0, 23.1, "Central Span"),
            SensorReading::new("S005", "Combined Sensor 1", -78.0, 19.5, "Support Pier"),
        ]
    }

    #[test]
    fn test_strain_summary() {
        let stats = summarize(&readings(), MeasurementKind::Strain).unwrap();
        assert_eq!(stats.max, 110.0);
        assert_eq!(stats.min, -78.0);
        assert!((stats.avg - 16.8).abs() < 1e-9);
        assert_eq!(round_one_decimal(stats.avg), 16.8);
    }

    #[test]
    fn test_temperature_summary() {
        let stats = summarize(&readings(), MeasurementKind::Temperature).unwrap();
        assert_eq!(stats.max, 45.2);
        assert_eq!(stats.min, 19.5);
        assert_eq!(round_one_decimal(stats.avg), 26.4);
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(
            summarize(&[], MeasurementKind::Strain),
            Err(StatisticsError::EmptyInput(MeasurementKind::Strain))
        );
    }

    #[test]
    fn test_order_independent_and_bounded() {
        let forward = readings();
        let mut reversed = readings();
        reversed.reverse();

        for kind in MeasurementKind::ALL {
            let a = summarize(&forward, kind).unwrap();
            let b = summarize(&reversed, kind).unwrap();
            assert_eq!(a.max, b.max);
            assert_eq!(a.min, b.min);
            assert!((a.avg - b.avg).abs() < 1e-9);
            assert!(a.min <= a.avg && a.avg <= a.max);
        }
    }

    #[test]
    fn test_avg_serialized_rounded() {
        let stats = SummaryStats {
            max: 2.0,
            min: 1.0,
            avg: 1.26,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["avg"], 1.3);
    }
}
