// Simulated analysis backend
use crate::application::analysis_provider::{AnalysisOutput, AnalysisProvider, AnalysisRequest};
use crate::domain::sensor::SensorReading;
use crate::domain::time_series::TimeSeriesPoint;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;

/// Waits a fixed delay and returns a canned payload. The uploaded file is
/// never read.
#[derive(Debug, Clone)]
pub struct MockAnalysisProvider {
    delay: std::time::Duration,
    series_points: usize,
}

impl MockAnalysisProvider {
    pub fn new(delay_ms: u64, series_points: usize) -> Self {
        Self {
            delay: std::time::Duration::from_millis(delay_ms),
            series_points,
        }
    }

    fn mock_sensors() -> Vec<SensorReading> {
        vec![
            SensorReading::new("S001", "Strain Sensor 1", 85.0, 22.5, "North Tower"),
            SensorReading::new("S002", "Strain Sensor 2", -45.0, 21.8, "South Tower"),
            SensorReading::new("S003", "Temperature Sensor 1", 12.0, 45.2, "Bridge Deck"),
            SensorReading::new("S004", "Strain Sensor 3", 110.0, 23.1, "Central Span"),
            SensorReading::new("S005", "Combined Sensor 1", -78.0, 19.5, "Support Pier"),
        ]
    }

    /// One-minute samples ending at `now`: smooth base curves plus uniform noise.
    fn generate_series(&self, now: DateTime<Utc>) -> Vec<TimeSeriesPoint> {
        let mut rng = rand::thread_rng();
        let mut noise = |amplitude: f64| rng.gen_range(-0.5f64..0.5) * amplitude;
        let n = self.series_points;

        (0..n)
            .map(|i| {
                let x = i as f64;
                let time = now - Duration::minutes((n - i) as i64);
                TimeSeriesPoint {
                    time: time.to_rfc3339_opts(SecondsFormat::Millis, true),
                    strain1: 50.0 + (x * 0.1).sin() * 30.0 + noise(10.0),
                    strain2: -20.0 + (x * 0.15).cos() * 25.0 + noise(8.0),
                    strain3: 80.0 + (x * 0.08).sin() * 40.0 + noise(12.0),
                    temp1: 20.0 + (x * 0.05).sin() * 5.0 + noise(2.0),
                    temp2: 25.0 + (x * 0.07).cos() * 8.0 + noise(3.0),
                    temp3: 22.0 + (x * 0.12).sin() * 6.0 + noise(2.5),
                }
            })
            .collect()
    }
}

#[async_trait]
impl AnalysisProvider for MockAnalysisProvider {
    async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisOutput> {
        tracing::debug!(
            "Simulating analysis of {} ({} bytes) for {:?}",
            request.file.name,
            request.file.size,
            request.structure
        );

        tokio::time::sleep(self.delay).await;

        Ok(AnalysisOutput {
            sensors: Self::mock_sensors(),
            time_series: self.generate_series(Utc::now()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::structure::{Location, StructureType};
    use crate::domain::time_series::parse_timestamp;
    use crate::domain::upload::UploadedFile;

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            file: UploadedFile {
                name: "bridge.csv".to_string(),
                size: 1024,
            },
            structure: StructureType::Bridge,
            location: Location::from_coordinates("40.7128", "-74.006", None).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_returns_fixed_sensors() {
        let provider = MockAnalysisProvider::new(0, 100);
        let output = provider.run(&request()).await.unwrap();

        let ids: Vec<&str> = output.sensors.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S001", "S002", "S003", "S004", "S005"]);
        assert_eq!(output.time_series.len(), 100);
    }

    #[test]
    fn test_series_is_chronological_and_parseable() {
        let provider = MockAnalysisProvider::new(0, 10);
        let now = Utc::now();
        let series = provider.generate_series(now);

        let instants: Vec<_> = series
            .iter()
            .map(|p| parse_timestamp(&p.time).unwrap())
            .collect();
        assert!(instants.windows(2).all(|w| w[0] < w[1]));
        assert!(*instants.last().unwrap() < now);

        for point in &series {
            assert!((point.strain1 - 50.0).abs() <= 35.0);
            assert!((point.temp1 - 20.0).abs() <= 6.0);
        }
    }
}
