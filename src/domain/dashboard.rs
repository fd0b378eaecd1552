// Dashboard domain model
use super::alert::{evaluate_thresholds, Alert};
use super::sensor::{AnalysisScope, MeasurementKind, SensorReading};
use super::statistics::{summarize, StatisticsError, SummaryStats};
use super::thresholds::ThresholdConfig;
use super::time_series::{filter_by_date_range, DateRange, TimeSeriesPoint};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SensorStatus {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strain: Option<ChannelStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<ChannelStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelStatus {
    pub value: f64,
    pub exceeded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct KindStatistics {
    pub kind: MeasurementKind,
    pub unit: &'static str,
    #[serde(flatten)]
    pub stats: SummaryStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub scope: AnalysisScope,
    pub alert_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_banner: Option<String>,
    pub alerts: Vec<Alert>,
    pub statistics: Vec<KindStatistics>,
    pub sensors: Vec<SensorStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    pub time_series: Vec<TimeSeriesPoint>,
    pub dropped_points: usize,
}

impl DashboardView {
    /// Run the whole pipeline over one analysis result.
    pub fn build(
        sensors: &[SensorReading],
        series: &[TimeSeriesPoint],
        thresholds: &ThresholdConfig,
        range: Option<&DateRange>,
        scope: AnalysisScope,
    ) -> Result<Self, StatisticsError> {
        let alerts = evaluate_thresholds(sensors, thresholds);

        let statistics = scope
            .kinds()
            .into_iter()
            .map(|kind| {
                summarize(sensors, kind).map(|stats| KindStatistics {
                    kind,
                    unit: kind.unit(),
                    stats,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sensor_status = sensors
            .iter()
            .map(|reading| {
                let channel = |kind: MeasurementKind| {
                    scope.includes(kind).then(|| ChannelStatus {
                        value: reading.value(kind),
                        exceeded: thresholds.bounds(kind).is_exceeded(reading.value(kind)),
                    })
                };
                SensorStatus {
                    id: reading.id.clone(),
                    name: reading.name.clone(),
                    location: reading.location.clone(),
                    strain: channel(MeasurementKind::Strain),
                    temperature: channel(MeasurementKind::Temperature),
                }
            })
            .collect();

        let filtered = filter_by_date_range(series, range);

        Ok(Self {
            scope,
            alert_count: alerts.len(),
            alert_banner: alert_banner(alerts.len()),
            alerts,
            statistics,
            sensors: sensor_status,
            date_range: range.copied(),
            time_series: filtered.points,
            dropped_points: filtered.dropped,
        })
    }
}

pub fn alert_banner(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 Active Alert".to_string()),
        n => Some(format!("{} Active Alerts", n)),
    }
}
