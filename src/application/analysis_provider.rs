// Analysis provider port - turns an uploaded data file into readings and a series
use crate::domain::sensor::SensorReading;
use crate::domain::structure::{Location, StructureType};
use crate::domain::time_series::TimeSeriesPoint;
use crate::domain::upload::UploadedFile;
use async_trait::async_trait;

/// Everything an analysis run needs from the operator's session.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub file: UploadedFile,
    pub structure: StructureType,
    pub location: Location,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisOutput {
    pub sensors: Vec<SensorReading>,
    pub time_series: Vec<TimeSeriesPoint>,
}

#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Run one analysis pass. The result replaces any previous output wholesale.
    async fn run(&self, request: &AnalysisRequest) -> anyhow::Result<AnalysisOutput>;
}
