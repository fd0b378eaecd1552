// Dashboard service - Use cases behind the operator's single dashboard session
use crate::application::analysis_provider::{AnalysisOutput, AnalysisProvider, AnalysisRequest};
use crate::application::notifier::{Notification, Notifier};
use crate::application::threshold_store::ThresholdStore;
use crate::domain::dashboard::DashboardView;
use crate::domain::sensor::{AnalysisScope, MeasurementKind};
use crate::domain::statistics::StatisticsError;
use crate::domain::structure::{Location, StructureType};
use crate::domain::thresholds::{Bound, ThresholdConfig, ThresholdStatus};
use crate::domain::time_series::DateRange;
use crate::domain::upload::{UploadError, UploadedFile};
use futures::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("missing requirements: {}", .0.join(", "))]
    MissingRequirements(Vec<&'static str>),

    #[error("an analysis is already running")]
    AnalysisInProgress,

    #[error("no analysis data available")]
    NoAnalysisData,

    #[error("invalid coordinates")]
    InvalidLocation,

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Statistics(#[from] StatisticsError),

    #[error("analysis failed: {0}")]
    Analysis(anyhow::Error),
}

#[derive(Debug, Default)]
struct Session {
    file: Option<UploadedFile>,
    structure: Option<StructureType>,
    location: Option<Location>,
    analysis: Option<AnalysisOutput>,
    date_range: Option<DateRange>,
    scope: AnalysisScope,
    analyzing: bool,
}

impl Session {
    fn missing_requirements(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.file.is_none() {
            missing.push("file");
        }
        if self.structure.is_none() {
            missing.push("structure");
        }
        if self.location.is_none() {
            missing.push("location");
        }
        missing
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub file: Option<UploadedFile>,
    pub structure: Option<StructureType>,
    pub location: Option<Location>,
    pub ready: bool,
    pub analyzing: bool,
    pub has_results: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct KindValidation {
    pub kind: MeasurementKind,
    pub status: ThresholdStatus,
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThresholdsView {
    pub thresholds: ThresholdConfig,
    pub validation: Vec<KindValidation>,
}

impl ThresholdsView {
    fn from_store(store: &ThresholdStore) -> Self {
        let validation = MeasurementKind::ALL
            .into_iter()
            .map(|kind| {
                let status = store.validate(kind);
                KindValidation {
                    kind,
                    status,
                    message: status.message(),
                }
            })
            .collect();

        Self {
            thresholds: store.get(),
            validation,
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    provider: Arc<dyn AnalysisProvider>,
    notifier: Arc<dyn Notifier>,
    session: Arc<RwLock<Session>>,
    thresholds: Arc<RwLock<ThresholdStore>>,
    max_upload_bytes: u64,
}

impl DashboardService {
    pub fn new(
        provider: Arc<dyn AnalysisProvider>,
        notifier: Arc<dyn Notifier>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            provider,
            notifier,
            session: Arc::new(RwLock::new(Session::default())),
            thresholds: Arc::new(RwLock::new(ThresholdStore::default())),
            max_upload_bytes,
        }
    }

    pub async fn status(&self) -> SessionStatus {
        let session = self.session.read().await;
        SessionStatus {
            file: session.file.clone(),
            structure: session.structure,
            location: session.location.clone(),
            ready: session.missing_requirements().is_empty(),
            analyzing: session.analyzing,
            has_results: session.analysis.is_some(),
        }
    }

    pub async fn upload_file(&self, name: &str, size: u64) -> Result<UploadedFile, DashboardError> {
        let file = match UploadedFile::validate(name, size, self.max_upload_bytes) {
            Ok(file) => file,
            Err(e) => {
                let title = match &e {
                    UploadError::InvalidFileType(name) => {
                        tracing::warn!("Rejected upload {}: unsupported file type", name);
                        "Invalid File Type"
                    }
                    UploadError::FileTooLarge { size, limit } => {
                        tracing::warn!("Rejected upload of {} bytes (limit {})", size, limit);
                        "File Too Large"
                    }
                };
                self.notifier.notify(Notification::error(title, e.to_string()));
                return Err(e.into());
            }
        };

        self.session.write().await.file = Some(file.clone());
        self.notifier.notify(Notification::info(
            "File Uploaded",
            format!("{} has been uploaded successfully.", file.name),
        ));
        Ok(file)
    }

    pub async fn remove_file(&self) {
        self.session.write().await.file = None;
    }

    pub async fn select_structure(&self, structure: StructureType) {
        self.session.write().await.structure = Some(structure);
    }

    pub async fn set_location(
        &self,
        lat: &str,
        lng: &str,
        address: Option<&str>,
    ) -> Result<Location, DashboardError> {
        let location =
            Location::from_coordinates(lat, lng, address).ok_or(DashboardError::InvalidLocation)?;

        self.session.write().await.location = Some(location.clone());
        self.notifier.notify(Notification::info(
            "Coordinates Set",
            format!("Location: {}", location.coordinates_label()),
        ));
        Ok(location)
    }

    /// Run the configured provider and replace the session's results. The run
    /// is detached so it completes even if the caller goes away.
    pub async fn run_analysis(&self) -> Result<(), DashboardError> {
        let request = {
            let mut session = self.session.write().await;

            let missing = session.missing_requirements();
            if !missing.is_empty() {
                self.notifier.notify(Notification::error(
                    "Missing Requirements",
                    "Please upload a file, select structure type, and choose location.",
                ));
                return Err(DashboardError::MissingRequirements(missing));
            }
            if session.analyzing {
                return Err(DashboardError::AnalysisInProgress);
            }

            let (Some(file), Some(structure), Some(location)) = (
                session.file.clone(),
                session.structure,
                session.location.clone(),
            ) else {
                return Err(DashboardError::MissingRequirements(
                    session.missing_requirements(),
                ));
            };

            session.analyzing = true;
            AnalysisRequest {
                file,
                structure,
                location,
            }
        };

        let service = self.clone();
        match tokio::spawn(async move { service.complete_analysis(request).await }).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Analysis task aborted: {}", e);
                self.session.write().await.analyzing = false;
                self.notifier.notify(Notification::error(
                    "Analysis Failed",
                    "The analysis task stopped unexpectedly.",
                ));
                Err(DashboardError::Analysis(anyhow::anyhow!(e)))
            }
        }
    }

    async fn complete_analysis(&self, request: AnalysisRequest) -> Result<(), DashboardError> {
        tracing::info!(
            "Running {} analysis for {} at {}",
            request.structure.name(),
            request.file.name,
            request.location.address
        );

        let result = match AssertUnwindSafe(self.provider.run(&request))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => Err(anyhow::anyhow!(
                "analysis provider panicked: {}",
                panic_message(panic.as_ref())
            )),
        };

        let mut session = self.session.write().await;
        session.analyzing = false;

        match result {
            Ok(output) => {
                tracing::info!(
                    "Analysis produced {} sensors and {} series points",
                    output.sensors.len(),
                    output.time_series.len()
                );
                session.analysis = Some(output);
                self.notifier.notify(Notification::info(
                    "Analysis Complete",
                    "Sensor data has been processed successfully.",
                ));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Analysis failed: {:#}", e);
                self.notifier
                    .notify(Notification::error("Analysis Failed", e.to_string()));
                Err(DashboardError::Analysis(e))
            }
        }
    }

    pub async fn dashboard(&self) -> Result<DashboardView, DashboardError> {
        let thresholds = self.thresholds.read().await.get();
        let session = self.session.read().await;
        let analysis = session
            .analysis
            .as_ref()
            .ok_or(DashboardError::NoAnalysisData)?;

        Ok(DashboardView::build(
            &analysis.sensors,
            &analysis.time_series,
            &thresholds,
            session.date_range.as_ref(),
            session.scope,
        )?)
    }

    pub async fn apply_date_range(&self, range: DateRange) -> Result<(), DashboardError> {
        let mut session = self.session.write().await;
        if session.analysis.is_none() {
            self.notifier.notify(Notification::error(
                "No Data Available",
                "Please run the initial analysis first before filtering by date.",
            ));
            return Err(DashboardError::NoAnalysisData);
        }

        session.date_range = Some(range);
        self.notifier.notify(Notification::info(
            "Analysis Updated",
            format!("Data filtered for selected date range: {}", range.label()),
        ));
        Ok(())
    }

    pub async fn clear_date_range(&self) {
        self.session.write().await.date_range = None;
    }

    pub async fn set_scope(&self, scope: AnalysisScope) {
        self.session.write().await.scope = scope;
    }

    pub async fn thresholds(&self) -> ThresholdsView {
        ThresholdsView::from_store(&*self.thresholds.read().await)
    }

    /// Edit one bound from raw text; non-numeric input is ignored.
    pub async fn set_threshold(&self, kind: MeasurementKind, bound: Bound, value: &str) -> ThresholdsView {
        let mut store = self.thresholds.write().await;
        store.set(kind, bound, value);
        ThresholdsView::from_store(&store)
    }

    pub async fn save_thresholds(&self, config: ThresholdConfig) -> ThresholdsView {
        let mut store = self.thresholds.write().await;
        store.replace(config);
        self.notifier.notify(Notification::info(
            "Thresholds Updated",
            "New threshold values have been saved successfully.",
        ));
        ThresholdsView::from_store(&store)
    }

    pub async fn reset_thresholds(&self) -> ThresholdsView {
        let mut store = self.thresholds.write().await;
        store.reset();
        self.notifier.notify(Notification::info(
            "Thresholds Reset",
            "Threshold values have been reset to defaults.",
        ));
        ThresholdsView::from_store(&store)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
