// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::broadcast_notifier::BroadcastNotifier;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub notifier: BroadcastNotifier,
}
