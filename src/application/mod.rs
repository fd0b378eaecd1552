// Application layer - Use cases and the ports they depend on
pub mod analysis_provider;
pub mod dashboard_service;
pub mod notifier;
pub mod threshold_store;
