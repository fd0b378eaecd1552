// Infrastructure layer - External dependencies and adapters
pub mod broadcast_notifier;
pub mod config;
pub mod http_response;
pub mod mock_analysis;
pub mod notification_stream;
