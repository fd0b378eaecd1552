// Domain layer - Pure types and the threshold/statistics/filter pipeline
pub mod alert;
pub mod dashboard;
pub mod sensor;
pub mod statistics;
pub mod structure;
pub mod thresholds;
pub mod time_series;
pub mod upload;
