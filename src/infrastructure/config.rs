use crate::domain::upload::DEFAULT_MAX_UPLOAD_BYTES;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub upload: UploadSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisSettings {
    /// Simulated processing time of the mock provider.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_series_points")]
    pub series_points: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            series_points: default_series_points(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationSettings {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_delay_ms() -> u64 {
    3000
}

fn default_series_points() -> usize {
    100
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_capacity() -> usize {
    64
}

/// Load `config/app.*` (optional) with `STRUCTMON__SECTION__KEY` environment overrides.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(config::Environment::with_prefix("STRUCTMON").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
