use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub capture: CaptureConfig,
    pub clips: ClipsConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CaptureConfig {
    /// Per-speaker retention window in milliseconds
    pub retention_ms: u64,
    /// Idle teardown timeout in milliseconds
    pub idle_timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct ClipsConfig {
    pub output_path: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
