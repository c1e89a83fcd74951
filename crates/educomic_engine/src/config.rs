use std::time::Duration;

use crate::types::{map_transport, Stage, StageError};

/// Connection settings for the two collaborator services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Base URL both collaborators are mounted under, without a trailing path.
    pub base_url: String,
    /// Limit on establishing a connection.
    pub connect_timeout: Duration,
    /// Limit on a whole request. Generation runs for minutes, so this is long.
    pub request_timeout: Duration,
    /// Upper bound on the artifact payload accepted from the renderer.
    pub max_artifact_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            max_artifact_bytes: 32 * 1024 * 1024,
        }
    }
}

impl ServiceSettings {
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

pub(crate) fn build_client(
    settings: &ServiceSettings,
    stage: Stage,
) -> Result<reqwest::Client, StageError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| map_transport(stage, err))
}
