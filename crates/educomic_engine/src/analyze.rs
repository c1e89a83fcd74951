use serde::{Deserialize, Serialize};

use crate::config::{build_client, ServiceSettings};
use crate::types::{
    emit_log, map_transport, FailureKind, PipelineRequest, ProgressSink, RunId, Stage, StageError,
};

/// JSON body of `POST /process-content`.
#[derive(Debug, Serialize)]
struct AnalysisRequestBody<'a> {
    theme: &'a str,
    video_reference: &'a str,
    audience_tier: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnalysisResponseBody {
    context: String,
}

/// Content extraction stage: turns a video reference into a context string.
#[async_trait::async_trait]
pub trait ContentAnalyzer: Send + Sync {
    /// Runs the extraction call for `request`, emitting progress on `sink`.
    async fn analyze(
        &self,
        run_id: RunId,
        request: &PipelineRequest,
        sink: &dyn ProgressSink,
    ) -> Result<String, StageError>;
}

/// `ContentAnalyzer` backed by the extraction collaborator's HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpContentAnalyzer {
    client: reqwest::Client,
    settings: ServiceSettings,
}

impl HttpContentAnalyzer {
    /// Builds the stage with its own connection pool.
    pub fn new(settings: ServiceSettings) -> Result<Self, StageError> {
        let client = build_client(&settings, Stage::Analysis)?;
        Ok(Self { client, settings })
    }
}

#[async_trait::async_trait]
impl ContentAnalyzer for HttpContentAnalyzer {
    async fn analyze(
        &self,
        run_id: RunId,
        request: &PipelineRequest,
        sink: &dyn ProgressSink,
    ) -> Result<String, StageError> {
        let reference = request.source_reference.as_deref().unwrap_or_default();
        emit_log(sink, run_id, "Connecting to video stream...");
        emit_log(sink, run_id, format!("Target: {reference}"));

        let body = AnalysisRequestBody {
            theme: request.analysis_theme(),
            video_reference: reference,
            audience_tier: request.audience_tier.as_str(),
        };
        let response = self
            .client
            .post(self.settings.endpoint("process-content"))
            .json(&body)
            .send()
            .await
            .map_err(|err| map_transport(Stage::Analysis, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StageError::new(
                FailureKind::ExtractionFailed {
                    status: status.as_u16(),
                },
                "Content analysis failed.",
            ));
        }

        let parsed: AnalysisResponseBody = response
            .json()
            .await
            .map_err(|err| map_transport(Stage::Analysis, err))?;

        emit_log(sink, run_id, "Audio analysis complete. Concept extracted.");
        Ok(parsed.context)
    }
}
