use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart;

use crate::config::{build_client, ServiceSettings};
use crate::types::{
    emit_log, map_transport, ComicArtifact, FailureKind, PipelineRequest, ProgressSink, RunId,
    Stage, StageError, FALLBACK_CONTENT_TYPE,
};

/// Artifact generation stage: turns a theme and context into the final strip.
#[async_trait::async_trait]
pub trait ComicRenderer: Send + Sync {
    /// Runs the generation call for `request`, emitting progress on `sink`.
    async fn render(
        &self,
        run_id: RunId,
        request: &PipelineRequest,
        context: &str,
        sink: &dyn ProgressSink,
    ) -> Result<ComicArtifact, StageError>;
}

/// `ComicRenderer` backed by the generation collaborator's HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpComicRenderer {
    client: reqwest::Client,
    settings: ServiceSettings,
}

impl HttpComicRenderer {
    /// Builds the stage with its own connection pool.
    pub fn new(settings: ServiceSettings) -> Result<Self, StageError> {
        let client = build_client(&settings, Stage::Rendering)?;
        Ok(Self { client, settings })
    }
}

#[async_trait::async_trait]
impl ComicRenderer for HttpComicRenderer {
    async fn render(
        &self,
        run_id: RunId,
        request: &PipelineRequest,
        context: &str,
        sink: &dyn ProgressSink,
    ) -> Result<ComicArtifact, StageError> {
        emit_log(sink, run_id, "Engaging Storyteller Agent...");
        emit_log(
            sink,
            run_id,
            format!("Generating {} unique panels...", request.page_count),
        );

        let form = multipart::Form::new()
            .text("theme", request.render_theme().to_string())
            .text("context", context.to_string())
            .text("audience_tier", request.audience_tier.as_str())
            .text("page_count", request.page_count.to_string());

        let response = self
            .client
            .post(self.settings.endpoint("generate-comic"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| map_transport(Stage::Rendering, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StageError::new(
                FailureKind::GenerationFailed {
                    status: status.as_u16(),
                },
                "Image generation failed.",
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
        if !is_image(&content_type) {
            return Err(StageError::new(
                FailureKind::GenerationFailed {
                    status: status.as_u16(),
                },
                format!("Image generation failed. Unexpected content type {content_type}."),
            ));
        }

        // Headers are in, the panels exist. The remainder is assembly.
        emit_log(sink, run_id, "Stitching final strip...");

        let mut bytes: Vec<u8> = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| map_transport(Stage::Rendering, err))?;
            let received = bytes.len() as u64 + chunk.len() as u64;
            if received > self.settings.max_artifact_bytes {
                return Err(StageError::new(
                    FailureKind::Transport {
                        stage: Stage::Rendering,
                    },
                    format!(
                        "artifact exceeds the {} byte limit",
                        self.settings.max_artifact_bytes
                    ),
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(ComicArtifact {
            bytes,
            content_type,
        })
    }
}

fn is_image(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase();
    essence.starts_with("image/")
}
