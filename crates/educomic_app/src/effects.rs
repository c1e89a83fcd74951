use educomic_core::{Effect, FailureKind, FailureNotice, Msg, PipelineArtifact, SourceMode};
use educomic_engine::{
    EngineHandle, PipelineEvent, PipelineRequest, RequestMode, ServiceSettings, StageError,
};
use engine_logging::engine_info;

/// Executes reducer effects against the engine and maps engine events
/// back into reducer messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ServiceSettings) -> Result<Self, StageError> {
        Ok(Self {
            engine: EngineHandle::new(settings)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RunPipeline { run_id, request } => {
                    engine_info!("RunPipeline run_id={} mode={:?}", run_id, request.mode);
                    self.engine.run(run_id, map_request(request));
                }
            }
        }
    }

    /// Next engine event as a reducer message, if one is pending.
    pub fn try_recv(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }
}

fn map_request(request: educomic_core::WorkflowRequest) -> PipelineRequest {
    PipelineRequest {
        mode: match request.mode {
            SourceMode::Topic => RequestMode::Topic,
            SourceMode::VideoReference => RequestMode::VideoReference,
        },
        topic: request.topic,
        source_reference: request.source_reference,
        audience_tier: map_tier(request.audience_tier),
        page_count: request.page_count,
    }
}

fn map_tier(tier: educomic_core::AudienceTier) -> educomic_engine::AudienceTier {
    match tier {
        educomic_core::AudienceTier::Toddler => educomic_engine::AudienceTier::Toddler,
        educomic_core::AudienceTier::Kid => educomic_engine::AudienceTier::Kid,
        educomic_core::AudienceTier::Teen => educomic_engine::AudienceTier::Teen,
    }
}

fn map_event(event: PipelineEvent) -> Msg {
    match event {
        PipelineEvent::Log { run_id, message } => Msg::PipelineLog { run_id, message },
        PipelineEvent::Completed { run_id, result } => Msg::PipelineFinished {
            run_id,
            result: result.map(map_artifact).map_err(map_failure),
        },
    }
}

fn map_artifact(artifact: educomic_engine::ComicArtifact) -> PipelineArtifact {
    PipelineArtifact {
        bytes: artifact.bytes,
        content_type: artifact.content_type,
    }
}

fn map_failure(err: StageError) -> FailureNotice {
    FailureNotice {
        kind: match err.kind {
            educomic_engine::FailureKind::ExtractionFailed { .. } => FailureKind::ExtractionFailed,
            educomic_engine::FailureKind::GenerationFailed { .. } => FailureKind::GenerationFailed,
            educomic_engine::FailureKind::Transport { .. } => FailureKind::Transport,
        },
        message: err.message,
    }
}
