use std::fmt;

/// Identifier for one pipeline invocation, assigned by the caller.
///
/// Every event carries the id of the run that produced it so that the
/// caller can discard events from a superseded run.
pub type RunId = u64;

/// Theme sent to the extraction collaborator when no topic was given.
pub const DEFAULT_ANALYSIS_THEME: &str = "Educational Video";

/// Theme sent to the rendering collaborator when no topic was given.
pub const DEFAULT_RENDER_THEME: &str = "The Video Topic";

/// Context used when the extraction stage does not run.
pub const DEFAULT_CONTEXT: &str = "General explanation";

/// Assumed artifact media type when the collaborator omits the header.
pub const FALLBACK_CONTENT_TYPE: &str = "image/png";

/// Which input drives the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Generate directly from the topic, skipping extraction.
    Topic,
    /// Extract the context from a video reference first.
    VideoReference,
}

/// Reading-level bracket of the intended audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudienceTier {
    /// Ages 2-5.
    Toddler,
    /// Ages 6-10.
    Kid,
    /// Ages 11+.
    Teen,
}

impl AudienceTier {
    /// Wire value for the `audience_tier` field of both collaborators.
    pub fn as_str(self) -> &'static str {
        match self {
            AudienceTier::Toddler => "Toddler",
            AudienceTier::Kid => "Kid",
            AudienceTier::Teen => "Teen",
        }
    }
}

/// Validated work order handed over by the caller.
///
/// Invariant: at least one of `topic` and `source_reference` is present,
/// and in `VideoReference` mode the reference is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    /// Which stage sequence to run.
    pub mode: RequestMode,
    /// Subject of the strip, if the user supplied one.
    pub topic: Option<String>,
    /// Video reference to extract from, if the user supplied one.
    pub source_reference: Option<String>,
    /// Audience bracket forwarded verbatim to both collaborators.
    pub audience_tier: AudienceTier,
    /// Number of panels to render.
    pub page_count: u8,
}

impl PipelineRequest {
    pub(crate) fn analysis_theme(&self) -> &str {
        self.topic.as_deref().unwrap_or(DEFAULT_ANALYSIS_THEME)
    }

    pub(crate) fn render_theme(&self) -> &str {
        self.topic.as_deref().unwrap_or(DEFAULT_RENDER_THEME)
    }
}

/// Finished strip as returned by the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicArtifact {
    /// Raw image payload.
    pub bytes: Vec<u8>,
    /// Media type reported by the collaborator.
    pub content_type: String,
}

/// Pipeline stage names, used to attribute transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The content extraction call.
    Analysis,
    /// The artifact generation call.
    Rendering,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Analysis => write!(f, "analysis"),
            Stage::Rendering => write!(f, "rendering"),
        }
    }
}

/// Why a stage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Extraction collaborator answered with a non-success status.
    ExtractionFailed {
        /// HTTP status code of the rejection.
        status: u16,
    },
    /// Rendering collaborator answered non-success or with an unusable body.
    GenerationFailed {
        /// HTTP status code of the offending response.
        status: u16,
    },
    /// The request never produced a usable response.
    Transport {
        /// Stage whose call failed.
        stage: Stage,
    },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::ExtractionFailed { status } => {
                write!(f, "extraction failed (http status {status})")
            }
            FailureKind::GenerationFailed { status } => {
                write!(f, "generation failed (http status {status})")
            }
            FailureKind::Transport { stage } => write!(f, "transport error during {stage}"),
        }
    }
}

/// Failure report for a run, with a user-presentable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageError {
    /// Machine-readable classification.
    pub kind: FailureKind,
    /// Message suitable for the run log.
    pub message: String,
}

impl StageError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub(crate) fn map_transport(stage: Stage, err: reqwest::Error) -> StageError {
    StageError::new(FailureKind::Transport { stage }, err.to_string())
}

/// Events emitted while a run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// A progress line for the run log.
    Log {
        /// Run that produced the line.
        run_id: RunId,
        /// Human-readable progress text.
        message: String,
    },
    /// Terminal outcome of a run. Exactly one is emitted per run.
    Completed {
        /// Run that finished.
        run_id: RunId,
        /// The artifact, or the failure that aborted the run.
        result: Result<ComicArtifact, StageError>,
    },
}

/// Receiver for pipeline events.
pub trait ProgressSink: Send + Sync {
    /// Delivers one event. Must not block.
    fn emit(&self, event: PipelineEvent);
}

/// Sink that forwards events into an `mpsc` channel.
pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<PipelineEvent>,
}

impl ChannelProgressSink {
    /// Wraps the sending half of an event channel.
    pub fn new(tx: std::sync::mpsc::Sender<PipelineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: PipelineEvent) {
        // Receiver gone means the caller shut down. Nothing to do.
        let _ = self.tx.send(event);
    }
}

pub(crate) fn emit_log(sink: &dyn ProgressSink, run_id: RunId, message: impl Into<String>) {
    sink.emit(PipelineEvent::Log {
        run_id,
        message: message.into(),
    });
}
