//! EduComic engine: IO pipeline and effect execution.
mod analyze;
mod config;
mod engine;
mod filename;
mod materialize;
mod pipeline;
mod render;
mod types;

pub use analyze::{ContentAnalyzer, HttpContentAnalyzer};
pub use config::ServiceSettings;
pub use engine::EngineHandle;
pub use filename::export_filename;
pub use materialize::{ensure_artifact_dir, ArtifactStore, DisplayHandle, MaterializeError};
pub use pipeline::run_pipeline;
pub use render::{ComicRenderer, HttpComicRenderer};
pub use types::{
    AudienceTier, ChannelProgressSink, ComicArtifact, FailureKind, PipelineEvent, PipelineRequest,
    ProgressSink, RequestMode, RunId, Stage, StageError, DEFAULT_ANALYSIS_THEME, DEFAULT_CONTEXT,
    DEFAULT_RENDER_THEME, FALLBACK_CONTENT_TYPE,
};
