//! EduComic core: pure pipeline state machine and view-model helpers.
mod effect;
mod logbook;
mod msg;
mod request;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use logbook::{LogBook, LogEntry};
pub use msg::Msg;
pub use request::{
    assemble, AssembleError, AudienceTier, ComicForm, MissingReferencePolicy, SourceMode,
    WorkflowRequest, MAX_PAGE_COUNT, MIN_PAGE_COUNT,
};
pub use state::{AppState, FailureKind, FailureNotice, PipelineArtifact, PipelineState, RunId};
pub use update::{update, COMPLETE_LOG_LINE, INIT_LOG_LINE};
pub use view_model::{AppViewModel, ArtifactView, LogLineView, PhaseView};
