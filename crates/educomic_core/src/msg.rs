use crate::request::ComicForm;
use crate::state::{FailureNotice, PipelineArtifact, RunId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted the current form for generation.
    GenerateClicked { form: ComicForm },
    /// Engine progress line for a run.
    PipelineLog { run_id: RunId, message: String },
    /// Engine completion for a run.
    PipelineFinished {
        run_id: RunId,
        result: Result<PipelineArtifact, FailureNotice>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
