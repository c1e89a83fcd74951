use crate::request::WorkflowRequest;
use crate::state::RunId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand the assembled request to the engine for execution.
    RunPipeline {
        run_id: RunId,
        request: WorkflowRequest,
    },
}
