use crate::state::FailureNotice;

/// Pipeline phase as shown to the user, without artifact payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseView {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLineView {
    pub sequence: u64,
    pub message: String,
}

/// Artifact metadata for display; the payload itself stays in the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactView {
    pub content_type: String,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: PhaseView,
    pub log: Vec<LogLineView>,
    pub artifact: Option<ArtifactView>,
    pub failure: Option<FailureNotice>,
}
