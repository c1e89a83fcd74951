use crate::logbook::LogBook;
use crate::request::MissingReferencePolicy;
use crate::view_model::{AppViewModel, ArtifactView, LogLineView, PhaseView};

/// Identifier of one accepted pipeline invocation. Tags every engine event
/// so a stale event from a superseded run can never touch current state.
pub type RunId = u64;

/// The final binary image received from the rendering collaborator, owned
/// exclusively by the state machine once received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineArtifact {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Classification of a terminal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    ExtractionFailed,
    GenerationFailed,
    Transport,
}

/// The failing stage's error kind plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    pub kind: FailureKind,
    pub message: String,
}

/// Observable pipeline state. Exactly one instance exists per controller;
/// terminal states are replaced only by a fresh `Running` transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Running {
        run_id: RunId,
    },
    Succeeded(PipelineArtifact),
    Failed(FailureNotice),
}

/// Controller-owned state: the pipeline state machine and its log book.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pipeline: PipelineState,
    log: LogBook,
    policy: MissingReferencePolicy,
    next_run_id: RunId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MissingReferencePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn pipeline(&self) -> &PipelineState {
        &self.pipeline
    }

    pub fn log(&self) -> &LogBook {
        &self.log
    }

    pub fn is_running(&self) -> bool {
        matches!(self.pipeline, PipelineState::Running { .. })
    }

    /// The run id of the in-flight invocation, if any.
    pub fn current_run(&self) -> Option<RunId> {
        match self.pipeline {
            PipelineState::Running { run_id } => Some(run_id),
            _ => None,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let (phase, artifact, failure) = match &self.pipeline {
            PipelineState::Idle => (PhaseView::Idle, None, None),
            PipelineState::Running { .. } => (PhaseView::Running, None, None),
            PipelineState::Succeeded(artifact) => (
                PhaseView::Succeeded,
                Some(ArtifactView {
                    content_type: artifact.content_type.clone(),
                    byte_len: artifact.bytes.len() as u64,
                }),
                None,
            ),
            PipelineState::Failed(notice) => (PhaseView::Failed, None, Some(notice.clone())),
        };
        AppViewModel {
            phase,
            log: self
                .log
                .entries()
                .map(|entry| LogLineView {
                    sequence: entry.sequence,
                    message: entry.message.clone(),
                })
                .collect(),
            artifact,
            failure,
        }
    }

    /// Returns whether a re-render is due, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn policy(&self) -> MissingReferencePolicy {
        self.policy
    }

    pub(crate) fn append_log(&mut self, message: impl Into<String>) {
        self.log.append(message);
        self.dirty = true;
    }

    /// Starts a fresh invocation: clears the log, discards any previous
    /// terminal state (and artifact), and enters `Running`.
    pub(crate) fn begin_run(&mut self) -> RunId {
        self.next_run_id += 1;
        let run_id = self.next_run_id;
        self.log.reset();
        self.pipeline = PipelineState::Running { run_id };
        self.dirty = true;
        run_id
    }

    pub(crate) fn complete_run(&mut self, artifact: PipelineArtifact) {
        self.pipeline = PipelineState::Succeeded(artifact);
        self.dirty = true;
    }

    pub(crate) fn fail_run(&mut self, notice: FailureNotice) {
        self.pipeline = PipelineState::Failed(notice);
        self.dirty = true;
    }
}
