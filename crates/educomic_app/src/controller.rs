use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use educomic_core::{
    update, AppState, ComicForm, Effect, MissingReferencePolicy, Msg, PipelineState,
};
use educomic_engine::{ArtifactStore, ServiceSettings, StageError};

use crate::effects::EffectRunner;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Outcome of driving one generation run to its terminal state.
#[derive(Debug)]
pub enum RunOutcome {
    /// The request never started a run; the reason is already in the log.
    Rejected,
    /// The strip was produced and exported to the given path.
    Exported(PathBuf),
    /// The pipeline failed; the message is the final log line.
    Failed(String),
}

/// Single-threaded drive loop around the pure reducer.
///
/// Messages go through `update`, effects go to the engine, and every new
/// log entry is printed once with the `"> "` display prefix. The prefix is
/// presentation only; the stored entries carry the bare message.
pub struct Controller {
    state: AppState,
    runner: EffectRunner,
    store: ArtifactStore,
    theme: Option<String>,
    printed: u64,
}

impl Controller {
    pub fn new(
        settings: ServiceSettings,
        policy: MissingReferencePolicy,
        out_dir: PathBuf,
    ) -> Result<Self, StageError> {
        Ok(Self {
            state: AppState::with_policy(policy),
            runner: EffectRunner::new(settings)?,
            store: ArtifactStore::new(out_dir),
            theme: None,
            printed: 0,
        })
    }

    /// Dispatches the generate action and polls the engine until the run
    /// reaches a terminal state.
    pub fn run_to_completion(&mut self, form: ComicForm) -> RunOutcome {
        self.dispatch(Msg::GenerateClicked { form });
        if !self.state.is_running() {
            return RunOutcome::Rejected;
        }

        loop {
            let mut saw_message = false;
            while let Some(msg) = self.runner.try_recv() {
                saw_message = true;
                self.dispatch(msg);
            }
            match self.state.pipeline() {
                PipelineState::Succeeded(artifact) => {
                    return match self.store.materialize(
                        self.theme.as_deref(),
                        &artifact.bytes,
                        &artifact.content_type,
                    ) {
                        Ok(handle) => RunOutcome::Exported(handle.keep()),
                        Err(err) => {
                            RunOutcome::Failed(format!("could not write the strip: {err}"))
                        }
                    };
                }
                PipelineState::Failed(notice) => return RunOutcome::Failed(notice.message.clone()),
                PipelineState::Idle | PipelineState::Running { .. } => {}
            }
            if !saw_message {
                thread::sleep(POLL_INTERVAL);
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if let Some(Effect::RunPipeline { request, .. }) = effects.first() {
            // A fresh run cleared the log; start printing from the top and
            // remember the theme for the export filename.
            self.printed = 0;
            self.theme = request.topic.clone();
        }
        let dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        if dirty {
            self.print_new_lines();
        }
    }

    fn print_new_lines(&mut self) {
        for entry in self.state.log().entries() {
            if entry.sequence > self.printed {
                println!("> {}", entry.message);
                self.printed = entry.sequence;
            }
        }
    }
}
