use crate::request::assemble;
use crate::{AppState, Effect, Msg};

/// First line of every accepted invocation's log.
pub const INIT_LOG_LINE: &str = "Initializing EduComic Engine v2.1...";
/// Final line of a successful invocation's log.
pub const COMPLETE_LOG_LINE: &str = "Process Complete. Rendering output.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::GenerateClicked { form } => {
            // Re-entrancy guard: the generate action is a strict no-op
            // while a pipeline is in flight.
            if state.is_running() {
                return (state, Vec::new());
            }
            match assemble(&form, state.policy()) {
                Ok(request) => {
                    let run_id = state.begin_run();
                    state.append_log(INIT_LOG_LINE);
                    vec![Effect::RunPipeline { run_id, request }]
                }
                Err(err) => {
                    // No Idle -> Failed edge: a rejected request leaves the
                    // state untouched and surfaces as a log line only.
                    state.append_log(format!("ERROR: {err}"));
                    Vec::new()
                }
            }
        }
        Msg::PipelineLog { run_id, message } => {
            if state.current_run() == Some(run_id) {
                state.append_log(message);
            }
            Vec::new()
        }
        Msg::PipelineFinished { run_id, result } => {
            if state.current_run() == Some(run_id) {
                match result {
                    Ok(artifact) => {
                        state.append_log(COMPLETE_LOG_LINE);
                        state.complete_run(artifact);
                    }
                    Err(notice) => {
                        state.append_log(format!("ERROR: {}", notice.message));
                        state.fail_run(notice);
                    }
                }
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
