use std::sync::Once;

use educomic_core::{
    update, AppState, ComicForm, Effect, FailureKind, FailureNotice, Msg, PhaseView,
    PipelineArtifact, PipelineState, SourceMode, COMPLETE_LOG_LINE, INIT_LOG_LINE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn topic_form(topic: &str) -> ComicForm {
    ComicForm {
        topic: topic.to_string(),
        ..ComicForm::default()
    }
}

fn video_form(reference: &str, topic: &str) -> ComicForm {
    ComicForm {
        mode: SourceMode::VideoReference,
        topic: topic.to_string(),
        source_reference: reference.to_string(),
        ..ComicForm::default()
    }
}

fn png_artifact(bytes: &[u8]) -> PipelineArtifact {
    PipelineArtifact {
        bytes: bytes.to_vec(),
        content_type: "image/png".to_string(),
    }
}

fn start(state: AppState, form: ComicForm) -> (AppState, Vec<Effect>, u64) {
    let (state, effects) = update(state, Msg::GenerateClicked { form });
    let run_id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::RunPipeline { run_id, .. } => Some(*run_id),
        })
        .expect("run pipeline effect");
    (state, effects, run_id)
}

#[test]
fn generate_clears_log_and_enters_running() {
    init_logging();
    let (mut state, effects, run_id) = start(AppState::new(), topic_form("Photosynthesis"));

    assert!(state.is_running());
    assert_eq!(state.current_run(), Some(run_id));
    assert_eq!(effects.len(), 1);

    let view = state.view();
    assert_eq!(view.phase, PhaseView::Running);
    assert_eq!(view.log.len(), 1);
    assert_eq!(view.log[0].sequence, 1);
    assert_eq!(view.log[0].message, INIT_LOG_LINE);
    assert!(state.consume_dirty());
}

#[test]
fn generate_while_running_is_a_strict_noop() {
    init_logging();
    let (mut state, _effects, _run_id) = start(AppState::new(), topic_form("Photosynthesis"));
    assert!(state.consume_dirty());
    let before = state.clone();

    let (mut next, effects) = update(
        state,
        Msg::GenerateClicked {
            form: topic_form("Volcanoes"),
        },
    );

    assert_eq!(next, before);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn progress_lines_are_appended_in_sequence_order() {
    init_logging();
    let (state, _effects, run_id) = start(AppState::new(), video_form("https://vid.example/x", ""));

    let lines = [
        "Connecting to video stream...",
        "Target: https://vid.example/x",
        "Audio analysis complete. Concept extracted.",
    ];
    let mut state = state;
    for line in lines {
        let (next, effects) = update(
            state,
            Msg::PipelineLog {
                run_id,
                message: line.to_string(),
            },
        );
        assert!(effects.is_empty());
        state = next;
    }

    let sequences: Vec<_> = state.log().entries().map(|e| e.sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3, 4]);
    assert_eq!(state.log().last().unwrap().message, lines[2]);
}

#[test]
fn successful_run_appends_closing_line_and_holds_artifact() {
    init_logging();
    let (state, _effects, run_id) = start(AppState::new(), topic_form("Photosynthesis"));

    let (mut state, effects) = update(
        state,
        Msg::PipelineFinished {
            run_id,
            result: Ok(png_artifact(b"strip")),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.log().last().unwrap().message, COMPLETE_LOG_LINE);
    match state.pipeline() {
        PipelineState::Succeeded(artifact) => {
            assert_eq!(artifact.bytes, b"strip");
            assert_eq!(artifact.content_type, "image/png");
        }
        other => panic!("expected Succeeded, got {other:?}"),
    }
    let view = state.view();
    assert_eq!(view.phase, PhaseView::Succeeded);
    assert_eq!(view.artifact.as_ref().unwrap().byte_len, 5);
    assert!(view.failure.is_none());
    assert!(state.consume_dirty());
}

#[test]
fn stage_failure_is_terminal_with_error_as_last_line() {
    init_logging();
    let (state, _effects, run_id) = start(AppState::new(), video_form("https://vid.example/x", ""));

    let (state, _effects) = update(
        state,
        Msg::PipelineFinished {
            run_id,
            result: Err(FailureNotice {
                kind: FailureKind::ExtractionFailed,
                message: "Content analysis failed.".to_string(),
            }),
        },
    );

    match state.pipeline() {
        PipelineState::Failed(notice) => {
            assert_eq!(notice.kind, FailureKind::ExtractionFailed);
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    let view = state.view();
    assert_eq!(view.phase, PhaseView::Failed);
    assert_eq!(
        view.log.last().unwrap().message,
        "ERROR: Content analysis failed."
    );
    assert!(view.artifact.is_none());
    assert_eq!(
        view.failure.as_ref().unwrap().kind,
        FailureKind::ExtractionFailed
    );
}

#[test]
fn generation_failure_after_extraction_maps_to_generation_kind() {
    init_logging();
    let (state, _effects, run_id) = start(AppState::new(), video_form("https://vid.example/x", ""));

    let (state, _) = update(
        state,
        Msg::PipelineLog {
            run_id,
            message: "Audio analysis complete. Concept extracted.".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::PipelineFinished {
            run_id,
            result: Err(FailureNotice {
                kind: FailureKind::GenerationFailed,
                message: "Image generation failed.".to_string(),
            }),
        },
    );

    match state.pipeline() {
        PipelineState::Failed(notice) => {
            assert_eq!(notice.kind, FailureKind::GenerationFailed);
            assert_eq!(notice.message, "Image generation failed.");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[test]
fn a_new_run_discards_the_previous_artifact_and_restarts_sequences() {
    init_logging();
    let (state, _effects, first_run) = start(AppState::new(), topic_form("Photosynthesis"));
    let (state, _) = update(
        state,
        Msg::PipelineFinished {
            run_id: first_run,
            result: Ok(png_artifact(b"first")),
        },
    );

    let (state, _effects, second_run) = start(state, topic_form("Volcanoes"));
    assert_eq!(second_run, first_run + 1);
    assert!(state.view().artifact.is_none());
    // Log was reset for the new invocation.
    assert_eq!(state.log().len(), 1);
    assert_eq!(state.log().last().unwrap().sequence, 1);

    let (state, _) = update(
        state,
        Msg::PipelineFinished {
            run_id: second_run,
            result: Ok(png_artifact(b"second")),
        },
    );
    match state.pipeline() {
        PipelineState::Succeeded(artifact) => assert_eq!(artifact.bytes, b"second"),
        other => panic!("expected Succeeded, got {other:?}"),
    }
}

#[test]
fn events_from_a_superseded_run_are_dropped() {
    init_logging();
    let (state, _effects, first_run) = start(AppState::new(), topic_form("Photosynthesis"));
    let (state, _) = update(
        state,
        Msg::PipelineFinished {
            run_id: first_run,
            result: Err(FailureNotice {
                kind: FailureKind::Transport,
                message: "connection reset".to_string(),
            }),
        },
    );

    let (mut state, _effects, second_run) = start(state, topic_form("Volcanoes"));
    assert!(state.consume_dirty());
    let log_len = state.log().len();

    // A late log line and completion from the dead run must not land.
    let (state, _) = update(
        state,
        Msg::PipelineLog {
            run_id: first_run,
            message: "Stitching final strip...".to_string(),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::PipelineFinished {
            run_id: first_run,
            result: Ok(png_artifact(b"stale")),
        },
    );

    assert_eq!(state.current_run(), Some(second_run));
    assert_eq!(state.log().len(), log_len);
    assert!(!state.consume_dirty());
}

#[test]
fn completion_without_a_running_pipeline_is_ignored() {
    init_logging();
    let mut state = AppState::new();
    state.consume_dirty();
    let before = state.clone();

    let (mut next, effects) = update(
        state,
        Msg::PipelineFinished {
            run_id: 1,
            result: Ok(png_artifact(b"ghost")),
        },
    );

    assert_eq!(next, before);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
