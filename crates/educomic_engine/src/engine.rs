use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_info, engine_warn};

use crate::analyze::{ContentAnalyzer, HttpContentAnalyzer};
use crate::config::ServiceSettings;
use crate::pipeline::run_pipeline;
use crate::render::{ComicRenderer, HttpComicRenderer};
use crate::types::{ChannelProgressSink, PipelineEvent, PipelineRequest, RunId, StageError};

enum EngineCommand {
    Run {
        run_id: RunId,
        request: PipelineRequest,
    },
}

/// Handle to the background worker that executes generation runs.
///
/// Commands go in over a channel, `PipelineEvent`s come back out. The
/// caller polls `try_recv` from its own loop; nothing here blocks it.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<PipelineEvent>,
}

impl EngineHandle {
    /// Spawns the worker thread with its own tokio runtime.
    pub fn new(settings: ServiceSettings) -> Result<Self, StageError> {
        let analyzer = Arc::new(HttpContentAnalyzer::new(settings.clone())?);
        let renderer = Arc::new(HttpComicRenderer::new(settings)?);

        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel::<PipelineEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let analyzer = analyzer.clone();
                let renderer = renderer.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(analyzer.as_ref(), renderer.as_ref(), command, event_tx).await;
                });
            }
            // Command channel closed: the handle is gone. Dropping the
            // runtime aborts whatever is still in flight.
        });

        Ok(Self { cmd_tx, event_rx })
    }

    /// Submits a run. Events for it will carry `run_id`.
    pub fn run(&self, run_id: RunId, request: PipelineRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Run { run_id, request });
    }

    /// Takes the next pending event, if any. Never blocks.
    pub fn try_recv(&self) -> Option<PipelineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    analyzer: &dyn ContentAnalyzer,
    renderer: &dyn ComicRenderer,
    command: EngineCommand,
    event_tx: mpsc::Sender<PipelineEvent>,
) {
    match command {
        EngineCommand::Run { run_id, request } => {
            engine_info!("pipeline run {} started in {:?} mode", run_id, request.mode);
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = run_pipeline(analyzer, renderer, run_id, &request, &sink).await;
            match &result {
                Ok(artifact) => engine_info!(
                    "pipeline run {} produced {} bytes of {}",
                    run_id,
                    artifact.bytes.len(),
                    artifact.content_type
                ),
                Err(err) => engine_warn!("pipeline run {} failed: {}", run_id, err.kind),
            }
            let _ = event_tx.send(PipelineEvent::Completed { run_id, result });
        }
    }
}
