use crate::analyze::ContentAnalyzer;
use crate::render::ComicRenderer;
use crate::types::{
    emit_log, ComicArtifact, PipelineRequest, ProgressSink, RequestMode, RunId, StageError,
    DEFAULT_CONTEXT,
};

/// Runs the stages of one generation in order: content extraction when the
/// request carries a video reference, then artifact generation.
///
/// The first stage failure aborts the run. There are no retries, and a
/// request in `Topic` mode never touches the extraction collaborator.
pub async fn run_pipeline(
    analyzer: &dyn ContentAnalyzer,
    renderer: &dyn ComicRenderer,
    run_id: RunId,
    request: &PipelineRequest,
    sink: &dyn ProgressSink,
) -> Result<ComicArtifact, StageError> {
    let context = match request.mode {
        RequestMode::VideoReference => analyzer.analyze(run_id, request, sink).await?,
        RequestMode::Topic => {
            emit_log(sink, run_id, "Mode: Direct Topic Generation");
            emit_log(
                sink,
                run_id,
                format!("Topic: {}", request.topic.as_deref().unwrap_or_default()),
            );
            DEFAULT_CONTEXT.to_string()
        }
    };

    renderer.render(run_id, request, &context, sink).await
}
