use thiserror::Error;

/// Lower bound for the comic length slider.
pub const MIN_PAGE_COUNT: u8 = 1;
/// Upper bound for the comic length slider.
pub const MAX_PAGE_COUNT: u8 = 5;

/// Input source selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    /// Generate directly from a free-text topic.
    #[default]
    Topic,
    /// Analyze a video reference first, then generate.
    VideoReference,
}

/// Target audience classification governing tone and complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudienceTier {
    /// Ages 2-5.
    #[default]
    Toddler,
    /// Ages 6-10.
    Kid,
    /// Ages 11+.
    Teen,
}

/// Raw form state collected by the input layer. Unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicForm {
    pub mode: SourceMode,
    pub topic: String,
    pub source_reference: String,
    pub audience_tier: AudienceTier,
    pub page_count: u8,
}

impl Default for ComicForm {
    fn default() -> Self {
        Self {
            mode: SourceMode::Topic,
            topic: String::new(),
            source_reference: String::new(),
            audience_tier: AudienceTier::Toddler,
            page_count: 3,
        }
    }
}

/// What to do when the mode is `VideoReference` but the reference field is
/// empty while a topic is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingReferencePolicy {
    /// Normalize the request to `Topic` mode and skip extraction.
    #[default]
    FallBackToTopic,
    /// Treat the request as invalid.
    Reject,
}

/// A validated, normalized generation request.
///
/// Invariants: at least one of `topic` / `source_reference` is present, a
/// `VideoReference` request always carries a reference, and `page_count`
/// lies within `[MIN_PAGE_COUNT, MAX_PAGE_COUNT]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRequest {
    pub mode: SourceMode,
    pub topic: Option<String>,
    pub source_reference: Option<String>,
    pub audience_tier: AudienceTier,
    pub page_count: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    #[error("a topic or a video reference is required")]
    MissingSource,
}

/// Pure request assembler: trims the form fields, resolves the effective
/// mode, and clamps the page count. No side effects.
pub fn assemble(
    form: &ComicForm,
    policy: MissingReferencePolicy,
) -> Result<WorkflowRequest, AssembleError> {
    let topic = normalize(&form.topic);
    let source_reference = normalize(&form.source_reference);

    if topic.is_none() && source_reference.is_none() {
        return Err(AssembleError::MissingSource);
    }

    let mode = match form.mode {
        SourceMode::VideoReference if source_reference.is_none() => match policy {
            MissingReferencePolicy::FallBackToTopic => SourceMode::Topic,
            MissingReferencePolicy::Reject => return Err(AssembleError::MissingSource),
        },
        mode => mode,
    };

    Ok(WorkflowRequest {
        mode,
        topic,
        source_reference,
        audience_tier: form.audience_tier,
        page_count: form.page_count.clamp(MIN_PAGE_COUNT, MAX_PAGE_COUNT),
    })
}

fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
