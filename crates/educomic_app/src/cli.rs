use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use educomic_core::{AudienceTier, ComicForm, MissingReferencePolicy, SourceMode};
use educomic_engine::ServiceSettings;
use engine_logging::LogDestination;

/// Command line surface for one comic generation run.
#[derive(Debug, Parser)]
#[command(
    name = "educomic",
    version,
    about = "Generate an educational comic strip from a topic or a video reference"
)]
pub struct Cli {
    /// Topic to explain, e.g. "Photosynthesis".
    #[arg(long)]
    pub topic: Option<String>,

    /// Video reference to extract the concept from.
    #[arg(long)]
    pub reference: Option<String>,

    /// Input driving the strip. Defaults to video when a reference is given.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Reading level of the audience.
    #[arg(long, value_enum, default_value_t = AudienceArg::Toddler)]
    pub audience: AudienceArg,

    /// Number of panels in the strip.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub pages: u8,

    /// Base URL the collaborator services are mounted under.
    #[arg(long, default_value = "http://localhost:8000")]
    pub service_url: String,

    /// Directory the finished strip is exported into.
    #[arg(long, default_value = "output")]
    pub out_dir: PathBuf,

    /// Refuse a video-mode request without a reference instead of falling
    /// back to topic mode.
    #[arg(long)]
    pub reject_missing_reference: bool,

    /// Where log records go.
    #[arg(long, value_enum, default_value_t = LogArg::File)]
    pub log: LogArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Generate directly from the topic.
    Topic,
    /// Extract the concept from a video reference first.
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AudienceArg {
    /// Ages 2-5.
    Toddler,
    /// Ages 6-10.
    Kid,
    /// Ages 11+.
    Teen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    /// Write to ./educomic.log.
    File,
    /// Print to the terminal.
    Terminal,
    /// Both file and terminal.
    Both,
}

impl Cli {
    /// Raw form state as the reducer expects it. Unset text inputs become
    /// empty strings; the assembler does the trimming and rejection.
    pub fn form(&self) -> ComicForm {
        let mode = match self.mode {
            Some(ModeArg::Topic) => SourceMode::Topic,
            Some(ModeArg::Video) => SourceMode::VideoReference,
            None if self.reference.is_some() => SourceMode::VideoReference,
            None => SourceMode::Topic,
        };
        ComicForm {
            mode,
            topic: self.topic.clone().unwrap_or_default(),
            source_reference: self.reference.clone().unwrap_or_default(),
            audience_tier: match self.audience {
                AudienceArg::Toddler => AudienceTier::Toddler,
                AudienceArg::Kid => AudienceTier::Kid,
                AudienceArg::Teen => AudienceTier::Teen,
            },
            page_count: self.pages,
        }
    }

    pub fn policy(&self) -> MissingReferencePolicy {
        if self.reject_missing_reference {
            MissingReferencePolicy::Reject
        } else {
            MissingReferencePolicy::FallBackToTopic
        }
    }

    pub fn settings(&self) -> ServiceSettings {
        ServiceSettings {
            base_url: self.service_url.clone(),
            ..ServiceSettings::default()
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogArg::File => LogDestination::File,
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::Both => LogDestination::Both,
        }
    }
}
