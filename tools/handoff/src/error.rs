use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("Transcript not found: {}", .0.display())]
    TranscriptNotFound(PathBuf),

    #[error("Failed to read transcript {}: {source}", path.display())]
    TranscriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Failed to read template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write handoff {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
