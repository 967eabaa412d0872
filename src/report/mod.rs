pub mod json;
pub mod markdown;
pub mod terminal;

use crate::pipeline::ResearchRun;
use std::fs;
use std::path::Path;

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur during report generation
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators that produce a document from one run
pub trait ReportGenerator {
    /// Render the run as a document
    fn render(&self, run: &ResearchRun) -> ReportResult<String>;

    /// Get generator name
    fn name(&self) -> &'static str;

    /// Render and write to `output_path`, creating parent directories
    fn save(&self, run: &ResearchRun, output_path: &Path) -> ReportResult<()> {
        let content = self.render(run)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, content)?;
        Ok(())
    }
}
