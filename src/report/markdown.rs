use super::{ReportGenerator, ReportResult};
use crate::pipeline::ResearchRun;
use crate::research::ResearchOutcome;
use std::fmt::Write;

/// Markdown report generator: both reports plus a research appendix in one document
pub struct MarkdownReporter;

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporter {
    pub fn new() -> Self {
        Self
    }

    fn write_document(&self, run: &ResearchRun) -> Result<String, std::fmt::Error> {
        let mut doc = String::new();

        writeln!(doc, "# Research Report: {}", run.topic)?;
        writeln!(doc)?;
        writeln!(doc, "*Generated: {}*  ", run.started_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(doc, "*Duration: {:.1}s*", run.duration_ms as f64 / 1000.0)?;
        writeln!(doc)?;

        writeln!(doc, "## Initial Report")?;
        writeln!(doc)?;
        writeln!(doc, "{}", run.reports.initial_report.trim_end())?;
        writeln!(doc)?;

        writeln!(doc, "## Enhanced Report")?;
        writeln!(doc)?;
        writeln!(doc, "{}", run.reports.enhanced_report.trim_end())?;
        writeln!(doc)?;

        writeln!(doc, "## Research Sources")?;
        writeln!(doc)?;
        match &run.research {
            ResearchOutcome::Success { sources, .. } if sources.is_empty() => {
                writeln!(doc, "The research provider returned no sources.")?;
            }
            ResearchOutcome::Success { sources, .. } => {
                for source in sources {
                    let title = source.title.as_deref().unwrap_or("No title");
                    match &source.url {
                        Some(url) => writeln!(doc, "- [{}]({})", title, url)?,
                        None => writeln!(doc, "- {}", title)?,
                    }
                }
            }
            ResearchOutcome::Failure { message, .. } => {
                writeln!(doc, "> Web research failed: {}", message)?;
                writeln!(doc, ">")?;
                writeln!(doc, "> The reports above were written without research results.")?;
            }
        }

        Ok(doc)
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, run: &ResearchRun) -> ReportResult<String> {
        Ok(self.write_document(run)?)
    }

    fn name(&self) -> &'static str {
        "markdown"
    }
}
