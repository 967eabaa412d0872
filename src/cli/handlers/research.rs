use anyhow::{anyhow, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use super::build_orchestrator;
use crate::cli::commands::{ReportFormat, ResearchArgs};
use crate::pipeline::StagePool;
use crate::report::json::JsonReporter;
use crate::report::markdown::MarkdownReporter;
use crate::report::terminal::TerminalReporter;
use crate::report::ReportGenerator;
use crate::research::ResearchParams;

impl From<ResearchArgs> for ResearchParams {
    fn from(args: ResearchArgs) -> Self {
        Self {
            max_depth: args.max_depth,
            time_limit: args.time_limit,
            max_urls: args.max_urls,
        }
    }
}

pub async fn handle_research_command(
    topic: String,
    format: ReportFormat,
    output: Option<PathBuf>,
    research: ResearchArgs,
    llmdbg: bool,
    llm_timeout: Option<u64>,
) -> Result<()> {
    if topic.trim().is_empty() {
        return Err(anyhow!("No research topic provided"));
    }

    let params = ResearchParams::from(research);
    params.validate().map_err(|e| anyhow!(e))?;

    let orchestrator = build_orchestrator(llmdbg, llm_timeout, params, StagePool::new(1))?;
    let run = orchestrator.run_detailed(topic.trim(), params).await?;
    if !run.research.is_success() {
        warn!("Web research failed; reports were written without research results");
    }

    match format {
        ReportFormat::Terminal => {
            TerminalReporter::new().report(&run);
        }
        ReportFormat::Json => {
            let reporter = JsonReporter::new();
            match output {
                Some(path) => {
                    info!("Generating {} report: {}", reporter.name(), path.display());
                    reporter.save(&run, &path)?;
                    info!("✅ Report saved to: {}", path.display());
                }
                None => println!("{}", reporter.render(&run)?),
            }
        }
        ReportFormat::Markdown => {
            let output_path = output.unwrap_or_else(|| {
                let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
                PathBuf::from(format!("research_report_{}.md", timestamp))
            });

            let reporter = MarkdownReporter::new();
            info!("Generating {} report: {}", reporter.name(), output_path.display());
            reporter.save(&run, &output_path)?;
            info!("✅ Report saved to: {}", output_path.display());
        }
    }

    Ok(())
}
