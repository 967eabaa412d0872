use crate::pipeline::ResearchRun;
use crate::research::ResearchOutcome;
use colored::Colorize;

/// Terminal formatting constants
const TERMINAL_WIDTH: usize = 80;
const SEPARATOR_WIDTH: usize = 40;

/// Prints a run to the console
pub struct TerminalReporter;

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, run: &ResearchRun) {
        self.print_header(run);
        self.print_research_summary(run);
        self.print_section("📝 Initial Report", &run.reports.initial_report);
        self.print_section("🚀 Enhanced Report", &run.reports.enhanced_report);
        self.print_footer(run);
    }

    fn print_header(&self, run: &ResearchRun) {
        println!("\n{}", "═".repeat(TERMINAL_WIDTH).bright_blue());
        println!("{}", "RESEARCHPILOT REPORT".bright_white().bold());
        println!("{}", "═".repeat(TERMINAL_WIDTH).bright_blue());
        println!("  Topic:           {}", run.topic.bright_cyan());
        println!("  Started:         {}", run.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    fn print_research_summary(&self, run: &ResearchRun) {
        println!("\n{}", "🔎 Web Research".bright_white().bold());
        println!("{}", "─".repeat(SEPARATOR_WIDTH).bright_black());

        match &run.research {
            ResearchOutcome::Success { sources, .. } => {
                println!("  Status:          {}", "completed".bright_green());
                println!("  Sources:         {}", sources.len().to_string().bright_yellow());
                for (i, source) in sources.iter().enumerate() {
                    println!(
                        "    {}. {} {}",
                        i + 1,
                        source.title.as_deref().unwrap_or("No title"),
                        source.url.as_deref().unwrap_or("Unknown URL").bright_black()
                    );
                }
            }
            ResearchOutcome::Failure { message, .. } => {
                println!("  Status:          {}", "failed".bright_red().bold());
                println!("  Reason:          {}", message.bright_red());
                println!("  {}", "Reports were written without research results.".bright_yellow());
            }
        }
    }

    fn print_section(&self, title: &str, body: &str) {
        println!("\n{}", title.bright_white().bold());
        println!("{}", "─".repeat(SEPARATOR_WIDTH).bright_black());
        println!("{}", body.trim_end());
    }

    fn print_footer(&self, run: &ResearchRun) {
        println!("\n{}", "═".repeat(TERMINAL_WIDTH).bright_blue());
        let research = if run.research.is_success() {
            format!("{} sources", run.research.source_count()).bright_green()
        } else {
            "research unavailable".bright_red()
        };
        println!("Completed in {:.1}s ({})", run.duration_ms as f64 / 1000.0, research);
    }
}
