use clap::{Parser, Subcommand, ValueEnum};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "researchpilot",
    about = "Deep web research service that turns a topic into an initial and an enhanced LLM report",
    version,
    author
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for logs
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to bind
        #[arg(long, env = "RESEARCHPILOT_HOST", default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "10000")]
        port: u16,

        /// Maximum number of pipeline stages running at once across all requests
        #[arg(long, default_value = "16")]
        max_concurrent_stages: usize,

        /// Enable LLM request/response debug logging
        #[arg(long)]
        llmdbg: bool,
    },

    /// Research a topic once and print or save the reports
    Research {
        /// Topic or question to research
        #[arg(value_name = "TOPIC")]
        topic: String,

        /// Report format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: ReportFormat,

        /// Output file path (markdown defaults to a timestamped file, json defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        research: ResearchArgs,

        /// Enable LLM request/response debug logging
        #[arg(long)]
        llmdbg: bool,

        /// LLM request timeout in seconds (default: LLM_REQUEST_TIMEOUT or 300)
        #[arg(long)]
        llm_timeout: Option<u64>,
    },

    /// Display current configuration
    Config,

    /// Show information about ResearchPilot
    Info,
}

/// Deep research parameters
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct ResearchArgs {
    /// Maximum crawl depth (1-10)
    #[arg(long, default_value = "3")]
    pub max_depth: u32,

    /// Research time budget in seconds (30-300)
    #[arg(long, default_value = "180")]
    pub time_limit: u32,

    /// Maximum number of URLs to analyze (1-1000)
    #[arg(long, default_value = "10")]
    pub max_urls: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_research_defaults() {
        let cli = Cli::try_parse_from(["researchpilot", "research", "fusion power"]).unwrap();

        match cli.command {
            Commands::Research { topic, format, output, research, llmdbg, llm_timeout } => {
                assert_eq!(topic, "fusion power");
                assert_eq!(format, ReportFormat::Terminal);
                assert!(output.is_none());
                assert_eq!(research.max_depth, 3);
                assert_eq!(research.time_limit, 180);
                assert_eq!(research.max_urls, 10);
                assert!(!llmdbg);
                assert!(llm_timeout.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["researchpilot", "info", "--verbose", "--log-format", "json"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "researchpilot", "serve", "--host", "127.0.0.1", "--port", "8080", "--max-concurrent-stages", "4",
        ])
        .unwrap();

        match cli.command {
            Commands::Serve { host, port, max_concurrent_stages, .. } => {
                assert_eq!(host.to_string(), "127.0.0.1");
                assert_eq!(port, 8080);
                assert_eq!(max_concurrent_stages, 4);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
