use anyhow::Result;
use clap::Parser;
use researchpilot::cli::commands::{Cli, Commands};
use researchpilot::cli::handlers::{handle_config_command, handle_research_command, handle_serve_command};
use researchpilot::cli::utils::{init_logging, print_info};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_format);

    // Execute command
    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            max_concurrent_stages,
            llmdbg,
        } => handle_serve_command(host, port, max_concurrent_stages, llmdbg).await,

        Commands::Research {
            topic,
            format,
            output,
            research,
            llmdbg,
            llm_timeout,
        } => handle_research_command(topic, format, output, research, llmdbg, llm_timeout).await,

        Commands::Config => handle_config_command(),

        Commands::Info => {
            print_info();
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}
