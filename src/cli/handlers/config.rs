use anyhow::Result;
use std::env;

use crate::llm::config::{DEFAULT_MODEL, GROQ_API_BASE};
use crate::research::config::FIRECRAWL_API_BASE;

fn show_secret(name: &str, required: bool) {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => println!("  • {}: ✅ Set (hidden)", name),
        _ if required => println!("  • {}: ❌ Not set (required)", name),
        _ => println!("  • {}: ⚠️  Not set (research calls will fail)", name),
    }
}

fn show_value(name: &str, default: &str) {
    match env::var(name) {
        Ok(value) => println!("  • {}: {}", name, value),
        Err(_) => println!("  • {}: {} (default)", name, default),
    }
}

pub fn handle_config_command() -> Result<()> {
    let env_file_loaded = dotenv::dotenv().is_ok();

    println!("🔧 ResearchPilot Configuration");
    println!("═══════════════════════════════════════");
    println!();

    println!("📦 Version: v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("🌍 Environment Configuration:");
    if env_file_loaded {
        println!("  • .env file: ✅ Loaded");
    } else {
        println!("  • .env file: ⚠️  Not found (using system environment)");
    }
    println!();

    println!("🔎 Research provider:");
    show_secret("FIRECRAWL_API_KEY", false);
    show_value("FIRECRAWL_API_URL", FIRECRAWL_API_BASE);
    println!();

    println!("🤖 LLM provider:");
    show_secret("GROQ_API_KEY", true);
    show_value("GROQ_MODEL", DEFAULT_MODEL);
    show_value("GROQ_API_BASE", GROQ_API_BASE);
    show_value("LLM_REQUEST_TIMEOUT", "300");
    show_value("LLM_MAX_TOKENS", "4096");
    show_value("LLM_TEMPERATURE", "0.5");
    show_value("LLM_DEBUG", "false");
    println!();

    println!("🌐 HTTP service:");
    show_value("RESEARCHPILOT_HOST", "0.0.0.0");
    show_value("PORT", "10000");
    show_value("RUST_LOG", "info");

    Ok(())
}
