pub mod cli;
pub mod llm;
pub mod pipeline;
pub mod report;
pub mod research;
pub mod server;
