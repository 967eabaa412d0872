use anyhow::Result;
use std::net::{IpAddr, SocketAddr};
use tracing::info;

use super::build_orchestrator;
use crate::pipeline::StagePool;
use crate::research::ResearchParams;
use crate::server::{self, AppState};

pub async fn handle_serve_command(host: IpAddr, port: u16, max_concurrent_stages: usize, llmdbg: bool) -> Result<()> {
    info!("Starting ResearchPilot v{}", env!("CARGO_PKG_VERSION"));

    let pool = StagePool::new(max_concurrent_stages);
    info!("Stage pool allows {} concurrent stages", pool.max_concurrent());
    let orchestrator = build_orchestrator(llmdbg, None, ResearchParams::default(), pool)?;

    server::serve(SocketAddr::new(host, port), AppState::new(orchestrator)).await
}
