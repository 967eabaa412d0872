#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use researchpilot::llm::{ChatMessage, ChatModel, LlmServiceError};
use researchpilot::pipeline::Orchestrator;
use researchpilot::research::{DeepResearchData, ResearchError, ResearchParams, ResearchProvider, Source};
use researchpilot::server::{create_router, AppState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Research provider returning canned data per query, or a fixed error
pub struct FakeResearch {
    pub calls: AtomicUsize,
    pub error: Option<fn() -> ResearchError>,
    pub source_count: usize,
}

impl FakeResearch {
    pub fn ok(source_count: usize) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            error: None,
            source_count,
        })
    }

    pub fn failing(error: fn() -> ResearchError) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            error: Some(error),
            source_count: 0,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResearchProvider for FakeResearch {
    async fn deep_research(&self, query: &str, _params: &ResearchParams) -> Result<DeepResearchData, ResearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;

        if let Some(error) = self.error {
            return Err(error());
        }
        Ok(DeepResearchData {
            final_analysis: format!("analysis of {}", query),
            sources: (1..=self.source_count)
                .map(|i| Source::new(format!("https://{}.example/{}", query, i), format!("Source {}", i)))
                .collect(),
        })
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Chat model that echoes every user message back; can fail on the n-th call
pub struct EchoModel {
    pub calls: AtomicUsize,
    pub fail_on_call: Option<usize>,
}

impl EchoModel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_on_call: None,
        })
    }

    pub fn failing_on(call: usize) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_on_call: Some(call),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for EchoModel {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmServiceError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(Duration::from_millis(5)).await;

        if self.fail_on_call == Some(call) {
            return Err(LlmServiceError::ApiError("groq is overloaded".to_string()));
        }

        let body = messages
            .iter()
            .filter(|m| matches!(m, ChatMessage::User(_)))
            .map(|m| m.content())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(format!("REPORT\n{}", body))
    }

    fn model(&self) -> &str {
        "echo"
    }
}

pub fn router(research: Arc<FakeResearch>, model: Arc<EchoModel>) -> Router {
    create_router(AppState::new(Orchestrator::new(research, model)))
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 10_000_000).await.unwrap();
    (status, body.to_vec())
}

pub async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}
