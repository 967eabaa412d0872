use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::debug;

use super::{DeepResearchData, ResearchConfig, ResearchError, ResearchParams, ResearchProvider};

/// HTTP client for Firecrawl's deep research endpoint.
///
/// A deep research job is asynchronous on the provider side: it is started
/// with one POST and then polled until it completes or fails.
pub struct FirecrawlClient {
    http: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
    poll_interval: Duration,
    poll_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct StartResponse {
    #[serde(default)]
    success: bool,
    id: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: Option<String>,
    data: Option<Value>,
    error: Option<String>,
}

impl FirecrawlClient {
    pub fn new(config: &ResearchConfig) -> Result<Self, ResearchError> {
        config.validate().map_err(ResearchError::Api)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ResearchError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            poll_interval: config.poll_interval(),
            poll_timeout: config.poll_timeout(),
        })
    }

    fn api_key(&self) -> Result<&str, ResearchError> {
        self.api_key.as_deref().ok_or(ResearchError::MissingApiKey)
    }

    async fn start_job(&self, query: &str, params: &ResearchParams) -> Result<String, ResearchError> {
        let api_key = self.api_key()?;
        let body = json!({
            "query": query,
            "maxDepth": params.max_depth,
            "timeLimit": params.time_limit,
            "maxUrls": params.max_urls,
        });

        let response = self
            .http
            .post(format!("{}/v1/deep-research", self.api_base))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response, "start deep research").await?;
        let started: StartResponse = response
            .json()
            .await
            .map_err(|e| ResearchError::InvalidResponse(e.to_string()))?;

        match started {
            StartResponse { success: true, id: Some(id), .. } => Ok(id),
            StartResponse { error: Some(error), .. } => Err(ResearchError::Api(error)),
            _ => Err(ResearchError::InvalidResponse("deep research job id missing".to_string())),
        }
    }

    async fn job_status(&self, id: &str) -> Result<StatusResponse, ResearchError> {
        let api_key = self.api_key()?;

        let response = self
            .http
            .get(format!("{}/v1/deep-research/{}", self.api_base, id))
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response, "check deep research status").await?;
        response
            .json()
            .await
            .map_err(|e| ResearchError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ResearchProvider for FirecrawlClient {
    async fn deep_research(&self, query: &str, params: &ResearchParams) -> Result<DeepResearchData, ResearchError> {
        let id = self.start_job(query, params).await?;
        debug!("Deep research job started: {}", id);

        let deadline = Instant::now() + self.poll_timeout;
        loop {
            let status = self.job_status(&id).await?;
            match status.status.as_deref() {
                Some("completed") => {
                    let data = status
                        .data
                        .ok_or_else(|| ResearchError::InvalidResponse("missing data".to_string()))?;
                    return DeepResearchData::from_value(&data);
                }
                Some("failed") | Some("cancelled") => {
                    return Err(ResearchError::Api(format!(
                        "Deep research failed. Error: {}",
                        status.error.unwrap_or_else(|| "unknown error".to_string())
                    )));
                }
                other => debug!("Deep research job {} status: {}", id, other.unwrap_or("unknown")),
            }

            if Instant::now() >= deadline {
                return Err(ResearchError::Timeout(self.poll_timeout.as_secs()));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    fn name(&self) -> &'static str {
        "Firecrawl"
    }
}

fn map_transport_error(e: reqwest::Error) -> ResearchError {
    if e.is_timeout() || e.is_connect() || e.is_request() {
        ResearchError::Network(e.to_string())
    } else {
        ResearchError::Api(e.to_string())
    }
}

/// Turn non-success HTTP statuses into typed errors, using the provider's `error` text when present
async fn check_status(response: reqwest::Response, action: &str) -> Result<reqwest::Response, ResearchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ResearchError::Auth(format!(
            "Status code {}. {}",
            status.as_u16(),
            detail
        ))),
        _ => Err(ResearchError::Api(format!(
            "Failed to {}. Status code {}. {}",
            action,
            status.as_u16(),
            detail
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::ResearchErrorKind;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>) -> FirecrawlClient {
        let config = ResearchConfig {
            api_key: api_key.map(str::to_string),
            api_base: server.uri(),
            poll_interval_ms: 10,
            poll_timeout_secs: 1,
            ..Default::default()
        };
        FirecrawlClient::new(&config).unwrap()
    }

    async fn mount_start(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v1/deep-research"))
            .and(header("authorization", "Bearer fc-test"))
            .and(body_partial_json(json!({
                "query": "quantum batteries",
                "maxDepth": 3,
                "timeLimit": 180,
                "maxUrls": 10
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "job-1"})))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_deep_research_completed() {
        let server = MockServer::start().await;
        mount_start(&server).await;
        Mock::given(method("GET"))
            .and(path("/v1/deep-research/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "status": "completed",
                "data": {
                    "finalAnalysis": "Findings",
                    "sources": [
                        {"url": "https://a.example", "title": "A"},
                        {"url": "https://b.example", "title": "B"}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("fc-test"));
        let data = client
            .deep_research("quantum batteries", &ResearchParams::default())
            .await
            .unwrap();

        assert_eq!(data.final_analysis, "Findings");
        assert_eq!(data.sources.len(), 2);
        assert_eq!(data.sources[0].url.as_deref(), Some("https://a.example"));
    }

    #[tokio::test]
    async fn test_deep_research_missing_final_analysis() {
        let server = MockServer::start().await;
        mount_start(&server).await;
        Mock::given(method("GET"))
            .and(path("/v1/deep-research/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "status": "completed",
                "data": {"sources": []}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("fc-test"));
        let err = client
            .deep_research("quantum batteries", &ResearchParams::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ResearchErrorKind::InvalidResponse);
    }

    #[tokio::test]
    async fn test_deep_research_job_failed() {
        let server = MockServer::start().await;
        mount_start(&server).await;
        Mock::given(method("GET"))
            .and(path("/v1/deep-research/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "status": "failed",
                "error": "crawl budget exhausted"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("fc-test"));
        let err = client
            .deep_research("quantum batteries", &ResearchParams::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ResearchErrorKind::Api);
        assert!(err.to_string().contains("crawl budget exhausted"));
    }

    #[tokio::test]
    async fn test_deep_research_poll_timeout() {
        let server = MockServer::start().await;
        mount_start(&server).await;
        Mock::given(method("GET"))
            .and(path("/v1/deep-research/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "status": "processing"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("fc-test"));
        let err = client
            .deep_research("quantum batteries", &ResearchParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ResearchError::Timeout(1)));
    }

    #[tokio::test]
    async fn test_deep_research_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/deep-research"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "success": false,
                "error": "Unauthorized: Invalid token"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("fc-bad"));
        let err = client
            .deep_research("quantum batteries", &ResearchParams::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ResearchErrorKind::Auth);
        assert!(err.to_string().contains("Invalid token"));
    }

    #[tokio::test]
    async fn test_deep_research_without_api_key() {
        let server = MockServer::start().await;

        let client = client_for(&server, None);
        let err = client
            .deep_research("quantum batteries", &ResearchParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ResearchError::MissingApiKey));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deep_research_connection_refused() {
        let config = ResearchConfig {
            api_key: Some("fc-test".to_string()),
            api_base: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let client = FirecrawlClient::new(&config).unwrap();

        let err = client
            .deep_research("quantum batteries", &ResearchParams::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ResearchErrorKind::Network);
    }
}
