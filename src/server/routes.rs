use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::AppState;

pub const MISSING_TOPIC_ERROR: &str = "No research topic provided";

/// Landing page
pub async fn index() -> impl IntoResponse {
    Html(include_str!("../../static/index.html"))
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}

/// POST /research body
#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub research_topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    pub success: bool,
    pub initial_report: String,
    pub enhanced_report: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// POST /research
///
/// A missing body, unparsable JSON or a blank topic is a 400 and never
/// reaches the orchestrator. A whitespace-only topic counts as blank even
/// when the client skips trimming.
pub async fn research(
    State(state): State<AppState>,
    body: Result<Json<ResearchRequest>, JsonRejection>,
) -> Response {
    let topic = match body {
        Ok(Json(ResearchRequest {
            research_topic: Some(topic),
        })) if !topic.trim().is_empty() => topic,
        Ok(_) => return missing_topic(),
        Err(rejection) => {
            warn!("Rejected research request body: {}", rejection);
            return missing_topic();
        }
    };

    let request_id = Uuid::new_v4();
    let span = info_span!("research", %request_id);

    async move {
        info!("Received research request for topic: {}", topic);

        match state.orchestrator.run(&topic).await {
            Ok(reports) => (
                StatusCode::OK,
                Json(ResearchResponse {
                    success: true,
                    initial_report: reports.initial_report,
                    enhanced_report: reports.enhanced_report,
                }),
            )
                .into_response(),
            Err(e) => {
                error!("ERROR in /research endpoint: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(e.to_string()))).into_response()
            }
        }
    }
    .instrument(span)
    .await
}

fn missing_topic() -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(MISSING_TOPIC_ERROR))).into_response()
}
