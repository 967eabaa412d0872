use serde::{Deserialize, Serialize};

use super::{ResearchError, ResearchErrorKind};

/// Parameters passed straight through to the deep research job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchParams {
    /// Maximum crawl depth
    pub max_depth: u32,

    /// Time budget in seconds
    pub time_limit: u32,

    /// Maximum number of URLs to analyze
    pub max_urls: u32,
}

impl Default for ResearchParams {
    fn default() -> Self {
        Self {
            max_depth: 3,
            time_limit: 180,
            max_urls: 10,
        }
    }
}

impl ResearchParams {
    /// Check the parameters against the ranges the provider accepts
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=10).contains(&self.max_depth) {
            return Err(format!("max_depth must be between 1 and 10, got {}", self.max_depth));
        }
        if !(30..=300).contains(&self.time_limit) {
            return Err(format!("time_limit must be between 30 and 300 seconds, got {}", self.time_limit));
        }
        if !(1..=1000).contains(&self.max_urls) {
            return Err(format!("max_urls must be between 1 and 1000, got {}", self.max_urls));
        }
        Ok(())
    }
}

/// A cited source. Either field may be absent in provider output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub title: Option<String>,
}

impl Source {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            title: Some(title.into()),
        }
    }
}

/// Validated payload of a completed deep research job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepResearchData {
    pub final_analysis: String,
    pub sources: Vec<Source>,
}

impl DeepResearchData {
    /// Extract the analysis and sources from the provider's `data` object.
    ///
    /// Both `finalAnalysis` and `sources` must be present. Malformed source
    /// entries are kept as empty sources so provider order is preserved.
    pub fn from_value(data: &serde_json::Value) -> Result<Self, ResearchError> {
        let final_analysis = data
            .get("finalAnalysis")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ResearchError::InvalidResponse("missing data.finalAnalysis".to_string()))?
            .to_string();

        let sources = data
            .get("sources")
            .and_then(|v| v.as_array())
            .ok_or_else(|| ResearchError::InvalidResponse("missing data.sources".to_string()))?
            .iter()
            .map(|entry| serde_json::from_value::<Source>(entry.clone()).unwrap_or_default())
            .collect();

        Ok(Self { final_analysis, sources })
    }
}

/// Result of one research invocation: exactly one of success or failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResearchOutcome {
    Success {
        final_analysis: String,
        sources: Vec<Source>,
    },
    Failure {
        kind: ResearchErrorKind,
        message: String,
    },
}

impl ResearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ResearchOutcome::Success { .. })
    }

    pub fn source_count(&self) -> usize {
        match self {
            ResearchOutcome::Success { sources, .. } => sources.len(),
            ResearchOutcome::Failure { .. } => 0,
        }
    }
}
