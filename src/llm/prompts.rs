use crate::llm::service::ChatMessage;
use crate::research::{ResearchOutcome, Source};

/// Sources listed in the research context handed to the model
pub const MAX_LISTED_SOURCES: usize = 10;

pub const RESEARCH_SYSTEM_PROMPT: &str = "You are a research assistant that can perform deep web research on any topic.
When given a research topic or question:
1. Analyze the research results gathered from the web
2. Review the results and organize them into a well-structured report
3. Include proper citations for all sources
4. Highlight key findings and insights
";

pub const ELABORATION_SYSTEM_PROMPT: &str = "You are an expert content enhancer specializing in research elaboration.
When given a research report:
1. Enhance the report by:
   - Adding more detailed explanations of complex concepts
   - Including relevant examples, case studies, and real-world applications
   - Expanding on key points with additional context and nuance
   - Adding visual elements descriptions (charts, diagrams, infographics)
   - Incorporating latest trends and future predictions
   - Suggesting practical implications for different stakeholders
2. Maintain academic rigor and factual accuracy
3. Preserve the original structure while making it more comprehensive
4. Ensure all additions are relevant and valuable to the topic
";

const UNKNOWN_URL: &str = "Unknown URL";
const NO_TITLE: &str = "No title";

/// Render one numbered source line, 1-based
fn render_source(index: usize, source: &Source) -> String {
    format!(
        "{}. {} - {}",
        index + 1,
        source.url.as_deref().unwrap_or(UNKNOWN_URL),
        source.title.as_deref().unwrap_or(NO_TITLE)
    )
}

/// Render the research outcome as the context message of the initial prompt.
///
/// A failure never exposes an analysis: only its message is injected.
pub fn render_research_context(outcome: &ResearchOutcome) -> String {
    match outcome {
        ResearchOutcome::Success { final_analysis, sources } => {
            let listed = sources
                .iter()
                .take(MAX_LISTED_SOURCES)
                .enumerate()
                .map(|(i, source)| render_source(i, source))
                .collect::<Vec<_>>()
                .join("\n");
            format!("Research results: {}\n\n\n## Sources:\n{}", final_analysis, listed)
        }
        ResearchOutcome::Failure { message, .. } => format!("Research failed: {}", message),
    }
}

/// Conversation for the first pass: research results into a cited report
pub fn initial_report_prompt(topic: &str, outcome: &ResearchOutcome) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(RESEARCH_SYSTEM_PROMPT),
        ChatMessage::user(format!("Research the following topic: {}", topic)),
        ChatMessage::user(render_research_context(outcome)),
    ]
}

/// Conversation for the second pass: expand the initial report
pub fn elaboration_prompt(topic: &str, initial_report: &str) -> Vec<ChatMessage> {
    let user_prompt = format!(
        "RESEARCH TOPIC: {}\n\n\
         INITIAL RESEARCH REPORT:\n\
         {}\n\n\
         Please enhance this research report with additional information, examples, case studies, \
         and deeper insights while maintaining its academic rigor and factual accuracy.",
        topic, initial_report
    );

    vec![
        ChatMessage::system(ELABORATION_SYSTEM_PROMPT),
        ChatMessage::user(user_prompt),
    ]
}
