use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    SearchBackend,
    SearchCategory,
    SearchError,
    failure_placeholder,
    status_placeholder,
};

const MAX_RELATED_TOPICS: usize = 3;
const MAX_TOPIC_CHARS: usize = 200;

/// Subset of the DuckDuckGo instant-answer payload that gets rendered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstantAnswer {
    #[serde(rename = "Abstract", default)]
    pub abstract_text: String,
    #[serde(rename = "RelatedTopics", default)]
    pub related_topics: Vec<RelatedTopic>,
    #[serde(rename = "Definition", default)]
    pub definition: String,
    #[serde(rename = "Answer", default)]
    pub answer: Value,
}

/// Related topic entry. Grouped entries carry no `Text` and are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelatedTopic {
    #[serde(rename = "Text", default)]
    pub text: Option<String>,
}

/// Search backend backed by the DuckDuckGo instant-answer API.
#[derive(Debug, Clone)]
pub struct DuckDuckGoSearch {
    http: Client,
    endpoint: String,
}

impl DuckDuckGoSearch {
    /// Creates a client for the given endpoint with a per-request timeout.
    ///
    /// # Errors
    /// Returns `SearchError` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kbeauty-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(
        &self,
        query: &str,
        category: SearchCategory,
    ) -> Result<InstantAnswer, SearchError> {
        let decorated = category.decorate(query);
        debug!(category = category.as_str(), query = %decorated, "querying instant answers");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", decorated.as_str()),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }
        Ok(response.json::<InstantAnswer>().await?)
    }
}

impl SearchBackend for DuckDuckGoSearch {
    fn search<'a>(&'a self, query: &'a str, category: SearchCategory) -> BoxFuture<'a, String> {
        Box::pin(async move {
            match self.fetch(query, category).await {
                Ok(answer) => render_instant_answer(query, &answer),
                Err(SearchError::Status(status)) => {
                    warn!(status, "web search returned non-success status");
                    status_placeholder(query)
                }
                Err(err) => {
                    warn!(error = %err, "web search failed");
                    failure_placeholder(query)
                }
            }
        })
    }
}

/// Renders an instant-answer payload as markdown-like text.
#[must_use]
pub fn render_instant_answer(query: &str, answer: &InstantAnswer) -> String {
    let mut result = format!("🔍 **Search Results for '{query}'**\n\n");
    let mut found = false;

    if !answer.abstract_text.is_empty() {
        found = true;
        result.push_str(&format!("**Overview:** {}\n\n", answer.abstract_text));
    }

    let topics: Vec<&str> = answer
        .related_topics
        .iter()
        .take(MAX_RELATED_TOPICS)
        .filter_map(|topic| topic.text.as_deref())
        .filter(|text| !text.is_empty())
        .collect();
    if !answer.related_topics.is_empty() {
        found = true;
    }
    if !topics.is_empty() {
        result.push_str("**Related Information:**\n");
        for text in topics {
            let clipped: String = text.chars().take(MAX_TOPIC_CHARS).collect();
            result.push_str(&format!("- {clipped}...\n"));
        }
        result.push('\n');
    }

    if !answer.definition.is_empty() {
        found = true;
        result.push_str(&format!("**Definition:** {}\n\n", answer.definition));
    }

    if let Some(text) = answer.answer.as_str().filter(|text| !text.is_empty()) {
        found = true;
        result.push_str(&format!("**Quick Answer:** {text}\n\n"));
    }

    if !found {
        result.push_str("No direct search results found.\n");
    }

    result.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_abstract_and_limits_topics() {
        let answer: InstantAnswer = serde_json::from_value(serde_json::json!({
            "Abstract": "COSRX is a Korean skincare brand.",
            "RelatedTopics": [
                {"Text": "one"},
                {"Name": "group", "Topics": []},
                {"Text": "three"},
                {"Text": "four"}
            ],
            "Definition": "",
            "Answer": ""
        }))
        .expect("payload should decode");

        let text = render_instant_answer("cosrx", &answer);

        assert!(text.starts_with("🔍 **Search Results for 'cosrx'**"));
        assert!(text.contains("**Overview:** COSRX is a Korean skincare brand."));
        assert!(text.contains("- one..."));
        assert!(text.contains("- three..."));
        assert!(!text.contains("four"));
        assert!(!text.contains("Quick Answer"));
    }

    #[test]
    fn clips_long_topics() {
        let long = "x".repeat(500);
        let answer = InstantAnswer {
            related_topics: vec![RelatedTopic { text: Some(long) }],
            ..InstantAnswer::default()
        };

        let text = render_instant_answer("q", &answer);
        let line = text
            .lines()
            .find(|line| line.starts_with("- "))
            .expect("topic line");
        assert_eq!(line.len(), 2 + MAX_TOPIC_CHARS + 3);
    }

    #[test]
    fn empty_payload_says_so() {
        let text = render_instant_answer("nothing", &InstantAnswer::default());
        assert!(text.ends_with("No direct search results found."));
    }

    #[test]
    fn answer_objects_are_ignored() {
        let answer = InstantAnswer {
            answer: serde_json::json!({"from": "calculator"}),
            definition: "A thing.".to_string(),
            ..InstantAnswer::default()
        };
        let text = render_instant_answer("q", &answer);
        assert!(text.contains("**Definition:** A thing."));
        assert!(!text.contains("Quick Answer"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_degrades_to_placeholder() {
        let search = DuckDuckGoSearch::new("http://127.0.0.1:9/", Duration::from_millis(500))
            .expect("client should build");
        let text = search.search("cosrx", SearchCategory::Brand).await;
        assert_eq!(text, failure_placeholder("cosrx"));
    }
}
