use super::{ExtractiveSummarizer, Summarizer};
use crate::core::config::ScraperConfig;
use crate::{ScraperError, ScraperResult};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct SummaryRequest<'a> {
    inputs: &'a str,
    parameters: SummaryParameters,
}

#[derive(Serialize)]
struct SummaryParameters {
    max_length: usize,
    min_length: usize,
}

#[derive(Deserialize)]
struct SummaryResponse {
    summary_text: String,
}

/// Abstractive summaries from the HuggingFace inference API.
pub struct HuggingFaceSummarizer {
    client: Client,
    api_key: String,
    endpoint: String,
    min_length: usize,
    input_limit: usize,
    fallback: ExtractiveSummarizer,
}

impl HuggingFaceSummarizer {
    pub fn from_config(config: &ScraperConfig, api_key: &str) -> ScraperResult<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: api_key.to_string(),
            endpoint: config.huggingface_endpoint.clone(),
            min_length: config.summary_min_length,
            input_limit: config.summary_input_limit,
            fallback: ExtractiveSummarizer::new(config.summary_sentences),
        })
    }

    async fn request(&self, text: &str, max_length: usize) -> ScraperResult<String> {
        let input = truncate_chars(text, self.input_limit);
        let payload = SummaryRequest {
            inputs: input,
            parameters: SummaryParameters {
                max_length,
                min_length: self.min_length,
            },
        };

        debug!(
            "Requesting summary of {} characters from {}",
            input.chars().count(),
            self.endpoint
        );
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScraperError::Api(format!("{}: {}", status, body)));
        }

        let summaries: Vec<SummaryResponse> = response.json().await?;
        summaries
            .into_iter()
            .next()
            .map(|s| s.summary_text)
            .ok_or_else(|| ScraperError::Api("empty summary response".to_string()))
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, text: &str, max_length: usize) -> String {
        match self.request(text, max_length).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("HuggingFace summarization failed, using extractive summary: {}", e);
                self.fallback.summarize_text(text)
            }
        }
    }
}

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEXT: &str = "Rust is fast. Rust is safe. Rust is fun. Rust is popular. Rust is stable. Rust is here.";

    async fn summarizer(server: &MockServer) -> HuggingFaceSummarizer {
        let config = ScraperConfig::default()
            .with_huggingface_endpoint(&format!("{}/models/bart", server.uri()));
        HuggingFaceSummarizer::from_config(&config, "test-key").unwrap()
    }

    #[tokio::test]
    async fn test_remote_summary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/bart"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "inputs": TEXT,
                "parameters": {"max_length": 500, "min_length": 100}
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"summary_text": "Rust is great."}])),
            )
            .mount(&server)
            .await;

        let summary = summarizer(&server).await.summarize(TEXT, 500).await;
        assert_eq!(summary, "Rust is great.");
    }

    #[tokio::test]
    async fn test_input_is_truncated() {
        let server = MockServer::start().await;
        let long_text = "é".repeat(6000);
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"inputs": "é".repeat(5000)})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"summary_text": "short"}])),
            )
            .mount(&server)
            .await;

        let summary = summarizer(&server).await.summarize(&long_text, 1000).await;
        assert_eq!(summary, "short");
    }

    #[tokio::test]
    async fn test_falls_back_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
            .mount(&server)
            .await;

        let summary = summarizer(&server).await.summarize(TEXT, 500).await;
        assert_eq!(
            summary,
            "Rust is fast. Rust is safe. Rust is fun. Rust is popular. Rust is stable."
        );
    }

    #[tokio::test]
    async fn test_falls_back_on_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "nope"})))
            .mount(&server)
            .await;

        let summary = summarizer(&server).await.summarize("Single sentence.", 500).await;
        assert_eq!(summary, "Single sentence.");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
