use crate::http::HttpResponse;
use crate::{ScraperError, ScraperResult, StatsTracker};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

use super::Scraper;

#[derive(Clone)]
pub enum MockResponse {
    Page { status: u16, body: String },
    /// Simulates a connection that never produced a response.
    Unreachable,
}

impl MockResponse {
    pub fn html(body: &str) -> Self {
        MockResponse::Page {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        MockResponse::Page {
            status,
            body: String::new(),
        }
    }
}

/// Serves canned responses in order, cycling once exhausted.
#[derive(Clone)]
pub struct MockScraper {
    responses: Arc<Vec<MockResponse>>,
    current_response: Arc<AtomicUsize>,
    stats: Arc<StatsTracker>,
}

impl MockScraper {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            current_response: Arc::new(AtomicUsize::new(0)),
            stats: Arc::new(StatsTracker::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.current_response.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn fetch_single(&self, url: Url) -> ScraperResult<HttpResponse> {
        if self.responses.is_empty() {
            return Err(ScraperError::Api("mock scraper has no responses".to_string()));
        }

        let index = self.current_response.fetch_add(1, Ordering::SeqCst);
        match &self.responses[index % self.responses.len()] {
            MockResponse::Page { status, body } => {
                let headers = HashMap::new();
                let response_type = HttpResponse::detect_content_type(&headers, body);
                Ok(HttpResponse {
                    url,
                    status: *status,
                    headers,
                    body: body.clone(),
                    timestamp: Utc::now(),
                    response_type,
                })
            }
            MockResponse::Unreachable => Err(ScraperError::Api(format!("{} is unreachable", url))),
        }
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }
}
