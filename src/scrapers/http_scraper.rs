use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client, ClientBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use super::Scraper;
use crate::core::config::ScraperConfig;
use crate::{HttpResponse, ScraperError, ScraperResult, StatsTracker};

#[derive(Clone)]
pub struct HttpScraper {
    client: Client,
    stats: Arc<StatsTracker>,
}

impl HttpScraper {
    /// Builds the client from the configured user agent, extra headers and timeout.
    pub fn from_config(config: &ScraperConfig) -> ScraperResult<Self> {
        let header_map = Self::build_headers(&config.user_agent, &config.headers)?;

        let mut builder = ClientBuilder::new().default_headers(header_map);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            stats: Arc::new(StatsTracker::new()),
        })
    }

    fn build_headers(
        user_agent: &str,
        headers: &[(String, String)],
    ) -> ScraperResult<header::HeaderMap> {
        let mut header_map = header::HeaderMap::new();
        header_map.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(user_agent)
                .map_err(|e| ScraperError::InvalidHeader(e.to_string()))?,
        );

        for (key, value) in headers {
            let name = header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ScraperError::InvalidHeader(e.to_string()))?;
            let value = header::HeaderValue::from_str(value)
                .map_err(|e| ScraperError::InvalidHeader(e.to_string()))?;
            header_map.insert(name, value);
        }

        Ok(header_map)
    }

    fn extract_headers(response: &reqwest::Response) -> HashMap<String, String> {
        response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|val| (k.to_string(), val.to_string())))
            .collect()
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn fetch_single(&self, url: Url) -> ScraperResult<HttpResponse> {
        let timestamp = Utc::now();
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(&response);
        let body = response.text().await?;
        let response_type = HttpResponse::detect_content_type(&headers, &body);

        Ok(HttpResponse {
            url,
            status,
            headers,
            body,
            timestamp,
            response_type,
        })
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }
}
