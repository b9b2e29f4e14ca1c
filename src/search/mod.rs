use crate::core::config::ScraperConfig;
use crate::{ScraperError, ScraperResult};
use log::{debug, info, warn};
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use url::Url;

#[derive(Deserialize)]
struct SearchResponse {
    organic_results: Option<Vec<OrganicResult>>,
}

#[derive(Deserialize)]
struct OrganicResult {
    link: Option<String>,
}

/// Google results through SerpAPI.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl SerpApiClient {
    pub fn from_config(config: &ScraperConfig, api_key: &str) -> ScraperResult<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: api_key.to_string(),
            endpoint: config.serpapi_endpoint.clone(),
        })
    }

    /// Links of the first `num_results` organic results, in rank order.
    pub async fn search(&self, query: &str, num_results: usize) -> ScraperResult<Vec<Url>> {
        info!("Searching for '{}' ({} results)", query, num_results);
        let num = num_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScraperError::Api(format!("{}: {}", status, body)));
        }

        let results: SearchResponse = response.json().await?;
        let Some(organic) = results.organic_results else {
            info!("No search results found for '{}'", query);
            return Ok(Vec::new());
        };

        let urls = organic
            .into_iter()
            .filter_map(|r| r.link)
            .filter_map(|link| match Url::parse(&link) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!("Skipping unparsable result link {}: {}", link, e);
                    None
                }
            })
            .take(num_results)
            .collect::<Vec<_>>();

        debug!("Search returned {} links", urls.len());
        Ok(urls)
    }
}

/// Query used to look for other pages on the same site as a failed URL.
pub fn alternative_query(failed_url: &Url) -> String {
    format!("site:{} information", failed_url.host_str().unwrap_or_default())
}
