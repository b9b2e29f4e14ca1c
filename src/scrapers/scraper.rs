use crate::{HttpResponse, ScraperError, ScraperResult, StatsTracker};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, trace, warn};
use url::Url;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Issues exactly one GET and returns whatever came back, any status included.
    async fn fetch_single(&self, url: Url) -> ScraperResult<HttpResponse>;
    fn stats(&self) -> &StatsTracker;

    /// Like [`Scraper::fetch_single`], but records stats and rejects non-2xx responses.
    async fn fetch(&self, url: Url) -> ScraperResult<HttpResponse> {
        let start_time = Utc::now();

        info!("Fetching URL: {}", url);
        let response = match self.fetch_single(url.clone()).await {
            Ok(response) => response,
            Err(e) => {
                self.stats().record_network_error();
                return Err(e);
            }
        };
        debug!(
            "Received response: status={}, body_length={}",
            response.status,
            response.body.len()
        );

        let duration = Utc::now().signed_duration_since(start_time);
        self.stats()
            .record_request(response.status, response.body.len(), duration);

        if !response.is_success() {
            warn!("Non-success status {} for {}", response.status, url);
            return Err(ScraperError::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        trace!("Response content length: {} bytes", response.body.len());
        Ok(response)
    }
}
