mod extractive;
mod huggingface;

pub use extractive::ExtractiveSummarizer;
pub use huggingface::HuggingFaceSummarizer;

use crate::core::config::ScraperConfig;
use crate::ScraperResult;
use async_trait::async_trait;
use log::info;

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Never fails; remote implementations fall back to an extractive summary.
    async fn summarize(&self, text: &str, max_length: usize) -> String;
}

/// Remote summarization when a HuggingFace key is configured, extractive otherwise.
pub fn build_summarizer(config: &ScraperConfig) -> ScraperResult<Box<dyn Summarizer>> {
    match &config.huggingface_key {
        Some(key) => {
            info!("Using HuggingFace summarization");
            Ok(Box::new(HuggingFaceSummarizer::from_config(config, key)?))
        }
        None => {
            info!("No HuggingFace key, using extractive summaries");
            Ok(Box::new(ExtractiveSummarizer::new(config.summary_sentences)))
        }
    }
}
