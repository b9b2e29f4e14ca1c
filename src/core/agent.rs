use crate::core::config::{ScraperConfig, SERPAPI_KEY_VAR};
use crate::http::ResponseType;
use crate::parser::{Article, ArticleParser, Parser, Record, SelectorSet};
use crate::search::{alternative_query, SerpApiClient};
use crate::storage::report::OVERALL_SUMMARY_KEY;
use crate::storage::{DiskStorage, ScrapeReport};
use crate::summarizer::{build_summarizer, Summarizer};
use crate::{Scraper, ScraperError, ScraperResult, StatsTracker};
use chrono::Utc;
use log::{error, info, warn};
use std::collections::BTreeMap;
use std::path::PathBuf;
use url::Url;

const ALTERNATIVE_RESULTS: usize = 3;

/// Fetches pages one at a time and accumulates everything that goes into the report.
pub struct Agent {
    scraper: Box<dyn Scraper>,
    config: ScraperConfig,
    summarizer: Box<dyn Summarizer>,
    search: Option<SerpApiClient>,
    search_results: Vec<Url>,
    records: BTreeMap<String, Record>,
    content: BTreeMap<String, Article>,
    summaries: BTreeMap<String, String>,
    failed_urls: Vec<Url>,
    alternatives: BTreeMap<String, Vec<Url>>,
}

impl Agent {
    pub fn new(scraper: Box<dyn Scraper>, config: ScraperConfig) -> ScraperResult<Self> {
        let summarizer = build_summarizer(&config)?;
        let search = match &config.serpapi_key {
            Some(key) => Some(SerpApiClient::from_config(&config, key)?),
            None => None,
        };

        Ok(Self {
            scraper,
            config,
            summarizer,
            search,
            search_results: Vec::new(),
            records: BTreeMap::new(),
            content: BTreeMap::new(),
            summaries: BTreeMap::new(),
            failed_urls: Vec::new(),
            alternatives: BTreeMap::new(),
        })
    }

    pub fn with_summarizer(mut self, summarizer: Box<dyn Summarizer>) -> Self {
        self.summarizer = summarizer;
        self
    }

    pub fn stats(&self) -> &StatsTracker {
        self.scraper.stats()
    }

    pub fn can_search(&self) -> bool {
        self.search.is_some()
    }

    pub fn failed_urls(&self) -> &[Url] {
        &self.failed_urls
    }

    /// Fails only when no SerpAPI key is configured; other search errors yield no results.
    pub async fn search_web(&mut self, query: &str, num_results: usize) -> ScraperResult<Vec<Url>> {
        let client = self
            .search
            .as_ref()
            .ok_or(ScraperError::MissingApiKey(SERPAPI_KEY_VAR))?;

        match client.search(query, num_results).await {
            Ok(urls) => {
                self.search_results = urls.clone();
                Ok(urls)
            }
            Err(e) => {
                error!("Error searching web: {}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn fetch_and_parse<P: Parser>(&self, url: &Url, parser: &P) -> ScraperResult<P::Output> {
        let response = self.scraper.fetch(url.clone()).await?;
        if response.response_type != ResponseType::Html {
            warn!(
                "{} returned {:?} content, parsing it as HTML anyway",
                url, response.response_type
            );
        }
        parser.parse(&response)
    }

    fn record_failure(&mut self, url: &Url, e: &ScraperError) {
        error!("Error scraping {}: {}", url, e);
        self.failed_urls.push(url.clone());
    }

    /// Extracts one record from `url`. A selector miss leaves the field out; only
    /// fetch failures count as failed URLs.
    pub async fn scrape_fields(&mut self, url: &Url, selectors: &SelectorSet) -> Option<Record> {
        match self.fetch_and_parse(url, selectors).await {
            Ok(record) => {
                info!("Extracted {} field(s) from {}", record.len(), url);
                self.records.insert(url.to_string(), record.clone());
                Some(record)
            }
            Err(e) => {
                self.record_failure(url, &e);
                None
            }
        }
    }

    pub async fn batch_select(&mut self, urls: &[Url], selectors: &SelectorSet) -> usize {
        self.failed_urls.clear();

        let mut scraped = 0;
        for url in urls {
            info!("Scraping: {}", url);
            if self.scrape_fields(url, selectors).await.is_some() {
                scraped += 1;
            }
        }
        scraped
    }

    pub async fn scrape_article(&mut self, url: &Url) -> Option<Article> {
        let parser = ArticleParser::new(self.config.min_content_length);
        match self.fetch_and_parse(url, &parser).await {
            Ok(article) => {
                self.content.insert(url.to_string(), article.clone());
                Some(article)
            }
            Err(e) => {
                self.record_failure(url, &e);
                None
            }
        }
    }

    pub async fn batch_scrape(&mut self, urls: &[Url]) -> Vec<(Url, Article)> {
        self.failed_urls.clear();

        let mut results = Vec::new();
        for url in urls {
            info!("Scraping: {}", url);
            if let Some(article) = self.scrape_article(url).await {
                results.push((url.clone(), article));
            }
        }
        results
    }

    /// One summary per article plus an overall summary of all of them.
    pub async fn analyze_and_summarize(&mut self) -> &BTreeMap<String, String> {
        let mut all_text = String::new();

        for (url, article) in &self.content {
            info!("Summarizing: {}", url);
            let summary = self
                .summarizer
                .summarize(&article.text, self.config.summary_max_length)
                .await;
            self.summaries.insert(url.clone(), summary);
            all_text.push_str(&format!("{}\n{}\n\n", article.title, article.text));
        }

        if !all_text.is_empty() {
            let overall = self
                .summarizer
                .summarize(&all_text, self.config.overall_summary_max_length)
                .await;
            self.summaries.insert(OVERALL_SUMMARY_KEY.to_string(), overall);
        }

        &self.summaries
    }

    /// Other pages that might replace `failed_url`; empty on any error.
    pub async fn suggest_alternatives(&mut self, failed_url: &Url, query: Option<&str>) -> Vec<Url> {
        let Some(client) = self.search.as_ref() else {
            return Vec::new();
        };

        let query = query
            .map(str::to_string)
            .unwrap_or_else(|| alternative_query(failed_url));
        match client.search(&query, ALTERNATIVE_RESULTS).await {
            Ok(urls) => {
                self.alternatives
                    .insert(failed_url.to_string(), urls.clone());
                urls
            }
            Err(e) => {
                warn!("No alternatives for {}: {}", failed_url, e);
                Vec::new()
            }
        }
    }

    pub async fn suggest_alternatives_for_failed(&mut self) {
        let failed = self.failed_urls.clone();
        for url in &failed {
            self.suggest_alternatives(url, None).await;
        }
    }

    pub fn report(&self) -> ScrapeReport {
        ScrapeReport {
            generated_at: Utc::now(),
            search_results: url_strings(&self.search_results),
            records: self.records.clone(),
            content: self.content.clone(),
            summaries: self.summaries.clone(),
            failed_urls: url_strings(&self.failed_urls),
            alternatives: self
                .alternatives
                .iter()
                .map(|(k, v)| (k.clone(), url_strings(v)))
                .collect(),
        }
    }

    pub fn save_results(&self) -> ScraperResult<PathBuf> {
        let path = DiskStorage::new(&self.config.output_path).save(&self.report())?;
        info!("Results saved to {}", path.display());
        Ok(path)
    }
}

fn url_strings(urls: &[Url]) -> Vec<String> {
    urls.iter().map(Url::to_string).collect()
}
