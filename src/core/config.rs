use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_OUTPUT_FILE: &str = "scraper_results.json";
pub const DEFAULT_SERPAPI_ENDPOINT: &str = "https://serpapi.com/search.json";
pub const DEFAULT_HUGGINGFACE_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

pub const SERPAPI_KEY_VAR: &str = "SERPAPI_KEY";
pub const HUGGINGFACE_KEY_VAR: &str = "HUGGINGFACE_KEY";

/// Settings shared by the fetcher, the extractors and the summarizers.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub user_agent: String,
    pub headers: Vec<(String, String)>,
    /// `None` keeps the HTTP client's own default.
    pub timeout: Option<Duration>,
    pub min_content_length: usize,
    pub summary_sentences: usize,
    pub summary_max_length: usize,
    pub overall_summary_max_length: usize,
    pub summary_min_length: usize,
    pub summary_input_limit: usize,
    pub serpapi_key: Option<String>,
    pub serpapi_endpoint: String,
    pub huggingface_key: Option<String>,
    pub huggingface_endpoint: String,
    pub output_path: PathBuf,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: Vec::new(),
            timeout: None,
            min_content_length: 50,
            summary_sentences: 5,
            summary_max_length: 500,
            overall_summary_max_length: 1000,
            summary_min_length: 100,
            summary_input_limit: 5000,
            serpapi_key: None,
            serpapi_endpoint: DEFAULT_SERPAPI_ENDPOINT.to_string(),
            huggingface_key: None,
            huggingface_endpoint: DEFAULT_HUGGINGFACE_ENDPOINT.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl ScraperConfig {
    /// Defaults plus API keys taken from the environment.
    pub fn from_env() -> Self {
        Self::default()
            .with_serpapi_key(non_empty_var(SERPAPI_KEY_VAR))
            .with_huggingface_key(non_empty_var(HUGGINGFACE_KEY_VAR))
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_headers(mut self, headers: Vec<(&str, &str)>) -> Self {
        self.headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_min_content_length(mut self, length: usize) -> Self {
        self.min_content_length = length;
        self
    }

    pub fn with_summary_sentences(mut self, sentences: usize) -> Self {
        self.summary_sentences = sentences;
        self
    }

    pub fn with_serpapi_key(mut self, key: Option<String>) -> Self {
        self.serpapi_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_serpapi_endpoint(mut self, endpoint: &str) -> Self {
        self.serpapi_endpoint = endpoint.to_string();
        self
    }

    pub fn with_huggingface_key(mut self, key: Option<String>) -> Self {
        self.huggingface_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_huggingface_endpoint(mut self, endpoint: &str) -> Self {
        self.huggingface_endpoint = endpoint.to_string();
        self
    }

    pub fn with_output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = path.into();
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
