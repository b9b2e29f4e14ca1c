use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unexpected status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Invalid CSS selector: {0}")]
    Selector(String),

    #[error("Invalid selector spec '{0}', expected NAME=CSS or NAME=CSS@ATTR")]
    InvalidSelectorSpec(String),

    #[error("No significant content found on {0}")]
    NoContent(String),

    #[error("Nothing to scrape: {0}")]
    NoInput(String),

    #[error("No page could be scraped")]
    NothingScraped,

    #[error("{0} is not set")]
    MissingApiKey(&'static str),

    #[error("API error: {0}")]
    Api(String),
}

pub type ScraperResult<T> = Result<T, ScraperError>;
