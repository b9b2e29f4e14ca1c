pub mod cli;
pub mod core;
pub mod http;
pub mod parser;
pub mod scrapers;
pub mod search;
pub mod stats;
pub mod storage;
pub mod summarizer;

pub use crate::core::{Agent, ScraperConfig};
pub use crate::core::{ScraperError, ScraperResult};
pub use http::{HttpResponse, ResponseType};
pub use parser::{Article, FieldSelector, Parser, Record, SelectorSet};
pub use scrapers::Scraper;
pub use stats::StatsTracker;
pub use storage::{DiskStorage, ScrapeReport};
