mod agent;
pub mod config;
mod errors;

pub use agent::Agent;
pub use config::ScraperConfig;
pub use errors::{ScraperError, ScraperResult};
