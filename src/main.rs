use clap::Parser;
use log::error;
use pagescraper::cli::{self, Args};
use pagescraper::ScraperConfig;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .init();

    let args = Args::parse();
    match cli::run(args, ScraperConfig::from_env()).await {
        Ok(path) => {
            println!("Results saved to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
