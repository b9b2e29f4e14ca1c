use crate::core::config::DEFAULT_OUTPUT_FILE;
use crate::scrapers::HttpScraper;
use crate::{Agent, FieldSelector, Scraper, ScraperConfig, ScraperError, ScraperResult, SelectorSet};
use clap::{Args as ClapArgs, Parser, Subcommand};
use log::{error, info, warn};
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_TARGET: &str =
    "https://medium.com/@joerosborne/intro-to-web-scraping-build-your-first-scraper-in-5-minutes-1c36b5c4b110";

#[derive(Parser, Debug)]
#[command(name = "pagescraper", version, about = "Scrape web pages into a JSON file")]
pub struct Args {
    /// Where to write the results
    #[arg(short, long, global = true, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract fields with CSS selectors (the default)
    Select(SelectArgs),
    /// Extract and summarize article content
    Analyze(AnalyzeArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Select(SelectArgs::default())
    }
}

#[derive(ClapArgs, Debug, Default)]
pub struct SelectArgs {
    /// Page to scrape; repeatable. Defaults to the built-in target
    #[arg(long = "url")]
    pub urls: Vec<Url>,

    /// Field as NAME=CSS or NAME=CSS@ATTR; repeatable. Replaces the default set
    #[arg(long = "selector")]
    pub selectors: Vec<FieldSelector>,
}

#[derive(ClapArgs, Debug)]
pub struct AnalyzeArgs {
    /// Search query sent to SerpAPI
    #[arg(short, long)]
    pub query: Option<String>,

    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=20))]
    pub num_results: u8,

    /// Page to scrape; repeatable. Ignored when --query is given
    #[arg(long = "url")]
    pub urls: Vec<Url>,

    /// Search for replacement pages for every URL that failed
    #[arg(long)]
    pub suggest_alternatives: bool,
}

pub async fn run(args: Args, config: ScraperConfig) -> ScraperResult<PathBuf> {
    let config = config.with_output_path(args.output);
    let scraper = Box::new(HttpScraper::from_config(&config)?);
    run_with_scraper(args.command.unwrap_or_default(), config, scraper).await
}

/// Runs one command and writes the report, unless nothing at all could be scraped.
pub async fn run_with_scraper(
    command: Command,
    config: ScraperConfig,
    scraper: Box<dyn Scraper>,
) -> ScraperResult<PathBuf> {
    let mut agent = Agent::new(scraper, config)?;

    let outcome = match command {
        Command::Select(args) => select(&mut agent, args).await,
        Command::Analyze(args) => analyze(&mut agent, args).await,
    };

    agent.stats().finish();
    agent.stats().log_summary();
    outcome?;

    if !agent.failed_urls().is_empty() {
        warn!("Failed to scrape {} URL(s)", agent.failed_urls().len());
    }
    if agent.report().is_empty() {
        error!("Failed to scrape any page, no results written");
        return Err(ScraperError::NothingScraped);
    }

    agent.save_results()
}

async fn select(agent: &mut Agent, args: SelectArgs) -> ScraperResult<()> {
    let urls = if args.urls.is_empty() {
        vec![Url::parse(DEFAULT_TARGET)?]
    } else {
        args.urls
    };
    let selectors = if args.selectors.is_empty() {
        FieldSelector::defaults()
    } else {
        args.selectors
    };

    let selectors = SelectorSet::new(selectors)?;
    let scraped = agent.batch_select(&urls, &selectors).await;
    info!("Scraped {} of {} page(s)", scraped, urls.len());
    Ok(())
}

async fn analyze(agent: &mut Agent, args: AnalyzeArgs) -> ScraperResult<()> {
    let urls = match (&args.query, args.urls.is_empty()) {
        (Some(query), _) => {
            let urls = agent.search_web(query, args.num_results as usize).await?;
            if urls.is_empty() {
                return Err(ScraperError::NoInput(format!(
                    "no search results for '{}'",
                    query
                )));
            }
            info!("Found {} URLs", urls.len());
            urls
        }
        (None, false) => args.urls,
        (None, true) => {
            return Err(ScraperError::NoInput(
                "provide either --query or at least one --url".to_string(),
            ))
        }
    };

    let results = agent.batch_scrape(&urls).await;
    info!("Successfully scraped {} website(s)", results.len());

    if !results.is_empty() {
        agent.analyze_and_summarize().await;
    }
    if args.suggest_alternatives && !agent.failed_urls().is_empty() {
        agent.suggest_alternatives_for_failed().await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::{MockResponse, MockScraper};
    use crate::DiskStorage;

    const PAGE: &str = "<html><body><h1>Title</h1><p>Some text that is long enough to count as an article body.</p><a href='https://example.com/'>link</a></body></html>";

    fn config(dir: &tempfile::TempDir) -> ScraperConfig {
        ScraperConfig::default().with_output_path(dir.path().join("scraper_results.json"))
    }

    #[test]
    fn test_no_arguments_means_default_select() {
        let args = Args::try_parse_from(["pagescraper"]).unwrap();
        assert_eq!(args.output, PathBuf::from("scraper_results.json"));
        assert!(args.command.is_none());
        assert!(matches!(
            args.command.unwrap_or_default(),
            Command::Select(SelectArgs { ref urls, ref selectors }) if urls.is_empty() && selectors.is_empty()
        ));
    }

    #[test]
    fn test_parse_select_arguments() {
        let args = Args::try_parse_from([
            "pagescraper",
            "select",
            "--url",
            "https://example.com/a",
            "--selector",
            "heading=h2.title",
            "--selector",
            "image=img@src",
            "--output",
            "out/results.json",
        ])
        .unwrap();

        assert_eq!(args.output, PathBuf::from("out/results.json"));
        let Some(Command::Select(select)) = args.command else {
            panic!("expected select");
        };
        assert_eq!(select.urls, vec![Url::parse("https://example.com/a").unwrap()]);
        assert_eq!(
            select.selectors,
            vec![
                FieldSelector::text("heading", "h2.title"),
                FieldSelector::attr("image", "img", "src"),
            ]
        );
    }

    #[test]
    fn test_parse_analyze_arguments() {
        let args = Args::try_parse_from(["pagescraper", "analyze", "-q", "rust news"]).unwrap();
        let Some(Command::Analyze(analyze)) = args.command else {
            panic!("expected analyze");
        };
        assert_eq!(analyze.query.as_deref(), Some("rust news"));
        assert_eq!(analyze.num_results, 5);
        assert!(!analyze.suggest_alternatives);

        assert!(Args::try_parse_from(["pagescraper", "analyze", "-n", "21"]).is_err());
        assert!(Args::try_parse_from(["pagescraper", "select", "--url", "not a url"]).is_err());
        assert!(Args::try_parse_from(["pagescraper", "select", "--selector", "broken"]).is_err());
    }

    #[tokio::test]
    async fn test_default_run_writes_record() {
        let dir = tempfile::tempdir().unwrap();
        let scraper = Box::new(MockScraper::new(vec![MockResponse::html(PAGE)]));

        let path = run_with_scraper(Command::default(), config(&dir), scraper)
            .await
            .unwrap();

        let report = DiskStorage::new(&path).load().unwrap();
        let record = &report.records[DEFAULT_TARGET];
        assert_eq!(record["title"], "Title");
        assert_eq!(record["link"], "https://example.com/");
        assert!(report.failed_urls.is_empty());
    }

    #[tokio::test]
    async fn test_failed_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let output = config.output_path.clone();
        let scraper = Box::new(MockScraper::new(vec![MockResponse::status(500)]));

        let result = run_with_scraper(Command::default(), config, scraper).await;
        assert!(matches!(result, Err(ScraperError::NothingScraped)));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_analyze_without_input() {
        let dir = tempfile::tempdir().unwrap();
        let scraper = Box::new(MockScraper::new(vec![MockResponse::html(PAGE)]));
        let command = Command::Analyze(AnalyzeArgs {
            query: None,
            num_results: 5,
            urls: Vec::new(),
            suggest_alternatives: false,
        });

        let result = run_with_scraper(command, config(&dir), scraper).await;
        assert!(matches!(result, Err(ScraperError::NoInput(_))));
    }

    #[tokio::test]
    async fn test_analyze_query_without_key() {
        let dir = tempfile::tempdir().unwrap();
        let scraper = Box::new(MockScraper::new(vec![MockResponse::html(PAGE)]));
        let command = Command::Analyze(AnalyzeArgs {
            query: Some("rust".to_string()),
            num_results: 5,
            urls: Vec::new(),
            suggest_alternatives: false,
        });

        let result = run_with_scraper(command, config(&dir), scraper).await;
        assert!(matches!(result, Err(ScraperError::MissingApiKey(_))));
    }

    #[tokio::test]
    async fn test_analyze_urls_writes_summaries() {
        let dir = tempfile::tempdir().unwrap();
        let scraper = Box::new(MockScraper::new(vec![
            MockResponse::html(PAGE),
            MockResponse::Unreachable,
        ]));
        let command = Command::Analyze(AnalyzeArgs {
            query: None,
            num_results: 5,
            urls: vec![
                Url::parse("https://a.example.com/").unwrap(),
                Url::parse("https://b.example.com/").unwrap(),
            ],
            suggest_alternatives: true,
        });

        let path = run_with_scraper(command, config(&dir), scraper).await.unwrap();
        let report = DiskStorage::new(&path).load().unwrap();

        assert_eq!(report.content.len(), 1);
        assert!(report.summaries.contains_key("https://a.example.com/"));
        assert!(report.summaries.contains_key("overall"));
        assert_eq!(report.failed_urls, vec!["https://b.example.com/"]);
        assert!(report.alternatives.is_empty());
    }
}
