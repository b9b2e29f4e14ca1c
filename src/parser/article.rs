use super::base::{css, element_text, first_attr, first_text, Parser};
use crate::{HttpResponse, ScraperError, ScraperResult};
use chrono::{DateTime, Utc};
use log::debug;
use scraper::Html;
use serde::{Deserialize, Serialize};

const DATE_META: [&str; 4] = [
    r#"meta[property="article:published_time"]"#,
    r#"meta[name="date"]"#,
    r#"meta[name="pubdate"]"#,
    r#"meta[name="publishdate"]"#,
];

/// Readable content of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub text: String,
    pub publish_date: Option<String>,
    pub authors: Vec<String>,
    pub top_image: Option<String>,
    pub source_url: String,
}

pub struct ArticleParser {
    min_content_length: usize,
}

impl Default for ArticleParser {
    fn default() -> Self {
        Self::new(50)
    }
}

impl ArticleParser {
    pub fn new(min_content_length: usize) -> Self {
        Self { min_content_length }
    }

    fn title(document: &Html) -> ScraperResult<String> {
        if let Some(title) = first_attr(document, r#"meta[property="og:title"]"#, "content")? {
            return Ok(title);
        }
        if let Some(title) = first_text(document, "title")? {
            return Ok(title);
        }
        Ok(first_text(document, "h1")?.unwrap_or_default())
    }

    fn text(document: &Html) -> ScraperResult<String> {
        let collect = |selector: &str| -> ScraperResult<Vec<String>> {
            let selector = css(selector)?;
            Ok(document
                .select(&selector)
                .map(element_text)
                .filter(|p| !p.is_empty())
                .collect())
        };

        let mut paragraphs = collect("article p")?;
        if paragraphs.is_empty() {
            paragraphs = collect("p")?;
        }
        Ok(paragraphs.join("\n\n"))
    }

    fn publish_date(document: &Html) -> ScraperResult<Option<String>> {
        let mut raw = None;
        for selector in DATE_META {
            raw = first_attr(document, selector, "content")?;
            if raw.is_some() {
                break;
            }
        }
        if raw.is_none() {
            raw = first_attr(document, "time[datetime]", "datetime")?;
        }

        Ok(raw.map(|value| match DateTime::parse_from_rfc3339(&value) {
            Ok(date) => date.with_timezone(&Utc).to_rfc3339(),
            Err(_) => value,
        }))
    }

    fn authors(document: &Html) -> ScraperResult<Vec<String>> {
        let meta = css(r#"meta[name="author"]"#)?;
        let rel = css(r#"[rel="author"]"#)?;

        let candidates = document
            .select(&meta)
            .filter_map(|e| e.value().attr("content"))
            .map(|a| a.trim().to_string())
            .chain(document.select(&rel).map(element_text));

        let mut authors: Vec<String> = Vec::new();
        for author in candidates {
            if !author.is_empty() && !authors.contains(&author) {
                authors.push(author);
            }
        }
        Ok(authors)
    }

    fn top_image(document: &Html, response: &HttpResponse) -> ScraperResult<Option<String>> {
        let image = first_attr(document, r#"meta[property="og:image"]"#, "content")?;
        Ok(image.map(|src| match response.url.join(&src) {
            Ok(url) => url.to_string(),
            Err(_) => src,
        }))
    }
}

impl Parser for ArticleParser {
    type Output = Article;

    fn parse(&self, response: &HttpResponse) -> ScraperResult<Article> {
        let document = Html::parse_document(&response.body);

        let text = Self::text(&document)?;
        if text.trim().chars().count() < self.min_content_length {
            debug!(
                "Only {} characters of text on {}",
                text.trim().chars().count(),
                response.url
            );
            return Err(ScraperError::NoContent(response.url.to_string()));
        }

        Ok(Article {
            title: Self::title(&document)?,
            text,
            publish_date: Self::publish_date(&document)?,
            authors: Self::authors(&document)?,
            top_image: Self::top_image(&document, response)?,
            source_url: response.url.to_string(),
        })
    }
}
