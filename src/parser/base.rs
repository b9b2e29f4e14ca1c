use crate::{HttpResponse, ScraperError, ScraperResult};
use scraper::{ElementRef, Html, Selector};

/// Turns a fetched page into a typed value.
pub trait Parser {
    type Output;

    fn parse(&self, response: &HttpResponse) -> ScraperResult<Self::Output>;
}

pub(crate) fn css(selector: &str) -> ScraperResult<Selector> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector(format!("{}: {}", selector, e)))
}

pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub(crate) fn first_text(document: &Html, selector: &str) -> ScraperResult<Option<String>> {
    let selector = css(selector)?;
    Ok(document
        .select(&selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty()))
}

pub(crate) fn first_attr(
    document: &Html,
    selector: &str,
    attr: &str,
) -> ScraperResult<Option<String>> {
    let selector = css(selector)?;
    Ok(document
        .select(&selector)
        .filter_map(|e| e.value().attr(attr))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty()))
}
