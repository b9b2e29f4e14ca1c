use super::base::{css, element_text, Parser};
use crate::{HttpResponse, ScraperError, ScraperResult};
use log::{trace, warn};
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Field name to extracted value. A field is present only when its selector matched.
pub type Record = BTreeMap<String, String>;

/// One field to extract: the first element matching `css`, read as text or as `attr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelector {
    pub name: String,
    pub css: String,
    pub attr: Option<String>,
}

impl FieldSelector {
    pub fn text(name: &str, css: &str) -> Self {
        Self {
            name: name.to_string(),
            css: css.to_string(),
            attr: None,
        }
    }

    pub fn attr(name: &str, css: &str, attr: &str) -> Self {
        Self {
            name: name.to_string(),
            css: css.to_string(),
            attr: Some(attr.to_string()),
        }
    }

    /// `title` from `h1`, `text` from the first `p`, `link` from the `href` of the first `a`.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::text("title", "h1"),
            Self::text("text", "p"),
            Self::attr("link", "a", "href"),
        ]
    }
}

impl FromStr for FieldSelector {
    type Err = ScraperError;

    /// Parses `NAME=CSS` or `NAME=CSS@ATTR`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ScraperError::InvalidSelectorSpec(input.to_string());

        let (name, rest) = input.split_once('=').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }

        let (css, attr) = match rest.rsplit_once('@') {
            Some((css, attr)) if is_attr_name(attr) => (css, Some(attr.to_string())),
            _ => (rest, None),
        };
        let css = css.trim();
        if css.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            name: name.to_string(),
            css: css.to_string(),
            attr,
        })
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attr {
            Some(attr) => write!(f, "{}={}@{}", self.name, self.css, attr),
            None => write!(f, "{}={}", self.name, self.css),
        }
    }
}

fn is_attr_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
}

/// A set of field selectors, compiled once and applied to any number of pages.
pub struct SelectorSet {
    fields: Vec<(FieldSelector, Selector)>,
}

impl SelectorSet {
    pub fn new(fields: Vec<FieldSelector>) -> ScraperResult<Self> {
        let fields = fields
            .into_iter()
            .map(|field| {
                let compiled = css(&field.css)?;
                Ok((field, compiled))
            })
            .collect::<ScraperResult<Vec<_>>>()?;

        Ok(Self { fields })
    }

    pub fn extract(&self, html: &str) -> Record {
        let document = Html::parse_document(html);
        let mut record = Record::new();

        for (field, selector) in &self.fields {
            let value = match &field.attr {
                Some(attr) => document
                    .select(selector)
                    .next()
                    .and_then(|e| e.value().attr(attr))
                    .map(|v| v.trim().to_string()),
                None => document.select(selector).next().map(element_text),
            };

            match value {
                Some(value) => {
                    trace!("Field '{}' = {:?}", field.name, value);
                    record.insert(field.name.clone(), value);
                }
                None => warn!("Selector for '{}' ({}) matched nothing", field.name, field),
            }
        }

        record
    }
}

impl Parser for SelectorSet {
    type Output = Record;

    fn parse(&self, response: &HttpResponse) -> ScraperResult<Record> {
        Ok(self.extract(&response.body))
    }
}
