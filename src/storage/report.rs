use crate::parser::{Article, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const OVERALL_SUMMARY_KEY: &str = "overall";

/// Everything a run produced, as written to the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub generated_at: DateTime<Utc>,
    pub search_results: Vec<String>,
    pub records: BTreeMap<String, Record>,
    pub content: BTreeMap<String, Article>,
    pub summaries: BTreeMap<String, String>,
    pub failed_urls: Vec<String>,
    pub alternatives: BTreeMap<String, Vec<String>>,
}

impl Default for ScrapeReport {
    fn default() -> Self {
        Self {
            generated_at: Utc::now(),
            search_results: Vec::new(),
            records: BTreeMap::new(),
            content: BTreeMap::new(),
            summaries: BTreeMap::new(),
            failed_urls: Vec::new(),
            alternatives: BTreeMap::new(),
        }
    }
}

impl ScrapeReport {
    /// True when no page was scraped successfully.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_all_keys_serialized() {
        let json = serde_json::to_value(ScrapeReport::default()).unwrap();
        let Value::Object(map) = json else {
            panic!("report must serialize to an object");
        };
        for key in [
            "generated_at",
            "search_results",
            "records",
            "content",
            "summaries",
            "failed_urls",
            "alternatives",
        ] {
            assert!(map.contains_key(key), "missing key {}", key);
        }
    }

    #[test]
    fn test_is_empty() {
        let mut report = ScrapeReport::default();
        report.failed_urls.push("https://example.com/".to_string());
        assert!(report.is_empty());

        report
            .records
            .insert("https://example.com/".to_string(), Record::new());
        assert!(!report.is_empty());
    }
}
