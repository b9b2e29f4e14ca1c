use super::Summarizer;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+(?:[.!?]+|$)").expect("sentence pattern is valid"));

/// Splits text into sentences ending in `.`, `!`, `?` or the end of the text.
/// Whitespace inside a sentence is collapsed to single spaces.
fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Keeps the leading sentences of the text.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    num_sentences: usize,
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::new(5)
    }
}

impl ExtractiveSummarizer {
    pub fn new(num_sentences: usize) -> Self {
        Self { num_sentences }
    }

    pub fn summarize_text(&self, text: &str) -> String {
        split_sentences(text)
            .into_iter()
            .take(self.num_sentences)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, text: &str, _max_length: usize) -> String {
        self.summarize_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("One.  Two!\nThree?? Four and\n  no stop");
        assert_eq!(sentences, vec!["One.", "Two!", "Three??", "Four and no stop"]);
    }

    #[test]
    fn test_keeps_first_sentences() {
        let summarizer = ExtractiveSummarizer::default();
        let summary = summarizer.summarize_text("One. Two! Three? Four. Five. Six. Seven.");
        assert_eq!(summary, "One. Two! Three? Four. Five.");
    }

    #[test]
    fn test_short_and_empty_text() {
        let summarizer = ExtractiveSummarizer::new(3);
        assert_eq!(summarizer.summarize_text("Only one sentence."), "Only one sentence.");
        assert_eq!(summarizer.summarize_text("   "), "");
    }

    #[tokio::test]
    async fn test_trait_ignores_max_length() {
        let summarizer = ExtractiveSummarizer::new(1);
        assert_eq!(summarizer.summarize("First. Second.", 1).await, "First.");
    }
}
