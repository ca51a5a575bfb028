//! Example output link extraction
//!
//! Turns a record's raw example-output field into an ordered list of
//! `(url, description)` entries. The field is unstructured, so extraction is
//! a best-effort heuristic that never fails: text without links degrades to a
//! single description-only entry, and every matched URL is kept.

use crate::types::ExampleOutput;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Literal values that stand for "nothing to link"
pub const SENTINELS: [&str; 2] = ["N/A", "See BlurMantis app"];

/// Descriptions must be shorter than this many characters
const MAX_DESCRIPTION_CHARS: usize = 100;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s;,]+").expect("Valid URL regex"));

static DATE_STAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}:\s*").expect("Valid date stamp regex"));

static LEADING_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[:\-\s]+").expect("Valid leading punctuation regex"));

/// One extracted example
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleLink {
    /// Link target, `None` for description-only entries
    pub url: Option<String>,
    pub description: String,
}

impl ExampleLink {
    fn link(url: &str, description: String) -> Self {
        Self {
            url: Some(url.to_string()),
            description,
        }
    }

    fn text(description: &str) -> Self {
        Self {
            url: None,
            description: description.to_string(),
        }
    }

    pub fn is_link(&self) -> bool {
        self.url.is_some()
    }
}

/// Extract examples from an optional example-output field
pub fn parse(output: Option<&ExampleOutput>) -> Vec<ExampleLink> {
    match output {
        None => Vec::new(),
        Some(ExampleOutput::Links(urls)) => urls
            .iter()
            .enumerate()
            .map(|(index, url)| ExampleLink::link(url, default_description(index)))
            .collect(),
        Some(ExampleOutput::Text(text)) => parse_text(text),
    }
}

/// Extract examples from free-form text
pub fn parse_text(text: &str) -> Vec<ExampleLink> {
    if SENTINELS.contains(&text) {
        return vec![ExampleLink::text(text)];
    }

    let urls: Vec<&str> = URL_PATTERN.find_iter(text).map(|m| m.as_str()).collect();
    if urls.is_empty() {
        return vec![ExampleLink::text(text)];
    }

    let segments = split_segments(text);

    urls.iter()
        .enumerate()
        .map(|(index, url)| {
            let description = segments
                .iter()
                .find(|segment| segment.contains(url))
                .and_then(|segment| label_before(segment, url))
                .unwrap_or_else(|| default_description(index));
            ExampleLink::link(url, description)
        })
        .collect()
}

fn default_description(index: usize) -> String {
    format!("Example {}", index + 1)
}

/// Split at `;` and `,` (dropping them) and before every scheme marker
fn split_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;

    for (index, ch) in text.char_indices() {
        match ch {
            ';' | ',' => {
                segments.push(&text[start..index]);
                start = index + ch.len_utf8();
            }
            'h' if index > start && starts_with_scheme(&text[index..]) => {
                segments.push(&text[start..index]);
                start = index;
            }
            _ => {}
        }
    }

    segments.push(&text[start..]);
    segments
}

fn starts_with_scheme(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

/// Text preceding `url` inside `segment`, cleaned up, if usable as a label
fn label_before(segment: &str, url: &str) -> Option<String> {
    let before = &segment[..segment.find(url)?];
    if before.trim().is_empty() {
        return None;
    }

    let without_date = DATE_STAMP.replace(before, "");
    let label = LEADING_PUNCTUATION.replace(without_date.trim(), "");
    let label = label.trim();

    let length = label.chars().count();
    (length > 0 && length < MAX_DESCRIPTION_CHARS).then(|| label.to_string())
}
