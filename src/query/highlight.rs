use std::ops::Range;

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

pub const HIGHLIGHT_OPEN: &str = "<span class=\"highlight\">";
pub const HIGHLIGHT_CLOSE: &str = "</span>";

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("Invalid highlight pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Byte range of `text` that matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
}

impl From<Range<usize>> for HighlightSpan {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// A field value with the places the query occurs in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlighted {
    pub text: String,
    pub spans: Vec<HighlightSpan>,
}

impl Highlighted {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            spans: Vec::new(),
        }
    }

    /// The matched substrings, in their original casing.
    pub fn fragments(&self) -> Vec<&str> {
        self.spans
            .iter()
            .map(|span| &self.text[span.start..span.end])
            .collect()
    }

    pub fn render_with(&self, open: &str, close: &str) -> String {
        let markup = self.spans.len() * (open.len() + close.len());
        let mut out = String::with_capacity(self.text.len() + markup);
        let mut cursor = 0;
        for span in &self.spans {
            out.push_str(&self.text[cursor..span.start]);
            out.push_str(open);
            out.push_str(&self.text[span.start..span.end]);
            out.push_str(close);
            cursor = span.end;
        }
        out.push_str(&self.text[cursor..]);
        out
    }

    pub fn render(&self) -> String {
        self.render_with(HIGHLIGHT_OPEN, HIGHLIGHT_CLOSE)
    }
}

/// A compiled, case-insensitive matcher for one query.
///
/// The query is always escaped, so it is matched literally.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn try_new(query: &str) -> Result<Self, HighlightError> {
        let needle = query.trim();
        if needle.is_empty() {
            return Ok(Self { pattern: None });
        }
        let pattern = RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Like [`Highlighter::try_new`], degrading to a no-op highlighter
    /// (text rendered unhighlighted) when the pattern cannot be built.
    pub fn new(query: &str) -> Self {
        match Self::try_new(query) {
            Ok(highlighter) => highlighter,
            Err(err) => {
                warn!(error = %err, "highlight disabled for query");
                Self { pattern: None }
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn highlight(&self, text: &str) -> Highlighted {
        match &self.pattern {
            Some(pattern) => Highlighted {
                text: text.to_string(),
                spans: pattern.find_iter(text).map(|m| m.range().into()).collect(),
            },
            None => Highlighted::plain(text),
        }
    }
}

/// Mark every case-insensitive occurrence of `query` in `text`.
pub fn highlight(text: &str, query: &str) -> Highlighted {
    Highlighter::new(query).highlight(text)
}
