pub mod highlight;
pub mod matcher;
pub mod session;

use serde::Serialize;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::record::{ContractRecord, RecordStore};
pub use highlight::{highlight, HighlightError, HighlightSpan, Highlighted, Highlighter};
pub use matcher::{is_match, normalize_query, search_text};
pub use session::{Generation, Response, SearchSession, SearchState};

/// Substring search over a record store.
///
/// Search texts are built once per store; each query is a linear scan in
/// store order. Results are never ranked.
#[derive(Debug, Clone)]
pub struct QueryEngine<'s> {
    store: &'s RecordStore,
    haystacks: Vec<String>,
    min_query_chars: usize,
    suggestion_limit: usize,
    display_limit: usize,
}

/// Autocomplete candidates for an as-you-type query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestions<'s> {
    pub query: String,
    pub records: Vec<&'s ContractRecord>,
}

impl Suggestions<'_> {
    pub fn has_suggestions(&self) -> bool {
        !self.records.is_empty()
    }
}

/// Every match of a submitted query; only the first `display_limit` are
/// meant to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults<'s> {
    pub query: String,
    pub matches: Vec<&'s ContractRecord>,
    pub display_limit: usize,
    pub truncated: bool,
}

/// A displayed result with its highlighted fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit<'s> {
    pub record: &'s ContractRecord,
    pub id: Highlighted,
    pub administration_name: Highlighted,
    pub lot_object: Highlighted,
}

impl<'s> SearchResults<'s> {
    pub fn total(&self) -> usize {
        self.matches.len()
    }

    /// The rendered slice, highlighted.
    pub fn displayed(&self) -> Vec<SearchHit<'s>> {
        let highlighter = Highlighter::new(&self.query);
        self.matches
            .iter()
            .take(self.display_limit)
            .map(|record| SearchHit {
                record: *record,
                id: highlighter.highlight(record.id.as_str()),
                administration_name: highlighter.highlight(&record.administration_name),
                lot_object: highlighter.highlight(&record.lot_object),
            })
            .collect()
    }

    pub fn count_line(&self) -> String {
        format!("Trovati {} contratti", self.total())
    }

    pub fn truncation_line(&self) -> Option<String> {
        self.truncated
            .then(|| format!("Mostrati {} di {} risultati", self.display_limit, self.total()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome<'s> {
    /// Fewer than the minimum number of characters.
    TooShort,
    NoResults { query: String },
    Found(SearchResults<'s>),
}

impl<'s> SearchOutcome<'s> {
    pub fn matches(&self) -> &[&'s ContractRecord] {
        match self {
            SearchOutcome::Found(results) => &results.matches,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches().is_empty()
    }

    pub fn results(&self) -> Option<&SearchResults<'s>> {
        match self {
            SearchOutcome::Found(results) => Some(results),
            _ => None,
        }
    }

    /// The user-visible "no results" message, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            SearchOutcome::NoResults { query } => Some(format!("Nessun risultato per \"{query}\"")),
            _ => None,
        }
    }
}

impl<'s> QueryEngine<'s> {
    pub fn new(store: &'s RecordStore, config: &DashboardConfig) -> Self {
        Self {
            store,
            haystacks: store.iter().map(search_text).collect(),
            min_query_chars: config.min_query_chars,
            suggestion_limit: config.suggestion_limit,
            display_limit: config.display_limit,
        }
    }

    /// `None` when the query is too short to search.
    fn needle(&self, raw: &str) -> Option<String> {
        let needle = normalize_query(raw);
        (matcher::query_len(&needle) >= self.min_query_chars).then_some(needle)
    }

    fn matching<'e>(&'e self, needle: &'e str) -> impl Iterator<Item = &'s ContractRecord> + 'e {
        let records: &'s [ContractRecord] = self.store.records();
        records
            .iter()
            .zip(&self.haystacks)
            .filter(move |(_, haystack)| is_match(haystack, needle))
            .map(|(record, _)| record)
    }

    /// First matches in store order, at most `suggestion_limit`.
    pub fn suggest(&self, raw: &str) -> Suggestions<'s> {
        let Some(needle) = self.needle(raw) else {
            return Suggestions {
                query: normalize_query(raw),
                records: Vec::new(),
            };
        };
        let records: Vec<&'s ContractRecord> =
            self.matching(&needle).take(self.suggestion_limit).collect();
        debug!(query = %needle, suggestions = records.len(), "suggest");
        Suggestions {
            query: needle,
            records,
        }
    }

    /// All matches, in store order.
    pub fn search(&self, raw: &str) -> SearchOutcome<'s> {
        let Some(needle) = self.needle(raw) else {
            return SearchOutcome::TooShort;
        };
        let matches: Vec<&'s ContractRecord> = self.matching(&needle).collect();
        debug!(query = %needle, matches = matches.len(), "search");
        if matches.is_empty() {
            return SearchOutcome::NoResults { query: needle };
        }
        let truncated = matches.len() > self.display_limit;
        SearchOutcome::Found(SearchResults {
            query: needle,
            matches,
            display_limit: self.display_limit,
            truncated,
        })
    }
}
