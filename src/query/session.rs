use serde::Serialize;
use tracing::debug;

use super::{QueryEngine, SearchOutcome, Suggestions};

/// Monotonic id of a query request. Only the latest one may be rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing to show: no query, a too-short query, or cancelled.
    Idle,
    /// Showing suggestions for an as-you-type query.
    Suggesting { query: String },
    /// Showing full results for a submitted query.
    Committed { query: String },
}

/// A result stamped with the generation of the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response<T> {
    pub generation: Generation,
    pub payload: T,
}

/// The search box: input, submit and cancel events drive the state, and
/// every event supersedes all earlier ones.
#[derive(Debug)]
pub struct SearchSession<'e, 's> {
    engine: &'e QueryEngine<'s>,
    state: SearchState,
    latest: Generation,
}

impl<'e, 's> SearchSession<'e, 's> {
    pub fn new(engine: &'e QueryEngine<'s>) -> Self {
        Self {
            engine,
            state: SearchState::Idle,
            latest: Generation::default(),
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn latest(&self) -> Generation {
        self.latest
    }

    fn issue(&mut self) -> Generation {
        self.latest = self.latest.next();
        self.latest
    }

    /// A keystroke: recompute suggestions for the current text.
    pub fn input(&mut self, raw: &str) -> Response<Suggestions<'s>> {
        let generation = self.issue();
        let suggestions = self.engine.suggest(raw);

        self.state = if self.engine.needle(raw).is_some() {
            SearchState::Suggesting {
                query: suggestions.query.clone(),
            }
        } else {
            SearchState::Idle
        };

        debug!(generation = generation.value(), state = ?self.state, "search input");
        Response {
            generation,
            payload: suggestions,
        }
    }

    /// Enter or an explicit trigger: run the full search.
    pub fn submit(&mut self, raw: &str) -> Response<SearchOutcome<'s>> {
        let generation = self.issue();
        let outcome = self.engine.search(raw);

        self.state = match &outcome {
            SearchOutcome::TooShort => SearchState::Idle,
            SearchOutcome::NoResults { query } => SearchState::Committed {
                query: query.clone(),
            },
            SearchOutcome::Found(results) => SearchState::Committed {
                query: results.query.clone(),
            },
        };

        debug!(generation = generation.value(), state = ?self.state, "search submit");
        Response {
            generation,
            payload: outcome,
        }
    }

    /// Escape: back to idle. Anything still in flight becomes stale.
    pub fn cancel(&mut self) -> Generation {
        self.state = SearchState::Idle;
        self.issue()
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.latest
    }

    /// The payload of `response`, or `None` if a newer request was issued
    /// after it.
    pub fn accept<T>(&self, response: Response<T>) -> Option<T> {
        if self.is_current(response.generation) {
            Some(response.payload)
        } else {
            debug!(
                stale = response.generation.value(),
                latest = self.latest.value(),
                "discarding stale search response"
            );
            None
        }
    }
}
