//! Dashboard views over the evaluation dataset
//!
//! The filtered list and the summary stats are pure functions of the store
//! and the current query. [`Dashboard`] only owns the query state and
//! recomputes views when asked, so a view can never be stale.
//!
//! # Example
//!
//! ```ignore
//! let mut dashboard = Dashboard::new(store);
//! dashboard.set_search_term("clueso");
//! dashboard.toggle_category("AI Video Editing");
//!
//! for record in dashboard.visible() {
//!     println!("{}", record.tool_name);
//! }
//! ```

pub mod filter;
pub mod presentation;
pub mod stats;

pub use filter::{filter, FilterQuery, StatusFilter};
pub use stats::{aggregate, EvaluationStats};

use crate::example_output::{self, ExampleLink};
use crate::store::DataStore;
use crate::types::{EvaluationRecord, RecordId};

/// A record together with its parsed example links
#[derive(Debug, Clone)]
pub struct RecordDetail<'a> {
    pub record: &'a EvaluationRecord,
    pub examples: Vec<ExampleLink>,
}

/// Query state holder for a browsing session
#[derive(Debug, Clone)]
pub struct Dashboard {
    store: DataStore,
    query: FilterQuery,
}

impl Dashboard {
    pub fn new(store: DataStore) -> Self {
        Self {
            store,
            query: FilterQuery::default(),
        }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    pub fn set_query(&mut self, query: FilterQuery) {
        self.query = query;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
    }

    pub fn toggle_category(&mut self, category: &str) {
        self.query.toggle_category(category);
    }

    pub fn clear_categories(&mut self) {
        self.query.clear_categories();
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.query.status = status;
    }

    /// Records matching the current query
    pub fn visible(&self) -> Vec<&EvaluationRecord> {
        filter(self.store.records(), &self.query)
    }

    /// Summary over the whole dataset, independent of the query
    pub fn stats(&self) -> EvaluationStats {
        aggregate(self.store.records())
    }

    pub fn detail(&self, id: &RecordId) -> Option<RecordDetail<'_>> {
        self.store.get(id).map(|record| RecordDetail {
            record,
            examples: example_output::parse(record.example_output.as_ref()),
        })
    }
}
