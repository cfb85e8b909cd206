//! The per-grid state holder tying the controller pieces together.
//!
//! [`DataGridCore`] owns the committed [`QueryState`], the selection ledger,
//! and the most recently loaded page, and exposes the named transitions plus
//! the fetch lifecycle (`begin_request` / `apply_response`). It has no
//! browser dependencies, so the full controller — including the
//! stale-response discard — is testable natively. The Leptos component wraps
//! one of these in a signal and fans each [`StateChange`] out to the URL bar
//! and the transport.
//!
//! Responses are sequence-stamped: `begin_request` hands out a monotonically
//! increasing number and `apply_response` discards anything that is not the
//! latest issued, so the displayed page always corresponds to the most
//! recently committed query even when responses resolve out of order.

#[cfg(test)]
#[path = "core_test.rs"]
mod core_test;

use serde_json::Value;

use super::columns::ColumnDescriptor;
use super::fetch::{self, FetchConfig, FetchError, FetchResult};
use super::filter::FilterValue;
use super::query::{QueryState, SortDirection, StateChange};
use super::selection::{SelectionLedger, SelectionMode};
use super::stats::{self, ColumnStatistic};
use super::url;

/// Default rows per page when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Controller state for one grid instance.
///
/// Single-writer: only the owning widget mutates it, and only through the
/// methods here.
pub struct DataGridCore {
    pub columns: Vec<ColumnDescriptor>,
    pub config: FetchConfig,
    /// Field whose value identifies a row across pages and fetches.
    pub row_key: String,
    pub query: QueryState,
    pub selection: SelectionLedger,

    /// The loaded page; replaced wholesale by each successful fetch.
    pub rows: Vec<Value>,
    pub total: u64,
    pub stats: Vec<ColumnStatistic>,
    pub error: Option<String>,
    pub loading: bool,

    default_page_size: u32,
    latest_seq: u64,
    fetched_once: bool,
}

impl DataGridCore {
    #[must_use]
    pub fn new(
        columns: Vec<ColumnDescriptor>,
        config: FetchConfig,
        row_key: impl Into<String>,
    ) -> Self {
        let query = QueryState::new(&columns, DEFAULT_PAGE_SIZE);
        Self {
            columns,
            config,
            row_key: row_key.into(),
            query,
            selection: SelectionLedger::default(),
            rows: Vec::new(),
            total: 0,
            stats: Vec::new(),
            error: None,
            loading: false,
            default_page_size: DEFAULT_PAGE_SIZE,
            latest_seq: 0,
            fetched_once: false,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size.max(1);
        self.query.page_size = self.default_page_size;
        self
    }

    #[must_use]
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection = SelectionLedger::new(mode);
        self
    }

    // --- Query transitions (delegated to the store) ---

    pub fn set_page(&mut self, page: u32) -> StateChange {
        self.query.set_page(page)
    }

    pub fn set_page_size(&mut self, page_size: u32) -> StateChange {
        self.query.set_page_size(page_size)
    }

    pub fn set_sort(&mut self, column: Option<String>, direction: SortDirection) -> StateChange {
        self.query.set_sort(column, direction)
    }

    pub fn toggle_sort(&mut self, key: &str) -> StateChange {
        self.query.toggle_sort(&self.columns, key)
    }

    pub fn set_search(&mut self, term: impl Into<String>) -> StateChange {
        self.query.set_search(term)
    }

    pub fn set_filter(&mut self, key: &str, value: Option<FilterValue>) -> StateChange {
        self.query.set_filter(&self.columns, key, value)
    }

    pub fn toggle_column_visibility(&mut self, key: &str) -> StateChange {
        self.query.toggle_column_visibility(&self.columns, key)
    }

    // --- Selection transitions ---

    pub fn select_row(&mut self, id: &str, included: bool) -> StateChange {
        self.selection.select_row(id, included);
        StateChange::Selection
    }

    /// Select or deselect every row on the loaded page (and only that page).
    pub fn select_all(&mut self, included: bool) -> StateChange {
        let page_ids = self.page_ids();
        self.selection.select_all(&page_ids, included);
        StateChange::Selection
    }

    pub fn clear_selection(&mut self) -> StateChange {
        self.selection.clear();
        StateChange::Selection
    }

    // --- Fetch lifecycle ---

    /// The page the next request will actually ask for.
    ///
    /// Once a total is known, the committed page is clamped into
    /// `[1, page_count]` here — at fetch time, never eagerly in the store.
    #[must_use]
    pub fn effective_page(&self) -> u32 {
        if !self.fetched_once {
            return self.query.page;
        }
        let count = u32::try_from(self.page_count()).unwrap_or(u32::MAX);
        self.query.page.clamp(1, count.max(1))
    }

    /// Pages in the remote result set under the current page size (at least 1).
    #[must_use]
    pub fn page_count(&self) -> u64 {
        (self.total.div_ceil(u64::from(self.query.page_size))).max(1)
    }

    /// Stamp and describe the next request.
    ///
    /// Returns the sequence number to pass back to [`apply_response`] and the
    /// full request URL for the committed state.
    pub fn begin_request(&mut self) -> (u64, String) {
        self.latest_seq += 1;
        self.loading = true;
        let url = fetch::request_url(&self.config, &self.query, self.effective_page());
        (self.latest_seq, url)
    }

    /// Reconcile a response for request `seq`.
    ///
    /// Returns `false` when the response is stale (a newer request has been
    /// issued since) and was discarded without touching any state. On success
    /// the page is replaced wholesale and the column statistics recomputed; on
    /// failure the page is cleared and the message exposed. No retry either
    /// way.
    pub fn apply_response(&mut self, seq: u64, outcome: Result<Value, FetchError>) -> bool {
        if seq != self.latest_seq {
            return false;
        }
        self.loading = false;
        self.fetched_once = true;
        match outcome {
            Ok(body) => {
                let FetchResult { rows, total } = fetch::reconcile(&body, &self.config);
                self.rows = rows;
                self.total = total;
                self.stats = stats::compute(&self.columns, &self.rows);
                self.error = None;
            }
            Err(err) => {
                self.rows.clear();
                self.total = 0;
                self.stats.clear();
                self.error = Some(err.to_string());
            }
        }
        true
    }

    // --- Location string ---

    /// Encode the committed state for the location bar (no leading `?`).
    #[must_use]
    pub fn location_query(&self) -> String {
        url::encode(&self.query, &self.columns, self.default_page_size, &self.config.params)
    }

    /// Adopt state from a location query string, field-by-field tolerant.
    pub fn apply_location_query(&mut self, query: &str) {
        self.query = url::decode(query, &self.columns, self.default_page_size, &self.config.params);
    }

    // --- Row identity and selection payload ---

    /// A row's identity: the stringified value of the configured row-key field.
    #[must_use]
    pub fn row_id(&self, row: &Value) -> Option<String> {
        match row.get(&self.row_key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Identities of every row on the loaded page, in page order.
    #[must_use]
    pub fn page_ids(&self) -> Vec<String> {
        self.rows.iter().filter_map(|row| self.row_id(row)).collect()
    }

    /// The consumer-visible selection: ledger identities intersected with the
    /// loaded page. An identity selected on a page that is no longer loaded
    /// stays in the ledger but does not appear here until its page reloads.
    #[must_use]
    pub fn selection_payload(&self) -> Vec<&Value> {
        self.rows
            .iter()
            .filter(|row| {
                self.row_id(row).is_some_and(|id| self.selection.is_selected(&id))
            })
            .collect()
    }

    /// Whether every row on the loaded page is selected (header checkbox state).
    #[must_use]
    pub fn page_fully_selected(&self) -> bool {
        let ids = self.page_ids();
        !ids.is_empty() && ids.iter().all(|id| self.selection.is_selected(id))
    }
}
