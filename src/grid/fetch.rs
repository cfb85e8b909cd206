//! Request building and tolerant response reconciliation.
//!
//! The orchestrator half that is independent of any HTTP client lives here:
//! turning a committed [`QueryState`] into query-string parameters, and
//! turning whatever JSON the endpoint returned into a `{rows, total}` pair via
//! an ordered chain of extraction strategies. The actual GET is performed by
//! `crate::net::http` in the browser and by test doubles natively; both feed
//! the raw body back through [`reconcile`].

#[cfg(test)]
#[path = "fetch_test.rs"]
mod fetch_test;

use serde_json::Value;

use super::query::QueryState;

/// Error surfaced to the grid when a fetch fails.
///
/// Either kind clears the loaded page; neither is retried automatically — the
/// next committed state change retries implicitly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (network failure, CORS, abort).
    #[error("request failed: {0}")]
    Transport(String),
    /// The endpoint answered with a non-success status.
    #[error("server returned status {0}")]
    Status(u16),
}

/// Caller-overridable names for the standard query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamNames {
    pub page: String,
    pub page_size: String,
    pub sort_column: String,
    pub sort_direction: String,
    pub search: String,
}

impl Default for ParamNames {
    fn default() -> Self {
        Self {
            page: "page".to_owned(),
            page_size: "pageSize".to_owned(),
            sort_column: "sortColumn".to_owned(),
            sort_direction: "sortDirection".to_owned(),
            search: "search".to_owned(),
        }
    }
}

/// Where and how to fetch: endpoint, verbatim headers, parameter names, and
/// the dot-paths used to pull `rows` and `total` out of the response body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    pub endpoint: String,
    /// Sent verbatim on every request (e.g. bearer tokens). No auth logic
    /// lives in the controller itself.
    pub headers: Vec<(String, String)>,
    pub params: ParamNames,
    /// Dot-path to the row array in the response body.
    pub data_path: String,
    /// Dot-path to the total record count in the response body.
    pub total_path: String,
}

impl FetchConfig {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            headers: Vec::new(),
            params: ParamNames::default(),
            data_path: "data".to_owned(),
            total_path: "total".to_owned(),
        }
    }
}

/// One reconciled page of remote data. Replaces the previous page wholesale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FetchResult {
    pub rows: Vec<Value>,
    pub total: u64,
}

/// Build the full parameter list for a committed state.
///
/// `page` is the effective (clamped) page supplied by the caller; sort and
/// search parameters are present only when set, and each active column filter
/// contributes its own parameters.
#[must_use]
pub fn build_params(config: &FetchConfig, state: &QueryState, page: u32) -> Vec<(String, String)> {
    let names = &config.params;
    let mut params = vec![
        (names.page.clone(), page.to_string()),
        (names.page_size.clone(), state.page_size.to_string()),
    ];
    if let Some(sort) = &state.sort_column {
        params.push((names.sort_column.clone(), sort.clone()));
        params.push((names.sort_direction.clone(), state.sort_direction.as_str().to_owned()));
    }
    if !state.search.is_empty() {
        params.push((names.search.clone(), state.search.clone()));
    }
    for (key, filter) in &state.filters {
        params.extend(filter.query_params(key));
    }
    params
}

/// The request URL for a committed state: endpoint plus encoded parameters.
#[must_use]
pub fn request_url(config: &FetchConfig, state: &QueryState, page: u32) -> String {
    let query = super::url::encode_pairs(&build_params(config, state, page));
    if query.is_empty() {
        config.endpoint.clone()
    } else {
        format!("{}?{query}", config.endpoint)
    }
}

/// Reconcile an arbitrary response body into `{rows, total}`.
///
/// Extraction strategies, tried in order:
/// 1. the body itself is an array — rows are the body, total its length;
/// 2. rows from the configured `data_path`, then `data`, `results`, `items`;
///    failing all of those, an object body is taken as a single-row page;
/// 3. total from the configured `total_path`, then `total`, `totalRecords`,
///    `count`; failing those, the extracted row count.
///
/// Nothing in this chain raises an error: the most permissive interpretation
/// wins.
#[must_use]
pub fn reconcile(body: &Value, config: &FetchConfig) -> FetchResult {
    if let Value::Array(rows) = body {
        return FetchResult { rows: rows.clone(), total: rows.len() as u64 };
    }

    let rows = [config.data_path.as_str(), "data", "results", "items"]
        .iter()
        .find_map(|path| lookup_path(body, path)?.as_array().cloned())
        .unwrap_or_else(|| {
            // Last resort: an object body is a page of one.
            if body.is_object() { vec![body.clone()] } else { Vec::new() }
        });

    let total = [config.total_path.as_str(), "total", "totalRecords", "count"]
        .iter()
        .find_map(|path| number_at(body, path))
        .unwrap_or(rows.len() as u64);

    FetchResult { rows, total }
}

/// Follow a dot-separated path into a JSON body.
#[must_use]
pub fn lookup_path<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = body;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

fn number_at(body: &Value, path: &str) -> Option<u64> {
    match lookup_path(body, path)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        // Some endpoints quote their counts.
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
