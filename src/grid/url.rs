//! Shareable location-string codec for [`QueryState`].
//!
//! Encoding writes only the fields that differ from the default view, so a
//! fresh grid produces a bare path with no query string at all. Decoding is
//! tolerant field-by-field: absent or malformed pieces fall back to defaults
//! instead of failing, so a stale or hand-edited link still loads. Selection
//! is deliberately never encoded; it is per-session state.

#[cfg(test)]
#[path = "url_test.rs"]
mod url_test;

use super::columns::ColumnDescriptor;
use super::fetch::ParamNames;
use super::filter::FilterValue;
use super::query::{QueryState, SortDirection};

/// Encode a committed state as a query string (no leading `?`).
///
/// A default state encodes to the empty string.
#[must_use]
pub fn encode(
    state: &QueryState,
    columns: &[ColumnDescriptor],
    default_page_size: u32,
    names: &ParamNames,
) -> String {
    let mut params: Vec<(String, String)> = Vec::new();
    if state.page != 1 {
        params.push((names.page.clone(), state.page.to_string()));
    }
    if state.page_size != default_page_size {
        params.push((names.page_size.clone(), state.page_size.to_string()));
    }
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
    if !state.all_columns_visible(columns) {
        params.push(("visibleColumns".to_owned(), state.visible_columns.join(",")));
    }
    encode_pairs(&params)
}

/// Decode a query string (with or without a leading `?`) into a state.
///
/// Every field degrades independently: unparseable numbers, unknown sort
/// columns, and unknown visible-column keys all fall back to the default.
#[must_use]
pub fn decode(
    query: &str,
    columns: &[ColumnDescriptor],
    default_page_size: u32,
    names: &ParamNames,
) -> QueryState {
    let mut state = QueryState::new(columns, default_page_size);
    let pairs = decode_pairs(query.strip_prefix('?').unwrap_or(query));
    let get = |name: &str| -> Option<String> {
        pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    };

    if let Some(page) = get(&names.page).and_then(|v| v.parse().ok()) {
        state.page = 1.max(page);
    }
    if let Some(size) = get(&names.page_size).and_then(|v| v.parse::<u32>().ok()) {
        if size > 0 {
            state.page_size = size;
        }
    }
    if let Some(sort) = get(&names.sort_column) {
        if super::columns::find(columns, &sort).is_some() {
            state.sort_column = Some(sort);
            state.sort_direction = get(&names.sort_direction)
                .map(|v| SortDirection::parse(&v))
                .unwrap_or_default();
        }
    }
    if let Some(search) = get(&names.search) {
        state.search = search;
    }
    for column in columns.iter().filter(|c| c.filterable) {
        if let Some(filter) = FilterValue::from_params(column, &get) {
            if filter.is_active() {
                state.filters.insert(column.key.clone(), filter);
            }
        }
    }
    if let Some(visible) = get("visibleColumns") {
        let requested: Vec<&str> = visible.split(',').collect();
        let kept: Vec<String> = columns
            .iter()
            .map(|c| c.key.clone())
            .filter(|k| requested.iter().any(|r| r == k))
            .collect();
        if !kept.is_empty() {
            state.visible_columns = kept;
        }
    }
    state
}

// --- Query-string plumbing ---
//
// Shared with the fetch orchestrator's request URLs. Percent-encoding covers
// exactly the RFC 3986 unreserved set; decoding also accepts `+` for space.

/// Join `key=value` pairs with `&`, percent-encoding both sides.
#[must_use]
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Split a query string into decoded `key=value` pairs, skipping empty chunks.
#[must_use]
pub fn decode_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let (k, v) = chunk.split_once('=').unwrap_or((chunk, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            // Needs two hex digits after the escape; otherwise pass through.
            if let Some(hex) = raw.get(i + 1..i + 3) {
                if let Ok(byte) = u8::from_str_radix(hex, 16) {
                    out.push(byte);
                    i += 3;
                    continue;
                }
            }
        }
        if bytes[i] == b'+' {
            out.push(b' ');
        } else {
            out.push(bytes[i]);
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
