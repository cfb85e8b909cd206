//! HTTP transport and location-bar sync.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` and history updates
//! via `web-sys`. Server-side (SSR): stubs, since both are only meaningful in
//! the browser.
//!
//! Failures come back as [`FetchError`] values rather than panics so a dead
//! endpoint degrades the grid to an error banner without crashing hydration.

#![allow(clippy::unused_async)]

use serde_json::Value;

use crate::grid::FetchError;

/// Issue a GET against `url` with the caller's headers sent verbatim.
///
/// # Errors
///
/// [`FetchError::Transport`] when no response was produced,
/// [`FetchError::Status`] on a non-success status.
pub async fn fetch_json(url: &str, headers: &[(String, String)]) -> Result<Value, FetchError> {
    #[cfg(feature = "hydrate")]
    {
        let mut request = gloo_net::http::Request::get(url);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        let resp = request
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if !resp.ok() {
            return Err(FetchError::Status(resp.status()));
        }
        resp.json::<Value>()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, headers);
        Err(FetchError::Transport("not available on server".to_owned()))
    }
}

/// Mirror a committed state into the location bar without navigating.
///
/// `query` is the encoded query string with no leading `?`; empty means the
/// bare path. Uses `history.replaceState` so sharing the URL reproduces the
/// view but typing does not pollute the back stack.
pub fn replace_location_query(query: &str) {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else { return };
        let Ok(path) = window.location().pathname() else { return };
        let url = if query.is_empty() { path } else { format!("{path}?{query}") };
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(
                &wasm_bindgen::JsValue::NULL,
                "",
                Some(&url),
            );
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = query;
    }
}

/// The current location's query string, `?` stripped. Empty on the server.
#[must_use]
pub fn current_location_query() -> String {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .map(|s| s.trim_start_matches('?').to_owned())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}
