//! Widget toolkit for data-heavy application screens, centered on a remote
//! data grid.
//!
//! The interesting machinery lives in [`grid`]: a browser-free controller that
//! turns user intent (typed search terms, header clicks, filter edits, page
//! flips) into a well-ordered sequence of queries against a paginated remote
//! record source, while keeping selection, URL-shareable state, and per-column
//! statistics consistent as the data set changes shape between requests. The
//! Leptos component layer in [`components`] and the browser transport in
//! [`net`] are thin wrappers over that core.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`grid`] | Data-grid controller: query state, codecs, fetch orchestration |
//! | [`net`] | Browser-side HTTP transport and location sync (`hydrate` only) |
//! | [`components`] | Leptos widgets wiring signals to the controller |

pub mod components;
pub mod grid;
pub mod net;
