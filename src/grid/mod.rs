//! The remote data-grid controller.
//!
//! Everything in this module is plain Rust with no browser dependencies, so
//! the whole state machine — transitions, codecs, fetch reconciliation, the
//! debounce gate — is testable natively. The browser layer (`crate::net`,
//! `crate::components`) only schedules timers, performs the actual HTTP GET,
//! and mirrors committed state into the location bar.
//!
//! | Module | Role |
//! |--------|------|
//! | [`columns`] | Column declarations supplied by the caller |
//! | [`filter`] | Typed per-column filter values and their codecs |
//! | [`query`] | Committed query state and its named transitions |
//! | [`url`] | Shareable location-string codec |
//! | [`debounce`] | Commit gate coalescing rapid-fire raw input |
//! | [`fetch`] | Request building and tolerant response reconciliation |
//! | [`selection`] | Cross-page row-identity ledger |
//! | [`stats`] | Per-column min/max over the loaded page |
//! | [`core`] | [`core::DataGridCore`], the per-grid state holder |

pub mod columns;
pub mod core;
pub mod debounce;
pub mod fetch;
pub mod filter;
pub mod query;
pub mod selection;
pub mod stats;
pub mod url;

pub use columns::{ColumnDescriptor, ColumnType};
pub use self::core::DataGridCore;
pub use debounce::{CommitGate, GateInput, DEBOUNCE_WINDOW_MS};
pub use fetch::{FetchConfig, FetchError, FetchResult, ParamNames};
pub use filter::FilterValue;
pub use query::{QueryState, SortDirection, StateChange};
pub use selection::{SelectionLedger, SelectionMode};
pub use stats::ColumnStatistic;
