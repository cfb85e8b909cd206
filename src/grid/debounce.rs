//! Commit gate that coalesces rapid-fire raw input.
//!
//! Keystrokes must not each trigger a fetch, so raw values pass through a
//! per-channel debounce: every new value replaces the channel's pending value
//! and restarts the quiet window, and only the value still pending when the
//! window elapses is committed to the store. The gate itself owns no timers —
//! [`CommitGate::submit`] hands back a [`Ticket`], the caller schedules a
//! callback `window_ms` out (in the browser, a `gloo_timers` timeout), and
//! [`CommitGate::fire`] honors the ticket only if no newer submit superseded
//! it. That generation-token design keeps the whole contract testable without
//! a clock.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::collections::HashMap;

use super::filter::FilterValue;

/// Quiet window for search and filter input.
pub const DEBOUNCE_WINDOW_MS: u32 = 400;

/// Shortest non-empty search term considered meaningful.
///
/// Anything shorter is suppressed as "not yet a valid term" and never reaches
/// the store. The empty string is the exception: it commits, clearing the
/// filter, through the same window as any other value.
pub const MIN_TERM_LEN: usize = 3;

/// A raw value heading for the store once its window elapses.
#[derive(Clone, Debug, PartialEq)]
pub enum GateInput {
    /// The universal search term.
    Search(String),
    /// One column's filter; `None` clears it.
    Filter { column: String, value: Option<FilterValue> },
}

/// A logical input channel: the universal search box, or one column's filter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Channel {
    Search,
    Column(String),
}

impl GateInput {
    fn channel(&self) -> Channel {
        match self {
            Self::Search(_) => Channel::Search,
            Self::Filter { column, .. } => Channel::Column(column.clone()),
        }
    }

    /// The text term inside, if this is a text-shaped input.
    fn term(&self) -> Option<&str> {
        match self {
            Self::Search(term) => Some(term),
            Self::Filter { value: Some(FilterValue::Text(term)), .. } => Some(term),
            Self::Filter { .. } => None,
        }
    }
}

/// Proof that a commit was scheduled; redeemed via [`CommitGate::fire`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    channel: Channel,
    generation: u64,
}

#[derive(Debug, Default)]
struct ChannelState {
    generation: u64,
    pending: Option<GateInput>,
}

/// Per-grid debounce state across all input channels.
#[derive(Debug)]
pub struct CommitGate {
    window_ms: u32,
    channels: HashMap<Channel, ChannelState>,
}

impl Default for CommitGate {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitGate {
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW_MS)
    }

    #[must_use]
    pub fn with_window(window_ms: u32) -> Self {
        Self { window_ms, channels: HashMap::new() }
    }

    /// How long the caller should wait before firing a ticket.
    #[must_use]
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Accept a raw value.
    ///
    /// Always invalidates any commit previously scheduled for the same
    /// channel. Returns a ticket to fire `window_ms` from now, or `None` when
    /// the value is suppressed outright (a non-empty text term shorter than
    /// [`MIN_TERM_LEN`]). Range filters are never length-suppressed.
    pub fn submit(&mut self, input: GateInput) -> Option<Ticket> {
        let channel = input.channel();
        let state = self.channels.entry(channel.clone()).or_default();
        state.generation += 1;

        if let Some(term) = input.term() {
            let len = term.chars().count();
            if len > 0 && len < MIN_TERM_LEN {
                state.pending = None;
                return None;
            }
        }

        state.pending = Some(input);
        Some(Ticket { channel, generation: state.generation })
    }

    /// Redeem a ticket whose window has elapsed.
    ///
    /// Yields the value to commit, or `None` if a newer submit on the same
    /// channel superseded the ticket.
    pub fn fire(&mut self, ticket: &Ticket) -> Option<GateInput> {
        let state = self.channels.get_mut(&ticket.channel)?;
        if state.generation != ticket.generation {
            return None;
        }
        state.pending.take()
    }
}
