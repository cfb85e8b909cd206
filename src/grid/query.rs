//! The committed query state and its named transitions.
//!
//! [`QueryState`] is the single source of truth for what the grid asks the
//! remote endpoint for: page, page size, sort, universal search, per-column
//! filters, and the visible-column set. All mutation goes through the named
//! transition functions so that URL sync and fetch triggering stay
//! centralized; each transition reports a [`StateChange`] telling the caller
//! what to fan out.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::columns::{ColumnDescriptor, ColumnType};
use super::filter::FilterValue;

/// Sort order for the active sort column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse a direction, defaulting to ascending on anything unrecognized.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") { Self::Desc } else { Self::Asc }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// What a transition changed, driving fan-out.
///
/// `Query` changes re-trigger the fetch and rewrite the location string;
/// `View` changes only rewrite the location string; `Selection` changes do
/// neither. `None` means the transition was a no-op (e.g. a filter for an
/// undeclared column) and nothing should happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateChange {
    None,
    Query,
    View,
    Selection,
}

/// Everything that controls which rows are requested and displayed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryState {
    /// 1-based page number. Clamped against the known total only at the next
    /// fetch, never eagerly.
    pub page: u32,
    pub page_size: u32,
    pub sort_column: Option<String>,
    pub sort_direction: SortDirection,
    /// Universal search term applied across searchable columns.
    pub search: String,
    /// Active per-column filters, keyed by column key.
    pub filters: BTreeMap<String, FilterValue>,
    /// Visible column keys in declared order. Defaults to every declared column.
    pub visible_columns: Vec<String>,
}

impl QueryState {
    /// The default view over `columns`: page 1, no sort, no search, no
    /// filters, every column visible.
    #[must_use]
    pub fn new(columns: &[ColumnDescriptor], page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            sort_column: None,
            sort_direction: SortDirection::Asc,
            search: String::new(),
            filters: BTreeMap::new(),
            visible_columns: columns.iter().map(|c| c.key.clone()).collect(),
        }
    }

    // --- Transitions ---

    /// Jump to a page. The only result-set transition that does not reset the
    /// page to 1.
    pub fn set_page(&mut self, page: u32) -> StateChange {
        self.page = page.max(1);
        StateChange::Query
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&mut self, page_size: u32) -> StateChange {
        self.page_size = page_size.max(1);
        self.page = 1;
        StateChange::Query
    }

    /// Set (or clear, with `None`) the sort column and direction.
    pub fn set_sort(&mut self, column: Option<String>, direction: SortDirection) -> StateChange {
        self.sort_column = column;
        self.sort_direction = direction;
        self.page = 1;
        StateChange::Query
    }

    /// Header-click behavior: first click sorts ascending, a second click on
    /// the same column flips the direction. Non-sortable columns are ignored.
    pub fn toggle_sort(&mut self, columns: &[ColumnDescriptor], key: &str) -> StateChange {
        let Some(column) = super::columns::find(columns, key) else {
            return StateChange::None;
        };
        if !column.sortable {
            return StateChange::None;
        }
        let direction = if self.sort_column.as_deref() == Some(key) {
            self.sort_direction.flipped()
        } else {
            SortDirection::Asc
        };
        self.set_sort(Some(key.to_owned()), direction)
    }

    /// Replace the universal search term and return to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) -> StateChange {
        self.search = term.into();
        self.page = 1;
        StateChange::Query
    }

    /// Set (or clear, with `None`) one column's filter and return to the first
    /// page. The column must be declared filterable and the value's shape must
    /// match its declared type; anything else is a no-op.
    pub fn set_filter(
        &mut self,
        columns: &[ColumnDescriptor],
        key: &str,
        value: Option<FilterValue>,
    ) -> StateChange {
        let Some(column) = super::columns::find(columns, key) else {
            return StateChange::None;
        };
        if !column.filterable {
            return StateChange::None;
        }
        match value {
            Some(v) if !shape_matches(column.column_type, &v) => StateChange::None,
            Some(v) if v.is_active() => {
                self.filters.insert(key.to_owned(), v);
                self.page = 1;
                StateChange::Query
            }
            // Inert values (empty term, fully open range) clear like `None`.
            _ => {
                let removed = self.filters.remove(key).is_some();
                if removed {
                    self.page = 1;
                    StateChange::Query
                } else {
                    StateChange::None
                }
            }
        }
    }

    /// Show or hide one declared column. Never touches the page.
    pub fn toggle_column_visibility(
        &mut self,
        columns: &[ColumnDescriptor],
        key: &str,
    ) -> StateChange {
        if super::columns::find(columns, key).is_none() {
            return StateChange::None;
        }
        if let Some(pos) = self.visible_columns.iter().position(|k| k == key) {
            self.visible_columns.remove(pos);
        } else {
            // Re-insert in declared order, not at the end.
            let kept: Vec<String> = columns
                .iter()
                .map(|c| c.key.as_str())
                .filter(|k| *k == key || self.visible_columns.iter().any(|v| v == *k))
                .map(ToOwned::to_owned)
                .collect();
            self.visible_columns = kept;
        }
        StateChange::View
    }

    // --- Queries ---

    #[must_use]
    pub fn is_visible(&self, key: &str) -> bool {
        self.visible_columns.iter().any(|k| k == key)
    }

    /// Whether every declared column is visible (the default view).
    #[must_use]
    pub fn all_columns_visible(&self, columns: &[ColumnDescriptor]) -> bool {
        self.visible_columns.len() == columns.len()
    }
}

/// Whether a filter value's shape is legal for a column of `column_type`.
fn shape_matches(column_type: ColumnType, value: &FilterValue) -> bool {
    match column_type {
        ColumnType::Number => matches!(value, FilterValue::NumberRange { .. }),
        ColumnType::Date => matches!(value, FilterValue::DateRange { .. }),
        ColumnType::Text | ColumnType::Custom => matches!(value, FilterValue::Text(_)),
    }
}
