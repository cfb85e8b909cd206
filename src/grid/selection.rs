//! Cross-page row-identity ledger.
//!
//! Selection tracks row-key values, not row objects, so an identity selected
//! on page 2 survives paging away and back. What consumers *see* is narrower:
//! the payload is always intersected with the currently loaded page (see
//! `DataGridCore::selection_payload`), so an identity from an unloaded page
//! stays in the ledger but out of the payload until its page is reloaded.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

/// Whether the grid allows one selected row or many.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    #[default]
    Multiple,
}

/// Ordered set of selected row identities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionLedger {
    pub mode: SelectionMode,
    ids: Vec<String>,
}

impl SelectionLedger {
    #[must_use]
    pub fn new(mode: SelectionMode) -> Self {
        Self { mode, ids: Vec::new() }
    }

    /// Add or remove one identity. In [`SelectionMode::Single`], adding a row
    /// clears every other selection first.
    pub fn select_row(&mut self, id: &str, included: bool) {
        if included {
            if self.mode == SelectionMode::Single {
                self.ids.clear();
            }
            if !self.is_selected(id) {
                self.ids.push(id.to_owned());
            }
        } else {
            self.ids.retain(|existing| existing != id);
        }
    }

    /// Select or deselect every row on the currently loaded page.
    ///
    /// This is page-scoped on purpose: it does not touch identities from
    /// other pages (when selecting) and never means "all rows matching the
    /// filter". In single mode only the first page identity is kept.
    pub fn select_all(&mut self, page_ids: &[String], included: bool) {
        if included {
            match self.mode {
                SelectionMode::Single => {
                    self.ids.clear();
                    if let Some(first) = page_ids.first() {
                        self.ids.push(first.clone());
                    }
                }
                SelectionMode::Multiple => {
                    for id in page_ids {
                        if !self.is_selected(id) {
                            self.ids.push(id.clone());
                        }
                    }
                }
            }
        } else {
            self.ids.retain(|id| !page_ids.contains(id));
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Every selected identity, in selection order, loaded or not.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
