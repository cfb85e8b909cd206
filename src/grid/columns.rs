#[cfg(test)]
#[path = "columns_test.rs"]
mod columns_test;

/// Declared value type of a column, driving which filter shape it accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnType {
    /// Free text; filtered by substring term.
    #[default]
    Text,
    /// Numeric; filtered by an inclusive `[min, max]` range.
    Number,
    /// Date/time; filtered by an optional-ended date range.
    Date,
    /// Caller-rendered; behaves as text for search/filter purposes.
    Custom,
}

/// An immutable column declaration supplied by the caller.
///
/// The `key` names the field read out of each row record; it is also the base
/// name for the column's query-string parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub key: String,
    pub label: String,
    pub column_type: ColumnType,
    pub sortable: bool,
    pub searchable: bool,
    pub filterable: bool,
}

impl ColumnDescriptor {
    /// A column with every capability disabled; enable with the chained setters.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            column_type,
            sortable: false,
            searchable: false,
            filterable: false,
        }
    }

    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    #[must_use]
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }
}

/// Look up a declared column by key.
#[must_use]
pub fn find<'a>(columns: &'a [ColumnDescriptor], key: &str) -> Option<&'a ColumnDescriptor> {
    columns.iter().find(|c| c.key == key)
}
