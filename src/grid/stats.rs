//! Per-column min/max over the currently loaded page.
//!
//! These statistics feed range-filter widgets their slider bounds. They are
//! page-scoped, not dataset-wide: the bounds track whatever rows are loaded
//! right now and shift as pages and filters change. That imprecision is the
//! documented behavior, kept as-is.

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;

use serde_json::Value;

use super::columns::{ColumnDescriptor, ColumnType};

/// Derived numeric bounds for one column on the loaded page.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnStatistic {
    pub column: String,
    pub min: f64,
    pub max: f64,
}

/// Compute statistics for every Number-typed column over `rows`.
///
/// Values that are missing or not numbers are ignored. A column with zero
/// numeric values on the page gets no entry at all — consumers must treat an
/// absent statistic as "no bound available", never as `[0, 0]`.
#[must_use]
pub fn compute(columns: &[ColumnDescriptor], rows: &[Value]) -> Vec<ColumnStatistic> {
    columns
        .iter()
        .filter(|c| c.column_type == ColumnType::Number)
        .filter_map(|column| {
            let mut bounds: Option<(f64, f64)> = None;
            for row in rows {
                let Some(n) = row.get(&column.key).and_then(Value::as_f64) else {
                    continue;
                };
                bounds = Some(match bounds {
                    None => (n, n),
                    Some((min, max)) => (min.min(n), max.max(n)),
                });
            }
            bounds.map(|(min, max)| ColumnStatistic { column: column.key.clone(), min, max })
        })
        .collect()
}

/// Look up one column's statistic.
#[must_use]
pub fn find<'a>(stats: &'a [ColumnStatistic], key: &str) -> Option<&'a ColumnStatistic> {
    stats.iter().find(|s| s.column == key)
}
