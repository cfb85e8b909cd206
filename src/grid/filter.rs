//! Typed per-column filter values and their codecs.
//!
//! A [`FilterValue`] is the committed filter for one column: a text term, a
//! date range, or a number range, matching the column's declared
//! [`ColumnType`](crate::grid::columns::ColumnType). This module converts
//! between raw user input and the typed value, and between the typed value and
//! the query-string parameters the remote endpoint understands
//! (`{key}`, `{key}_start`/`{key}_end`, `{key}_min`/`{key}_max`).

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::columns::{ColumnDescriptor, ColumnType};

/// The committed filter value for a single column.
///
/// At most one shape exists per column; holding any populated shape makes the
/// filter "active" for query and URL purposes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
    /// Substring term for text-ish columns.
    Text(String),
    /// Inclusive date range; either end may be open.
    DateRange {
        start: Option<DateTime<FixedOffset>>,
        end: Option<DateTime<FixedOffset>>,
    },
    /// Inclusive numeric range.
    NumberRange { min: f64, max: f64 },
}

impl FilterValue {
    /// Whether this value actually constrains the result set.
    ///
    /// An empty text term or a fully open date range is inert and is treated
    /// the same as no filter at all.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Text(term) => !term.is_empty(),
            Self::DateRange { start, end } => start.is_some() || end.is_some(),
            Self::NumberRange { .. } => true,
        }
    }

    /// Build the typed value for `column` from raw text input.
    ///
    /// Returns `None` when the input is empty or unparseable for the declared
    /// type — callers treat that as "clear the filter". Range types expect the
    /// two-endpoint constructors instead; a raw string against a range column
    /// parses as a single-ended range where it can.
    #[must_use]
    pub fn from_input(column: &ColumnDescriptor, raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match column.column_type {
            ColumnType::Text | ColumnType::Custom => Some(Self::Text(raw.to_owned())),
            ColumnType::Number => {
                let n: f64 = raw.parse().ok()?;
                Some(Self::NumberRange { min: n, max: n })
            }
            ColumnType::Date => {
                let d = parse_date(raw)?;
                Some(Self::DateRange { start: Some(d), end: Some(d) })
            }
        }
    }

    /// Build a date-range value from two raw endpoint strings.
    ///
    /// Unparseable endpoints become open ends; two open ends mean no filter.
    #[must_use]
    pub fn date_range(start_raw: &str, end_raw: &str) -> Option<Self> {
        let start = parse_date(start_raw.trim());
        let end = parse_date(end_raw.trim());
        if start.is_none() && end.is_none() {
            return None;
        }
        Some(Self::DateRange { start, end })
    }

    /// Build a numeric range, normalizing a reversed pair.
    #[must_use]
    pub fn number_range(a: f64, b: f64) -> Self {
        Self::NumberRange { min: a.min(b), max: a.max(b) }
    }

    /// Query-string parameters this filter contributes, keyed off the column key.
    #[must_use]
    pub fn query_params(&self, key: &str) -> Vec<(String, String)> {
        match self {
            Self::Text(term) => {
                if term.is_empty() {
                    Vec::new()
                } else {
                    vec![(key.to_owned(), term.clone())]
                }
            }
            Self::DateRange { start, end } => {
                let mut params = Vec::new();
                if let Some(s) = start {
                    params.push((format!("{key}_start"), s.to_rfc3339()));
                }
                if let Some(e) = end {
                    params.push((format!("{key}_end"), e.to_rfc3339()));
                }
                params
            }
            Self::NumberRange { min, max } => vec![
                (format!("{key}_min"), format_number(*min)),
                (format!("{key}_max"), format_number(*max)),
            ],
        }
    }

    /// Reconstruct a filter for `column` from decoded URL parameters.
    ///
    /// `get` looks up a parameter by name. Malformed pieces degrade to open
    /// ends (dates) or drop the filter (numbers) rather than failing.
    #[must_use]
    pub fn from_params(
        column: &ColumnDescriptor,
        get: &dyn Fn(&str) -> Option<String>,
    ) -> Option<Self> {
        let key = &column.key;
        match column.column_type {
            ColumnType::Text | ColumnType::Custom => {
                let term = get(key)?;
                if term.is_empty() { None } else { Some(Self::Text(term)) }
            }
            ColumnType::Date => {
                let start = get(&format!("{key}_start")).and_then(|s| parse_date(&s));
                let end = get(&format!("{key}_end")).and_then(|s| parse_date(&s));
                if start.is_none() && end.is_none() {
                    None
                } else {
                    Some(Self::DateRange { start, end })
                }
            }
            ColumnType::Number => {
                let min: f64 = get(&format!("{key}_min"))?.parse().ok()?;
                let max: f64 = get(&format!("{key}_max"))?.parse().ok()?;
                Some(Self::number_range(min, max))
            }
        }
    }
}

/// Parse a date endpoint: RFC 3339 first, then a bare `YYYY-MM-DD` (taken as
/// midnight UTC).
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(midnight.and_utc().fixed_offset())
}

/// Decimal text without a trailing `.0` for whole values.
fn format_number(n: f64) -> String {
    format!("{n}")
}
