// src/domain/filter.rs

use crate::domain::listing::{Column, FocusArea, Listing};
use std::collections::{BTreeMap, BTreeSet};

/// Query-string prefix for substring predicates, e.g. `q_organization=prairie`.
const TEXT_PREFIX: &str = "q_";

/// The active predicates of one view. All predicates are ANDed together.
///
/// - `text`: column must contain the string, ignoring case. Empty string is no constraint.
/// - `sets`: column must equal one of the values. Empty set is no constraint.
/// - `flags`: a `true` entry requires the tag; `false` is no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub text: BTreeMap<Column, String>,
    pub sets: BTreeMap<Column, BTreeSet<String>>,
    pub flags: BTreeMap<FocusArea, bool>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(mut self, column: Column, needle: impl Into<String>) -> Self {
        self.text.insert(column, needle.into());
        self
    }

    pub fn one_of<I, S>(mut self, column: Column, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets
            .entry(column)
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn require(mut self, area: FocusArea) -> Self {
        self.flags.insert(area, true);
        self
    }

    /// True when no predicate constrains anything.
    pub fn is_empty(&self) -> bool {
        self.text.values().all(|s| s.is_empty())
            && self.sets.values().all(|s| s.is_empty())
            && self.flags.values().all(|f| !f)
    }

    pub fn text_for(&self, column: Column) -> &str {
        self.text.get(&column).map(String::as_str).unwrap_or("")
    }

    pub fn is_selected(&self, column: Column, value: &str) -> bool {
        self.sets
            .get(&column)
            .map(|s| s.contains(value))
            .unwrap_or(false)
    }

    pub fn is_required(&self, area: FocusArea) -> bool {
        self.flags.get(&area).copied().unwrap_or(false)
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        let text_ok = self.text.iter().all(|(column, needle)| {
            if needle.is_empty() {
                return true;
            }
            let needle = needle.to_lowercase();
            listing
                .column_value(*column)
                .map(|value| value.to_lowercase().contains(&needle))
                .unwrap_or(false)
        });

        let sets_ok = self.sets.iter().all(|(column, accepted)| {
            accepted.is_empty()
                || listing
                    .column_value(*column)
                    .map(|value| accepted.contains(value))
                    .unwrap_or(false)
        });

        let flags_ok = self
            .flags
            .iter()
            .all(|(area, required)| !required || listing.has(*area));

        text_ok && sets_ok && flags_ok
    }

    /// Build from decoded query pairs. Unknown keys are ignored.
    pub fn from_query<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = FilterSet::new();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());

            if let Some(column) = key.strip_prefix(TEXT_PREFIX).and_then(Column::from_field) {
                let value = value.trim();
                if !value.is_empty() {
                    filters.text.insert(column, value.to_string());
                }
            } else if let Some(column) = Column::from_field(key) {
                if !value.is_empty() {
                    filters
                        .sets
                        .entry(column)
                        .or_default()
                        .insert(value.to_string());
                }
            } else if let Some(area) = FocusArea::from_field(key) {
                if matches!(value, "on" | "true" | "1") {
                    filters.flags.insert(area, true);
                }
            }
        }
        filters
    }

    /// Encode the active predicates back into a query string (no leading `?`).
    pub fn to_query(&self) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        for (column, needle) in &self.text {
            if !needle.is_empty() {
                ser.append_pair(&format!("{TEXT_PREFIX}{}", column.field()), needle);
            }
        }
        for (column, values) in &self.sets {
            for value in values {
                ser.append_pair(column.field(), value);
            }
        }
        for (area, required) in &self.flags {
            if *required {
                ser.append_pair(area.field(), "on");
            }
        }
        ser.finish()
    }
}

/// Rows matching every active predicate, in table order.
pub fn apply<'a>(rows: &'a [Listing], filters: &FilterSet) -> Vec<&'a Listing> {
    rows.iter().filter(|l| filters.matches(l)).collect()
}

/// Sorted distinct non-empty values of a column, for building option lists.
pub fn distinct_values(rows: &[Listing], column: Column) -> Vec<String> {
    rows.iter()
        .filter_map(|l| l.column_value(column))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
