//! Column sorting.
//!
//! Each header carries a tri-state flag: never sorted, ascending or
//! descending. Only one header is active at a time; sorting a column resets
//! every other header to neutral.

use crate::row::{compare_values, Row};

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

impl SortOrder {
    /// The icon shown next to a header in this state. `None` is the neutral
    /// two-way arrow.
    pub fn icon(order: Option<SortOrder>) -> &'static str {
        match order {
            None => "⇅",
            Some(SortOrder::Ascending) => "▲",
            Some(SortOrder::Descending) => "▼",
        }
    }
}

/// Per-header sort flags, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sorters {
    entries: Vec<(String, Option<SortOrder>)>,
}

impl Sorters {
    /// Creates neutral flags for every header.
    pub fn new(headers: &[String]) -> Self {
        Self {
            entries: headers.iter().map(|h| (h.clone(), None)).collect(),
        }
    }

    /// The flag of `header`. Unknown headers read as neutral.
    pub fn get(&self, header: &str) -> Option<SortOrder> {
        self.entries
            .iter()
            .find(|(h, _)| h == header)
            .and_then(|(_, order)| *order)
    }

    /// Returns true if `header` has a flag.
    pub fn contains(&self, header: &str) -> bool {
        self.entries.iter().any(|(h, _)| h == header)
    }

    /// The currently active header and its direction, if any.
    pub fn active(&self) -> Option<(&str, SortOrder)> {
        self.entries
            .iter()
            .find_map(|(h, order)| order.map(|o| (h.as_str(), o)))
    }

    /// Iterates over all headers and their flags.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<SortOrder>)> {
        self.entries.iter().map(|(h, order)| (h.as_str(), *order))
    }

    /// Sets every flag to neutral, except `keep` when given.
    pub fn reset(&mut self, keep: Option<&str>) {
        for (h, order) in &mut self.entries {
            if keep != Some(h.as_str()) {
                *order = None;
            }
        }
    }

    /// Makes `header` the only active column, in the given direction.
    /// Returns false if `header` is unknown.
    pub fn activate(&mut self, header: &str, order: SortOrder) -> bool {
        if !self.contains(header) {
            return false;
        }
        for (h, slot) in &mut self.entries {
            *slot = (h == header).then_some(order);
        }
        true
    }

    /// The direction the next sort of `header` uses: ascending from neutral
    /// or descending, descending from ascending.
    pub fn next_order(&self, header: &str) -> SortOrder {
        match self.get(header) {
            Some(SortOrder::Ascending) => SortOrder::Descending,
            None | Some(SortOrder::Descending) => SortOrder::Ascending,
        }
    }
}

/// Stable sort of `rows` by the value under `key`.
///
/// Rows with equal values keep their relative order in both directions.
pub fn sort_rows(rows: &mut [Row], key: &str, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ord = compare_values(a.get(key), b.get(key));
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}
