//! Client-side filter/sort view-model over an entry list. Pure: produces a
//! new ordered list without touching the source.

use serde::Deserialize;

use crate::models::entry::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filters by sauce membership (when given), then sorts by the requested
/// key. The sort is stable: entries with equal keys keep their relative
/// order from the input.
pub fn filtered_entries(
    entries: &[Entry],
    sort_by: SortKey,
    order: SortOrder,
    filter_sauce: Option<&str>,
) -> Vec<Entry> {
    let mut result: Vec<Entry> = entries
        .iter()
        .filter(|e| match filter_sauce {
            Some(sauce) => e.sauces.iter().any(|s| s == sauce),
            None => true,
        })
        .cloned()
        .collect();

    result.sort_by(|a, b| {
        let ordering = match sort_by {
            SortKey::Date => a.created_at.cmp(&b.created_at),
            SortKey::Count => a.count.cmp(&b.count),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    result
}
