//! Derived statistics — pure, synchronous, deterministic given the entry
//! list and a wall-clock instant. Nothing here is persisted or stateful.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::entry::Entry;

const DAY_MS: i64 = 86_400_000;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total: u64,
    pub this_week: u64,
    /// Percentage change of this week versus the week before (days 8–14
    /// back). `None` when the prior week's sum is 0 — never Inf or NaN.
    pub week_trend: Option<f64>,
    pub total_weight_grams: u64,
    pub avg_per_day: f64,
    pub entry_count: usize,
    pub top_sauce: Option<String>,
}

/// Aggregates the dashboard metrics over `entries` as of `now`, with the
/// configured grams-per-nugget constant.
///
/// Top-sauce ties break by first-encountered-in-iteration-order: among
/// equally frequent sauces, the one seen first across the entry list wins.
/// This is an explicit rule, kept stable for display purposes.
pub fn compute_stats(entries: &[Entry], now: DateTime<Utc>, weight_per_unit: u32) -> DashboardStats {
    let total: u64 = entries.iter().map(|e| u64::from(e.count)).sum();

    let week_ago = now - Duration::days(7);
    let two_weeks_ago = now - Duration::days(14);

    let this_week: u64 = entries
        .iter()
        .filter(|e| e.created_at >= week_ago)
        .map(|e| u64::from(e.count))
        .sum();
    let last_week: u64 = entries
        .iter()
        .filter(|e| e.created_at >= two_weeks_ago && e.created_at < week_ago)
        .map(|e| u64::from(e.count))
        .sum();

    let week_trend = if last_week > 0 {
        let this_week = this_week as f64;
        let last_week = last_week as f64;
        Some((this_week - last_week) / last_week * 100.0)
    } else {
        None
    };

    // Average per day since the first entry; at least one day so a fresh
    // account never divides by zero.
    let days_since_first = entries
        .iter()
        .map(|e| e.created_at)
        .min()
        .map(|earliest| ((now - earliest).num_milliseconds() / DAY_MS).max(1))
        .unwrap_or(1);
    let avg_per_day = total as f64 / days_since_first as f64;

    DashboardStats {
        total,
        this_week,
        week_trend,
        total_weight_grams: total * u64::from(weight_per_unit),
        avg_per_day,
        entry_count: entries.len(),
        top_sauce: top_sauce(entries),
    }
}

fn top_sauce(entries: &[Entry]) -> Option<String> {
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    let mut next_seen = 0usize;
    for entry in entries {
        for sauce in &entry.sauces {
            if sauce.is_empty() {
                continue;
            }
            let slot = counts.entry(sauce.as_str()).or_insert_with(|| {
                let seen = next_seen;
                next_seen += 1;
                (0, seen)
            });
            slot.0 += 1;
        }
    }

    let mut best: Option<(&str, u64, usize)> = None;
    for (sauce, (freq, first_seen)) in &counts {
        let better = match best {
            None => true,
            Some((_, best_freq, best_seen)) => {
                *freq > best_freq || (*freq == best_freq && *first_seen < best_seen)
            }
        };
        if better {
            best = Some((*sauce, *freq, *first_seen));
        }
    }
    best.map(|(sauce, _, _)| sauce.to_string())
}

/// Sorted distinct sauce list across all entries, for the filter dropdown.
pub fn unique_sauces(entries: &[Entry]) -> Vec<String> {
    let mut sauces: Vec<String> = Vec::new();
    for entry in entries {
        for sauce in &entry.sauces {
            if !sauce.is_empty() && !sauces.iter().any(|s| s == sauce) {
                sauces.push(sauce.clone());
            }
        }
    }
    sauces.sort();
    sauces
}
