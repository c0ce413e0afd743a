//! Activity Summary
//!
//! Per-component maintenance activity pivoted by calendar year, with the
//! year-over-year trend the report layer merges against MTBF when
//! recommending stock actions.

use crate::types::{ComponentActivity, MaintenanceEvent, Trend};
use chrono::Datelike;
use std::collections::BTreeMap;

/// Pivot the event log into per-component yearly counts over the full
/// observed year range (zero-filled), with totals and trend direction.
/// Result is sorted by total descending, then by name for determinism.
pub fn component_activity(events: &[MaintenanceEvent]) -> Vec<ComponentActivity> {
    if events.is_empty() {
        return Vec::new();
    }

    let mut per_component: BTreeMap<&str, BTreeMap<i32, u32>> = BTreeMap::new();
    let mut min_year = i32::MAX;
    let mut max_year = i32::MIN;
    for event in events {
        let year = event.event_date.year();
        min_year = min_year.min(year);
        max_year = max_year.max(year);
        *per_component
            .entry(event.component_name.as_str())
            .or_default()
            .entry(year)
            .or_insert(0) += 1;
    }

    let mut activities: Vec<ComponentActivity> = per_component
        .into_iter()
        .map(|(component, by_year)| {
            let yearly_counts: Vec<(i32, u32)> = (min_year..=max_year)
                .map(|y| (y, by_year.get(&y).copied().unwrap_or(0)))
                .collect();
            let total = yearly_counts.iter().map(|(_, c)| c).sum();

            // latest year vs the one before; a single observed year has no
            // trend to speak of
            let trend_delta = if yearly_counts.len() >= 2 {
                let latest = yearly_counts[yearly_counts.len() - 1].1 as i64;
                let previous = yearly_counts[yearly_counts.len() - 2].1 as i64;
                latest - previous
            } else {
                0
            };
            let trend = match trend_delta {
                d if d > 0 => Trend::Rising,
                d if d < 0 => Trend::Falling,
                _ => Trend::Stable,
            };

            ComponentActivity {
                component_name: component.to_string(),
                yearly_counts,
                total,
                trend_delta,
                trend,
            }
        })
        .collect();

    activities.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.component_name.cmp(&b.component_name))
    });
    activities
}
