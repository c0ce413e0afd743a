//! Reliability Estimator (MTBF)
//!
//! Computes mean-time-between-failure statistics from the validated event
//! log. Gaps are measured between successive events for the same component
//! on the same asset, then aggregated across all assets per component.
//!
//! Data-entry noise is filtered, not repaired: a gap of zero or negative
//! days (two reports on the same day, or out-of-order entry) is discarded
//! from the statistic. A component whose every gap was discarded still
//! appears in the output with an undefined mean — "no historical gap" must
//! stay distinguishable from "mean gap is zero".

use crate::types::{MaintenanceEvent, ReliabilityRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Compute per-component reliability records from the full event set.
///
/// Steps: group by (asset, component) → sort ascending by date → successor
/// gaps in days (the last event of a group contributes none) → discard
/// gaps <= 0 → re-group by component alone → mean (1 decimal) + count.
pub fn compute_reliability(
    events: &[MaintenanceEvent],
) -> BTreeMap<String, ReliabilityRecord> {
    // Group event dates by (asset, component)
    let mut groups: BTreeMap<(&str, &str), Vec<NaiveDate>> = BTreeMap::new();
    for event in events {
        groups
            .entry((event.asset_id.as_str(), event.component_name.as_str()))
            .or_default()
            .push(event.event_date);
    }

    // Surviving gaps per component, aggregated across assets. Every
    // component seen in the log gets an entry, gaps or not.
    let mut gaps_by_component: BTreeMap<&str, Vec<i64>> = BTreeMap::new();
    for ((_, component), mut dates) in groups {
        dates.sort_unstable();
        let gaps = gaps_by_component.entry(component).or_default();
        for pair in dates.windows(2) {
            let days = (pair[1] - pair[0]).num_days();
            if days > 0 {
                gaps.push(days);
            }
        }
    }

    gaps_by_component
        .into_iter()
        .map(|(component, gaps)| {
            let mean = if gaps.is_empty() {
                None
            } else {
                let raw = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
                Some((raw * 10.0).round() / 10.0)
            };
            (
                component.to_string(),
                ReliabilityRecord {
                    component_name: component.to_string(),
                    mean_interval_days: mean,
                    sample_count: gaps.len(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(asset: &str, comp: &str, y: i32, m: u32, d: u32) -> MaintenanceEvent {
        MaintenanceEvent {
            asset_id: asset.to_string(),
            component_name: comp.to_string(),
            event_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    #[test]
    fn test_gap_mean_and_count() {
        // days 0, 10, 25 → gaps {10, 15} → mean 12.5, count 2
        let events = vec![
            event("KM-01", "Seawater Pump", 2024, 1, 1),
            event("KM-01", "Seawater Pump", 2024, 1, 11),
            event("KM-01", "Seawater Pump", 2024, 1, 26),
        ];
        let records = compute_reliability(&events);
        let record = &records["Seawater Pump"];
        assert_eq!(record.mean_interval_days, Some(12.5));
        assert_eq!(record.sample_count, 2);
    }

    #[test]
    fn test_single_event_component_has_undefined_mean() {
        let events = vec![event("KM-01", "Radar", 2024, 6, 1)];
        let records = compute_reliability(&events);
        let record = &records["Radar"];
        assert_eq!(record.mean_interval_days, None);
        assert_eq!(record.sample_count, 0);
    }

    #[test]
    fn test_zero_and_negative_gaps_excluded() {
        // duplicate-day report plus an ordinary 10-day gap; unsorted input
        let events = vec![
            event("KM-01", "Main Engine", 2024, 1, 11),
            event("KM-01", "Main Engine", 2024, 1, 1),
            event("KM-01", "Main Engine", 2024, 1, 1),
        ];
        let records = compute_reliability(&events);
        let record = &records["Main Engine"];
        assert_eq!(record.mean_interval_days, Some(10.0));
        assert_eq!(record.sample_count, 1);
    }

    #[test]
    fn test_gaps_never_cross_assets() {
        // same component on two vessels: gaps computed per asset, then
        // aggregated per component
        let events = vec![
            event("KM-01", "Seawater Pump", 2024, 1, 1),
            event("KM-01", "Seawater Pump", 2024, 1, 21), // gap 20
            event("KM-02", "Seawater Pump", 2024, 1, 2),
            event("KM-02", "Seawater Pump", 2024, 1, 12), // gap 10
        ];
        let records = compute_reliability(&events);
        let record = &records["Seawater Pump"];
        assert_eq!(record.mean_interval_days, Some(15.0));
        assert_eq!(record.sample_count, 2);
    }

    #[test]
    fn test_mean_rounded_to_one_decimal() {
        // gaps {10, 11, 11} → 10.666… → 10.7
        let events = vec![
            event("KM-01", "Compressor", 2024, 1, 1),
            event("KM-01", "Compressor", 2024, 1, 11),
            event("KM-01", "Compressor", 2024, 1, 22),
            event("KM-01", "Compressor", 2024, 2, 2),
        ];
        let records = compute_reliability(&events);
        assert_eq!(records["Compressor"].mean_interval_days, Some(10.7));
    }

    #[test]
    fn test_empty_input() {
        let records = compute_reliability(&[]);
        assert!(records.is_empty());
    }
}
