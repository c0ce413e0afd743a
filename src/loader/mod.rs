//! Maintenance Event Loading & Data Quality
//!
//! Turns raw job-report rows into validated [`MaintenanceEvent`]s. The
//! exports use day-first date formats with frequent noise (blanks, text in
//! the date column, jobs that were never reported done), so parsing is
//! lenient: rows whose date cannot be parsed are excluded from every
//! downstream analysis, counted, and logged — never fatal to the batch.

use crate::types::{MaintenanceEvent, RawJobRow};
use chrono::NaiveDate;
use tracing::warn;

/// Day-first formats tried in order, then ISO. The job-log exports mix
/// all four.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y", "%Y-%m-%d"];

/// Result of a bulk load: the valid events plus data-quality accounting.
#[derive(Debug, Clone)]
pub struct ParsedEvents {
    pub events: Vec<MaintenanceEvent>,
    /// Rows excluded because their date failed to parse
    pub rejected: usize,
}

/// Parse a report date string, trying each known format.
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Validate a batch of raw rows. Rows with unparseable dates are dropped
/// and counted; a single bad row never aborts the batch.
pub fn parse_events(rows: &[RawJobRow]) -> ParsedEvents {
    let mut events = Vec::with_capacity(rows.len());
    let mut rejected = 0usize;

    for row in rows {
        match parse_report_date(&row.report_date) {
            Some(event_date) => events.push(MaintenanceEvent {
                asset_id: row.asset_id.clone(),
                component_name: row.component_name.clone(),
                event_date,
            }),
            None => rejected += 1,
        }
    }

    if rejected > 0 {
        warn!(
            rejected = rejected,
            total = rows.len(),
            "dropped rows with unparseable report dates"
        );
    }

    ParsedEvents { events, rejected }
}
