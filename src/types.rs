//! Shared data structures for the spare-parts & maintenance analytics pipeline
//!
//! This module defines the core types flowing between the three pipelines:
//! - Classification: raw description string → ClassifiedItem (structured inventory record)
//! - Reliability: MaintenanceEvent → ReliabilityRecord (per-component MTBF)
//! - Forecasting: monthly counts → ForecastSeries (predictions + backtest)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fallback category label for descriptions with no keyword hit.
///
/// Downstream reports and the master-table round trip depend on the
/// literal value.
pub const UNCATEGORIZED: &str = "LAIN-LAIN";

// ============================================================================
// Classification
// ============================================================================

/// Structured record produced by classifying one free-text item description.
///
/// All fields are always present; the empty string is the "absent" sentinel.
/// Immutable output of a pure function — classifying the same input twice
/// yields identical results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    /// Equipment category from the ordered registry, or [`UNCATEGORIZED`]
    pub category: String,
    /// Longest registered brand found in the description, or empty
    pub brand: String,
    /// Extracted part number (marker pattern or first-token heuristic), or empty
    pub part_number: String,
    /// Comma-joined recognized spec tokens (dimensions, quantities, ratings),
    /// deduplicated, longest first
    pub specification: String,
    /// Reassembled display name: category, descriptive remainder, spec,
    /// brand, part number — empty parts omitted
    pub canonical_name: String,
}

impl ClassifiedItem {
    /// All-empty result with the fallback category. Returned for absent or
    /// empty input instead of an error.
    pub fn uncategorized() -> Self {
        Self {
            category: UNCATEGORIZED.to_string(),
            brand: String::new(),
            part_number: String::new(),
            specification: String::new(),
            canonical_name: String::new(),
        }
    }
}

// ============================================================================
// Maintenance events
// ============================================================================

/// One raw maintenance job-report row as read from the tabular export.
/// The report date is still a string at this point; [`crate::loader`]
/// parses it and drops rows it cannot parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawJobRow {
    pub asset_id: String,
    pub component_name: String,
    pub report_date: String,
}

/// A validated maintenance event. `event_date` parsed successfully;
/// rows that failed date parsing never become events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceEvent {
    pub asset_id: String,
    pub component_name: String,
    pub event_date: NaiveDate,
}

// ============================================================================
// Reliability (MTBF)
// ============================================================================

/// Per-component reliability statistics aggregated across all assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityRecord {
    pub component_name: String,
    /// Mean of the surviving positive inter-event gaps, rounded to one
    /// decimal. `None` when no gap survived — "no historical gap" is a
    /// different fact than "mean gap is zero".
    pub mean_interval_days: Option<f64>,
    /// Number of gap observations that survived filtering
    pub sample_count: usize,
}

// ============================================================================
// Forecasting
// ============================================================================

/// One calendar month of the aggregated event series. `month` is the first
/// day of the month; gap-filled entries carry a zero count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub month: NaiveDate,
    pub count: u32,
}

/// Backtest accuracy over the held-out tail of the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestMetrics {
    pub mean_absolute_error: f64,
    pub root_mean_squared_error: f64,
    /// MAE divided by the mean of the held-out actuals; `None` when that
    /// mean is zero
    pub normalized_mae: Option<f64>,
}

/// Reporting aid derived from the normalized backtest error. Forecasts are
/// returned in all three bands — this is not a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccuracyBand {
    /// normalized error < 0.2
    High,
    /// normalized error < 0.5 — data is volatile
    Moderate,
    /// normalized error >= 0.5, or undefined — high uncertainty
    Low,
}

impl AccuracyBand {
    /// Band from the normalized backtest error. An undefined error (held-out
    /// mean was zero) reports as the highest-uncertainty band.
    pub fn from_normalized_error(err: Option<f64>) -> Self {
        match err {
            Some(e) if e < 0.2 => Self::High,
            Some(e) if e < 0.5 => Self::Moderate,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high accuracy",
            Self::Moderate => "moderate accuracy, data is volatile",
            Self::Low => "low accuracy / high uncertainty",
        }
    }
}

impl std::fmt::Display for AccuracyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Forward forecast for one component, with interval bounds and the
/// backtest accuracy computed before the final fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub component_name: String,
    /// Gap-filled monthly history the model was fitted on
    pub history: Vec<MonthCount>,
    /// Point predictions for the requested horizon, floored at zero
    pub predicted_counts: Vec<f64>,
    /// Lower interval bound per horizon step, floored at zero
    pub lower_bound: Vec<f64>,
    /// Upper interval bound per horizon step
    pub upper_bound: Vec<f64>,
    pub backtest: BacktestMetrics,
    pub accuracy: AccuracyBand,
}

/// Why a forecast was refused or aborted. Surfaced to the caller — the
/// forecaster never substitutes a default forecast for a failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ForecastFailure {
    /// Fewer observed (non-gap-filled) months than the model needs
    #[error("insufficient history: {observed_months} months with events (need {required})")]
    InsufficientHistory {
        observed_months: usize,
        required: usize,
    },
    /// The event set for the component is empty after filtering
    #[error("no valid events for component")]
    EmptySeries,
    /// Numerical failure while fitting — degenerate series, singular
    /// normal equations, non-convergence
    #[error("model fit failed: {cause}")]
    ModelFit { cause: String },
}

// ============================================================================
// Activity summary
// ============================================================================

/// Year-over-year direction of maintenance activity for one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Rising => write!(f, "RISING"),
            Trend::Falling => write!(f, "FALLING"),
            Trend::Stable => write!(f, "STABLE"),
        }
    }
}

/// Per-component maintenance activity pivoted by calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentActivity {
    pub component_name: String,
    /// (year, job count) over the full observed year range, zero-filled
    pub yearly_counts: Vec<(i32, u32)>,
    pub total: u32,
    /// Latest year count minus the previous year's
    pub trend_delta: i64,
    pub trend: Trend,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_band_thresholds() {
        assert_eq!(AccuracyBand::from_normalized_error(Some(0.1)), AccuracyBand::High);
        assert_eq!(AccuracyBand::from_normalized_error(Some(0.2)), AccuracyBand::Moderate);
        assert_eq!(AccuracyBand::from_normalized_error(Some(0.49)), AccuracyBand::Moderate);
        assert_eq!(AccuracyBand::from_normalized_error(Some(0.5)), AccuracyBand::Low);
        assert_eq!(AccuracyBand::from_normalized_error(None), AccuracyBand::Low);
    }

    #[test]
    fn test_uncategorized_item_is_all_empty() {
        let item = ClassifiedItem::uncategorized();
        assert_eq!(item.category, UNCATEGORIZED);
        assert!(item.brand.is_empty());
        assert!(item.part_number.is_empty());
        assert!(item.specification.is_empty());
        assert!(item.canonical_name.is_empty());
    }

    #[test]
    fn test_forecast_failure_display() {
        let f = ForecastFailure::InsufficientHistory { observed_months: 9, required: 10 };
        assert_eq!(
            f.to_string(),
            "insufficient history: 9 months with events (need 10)"
        );
    }
}
