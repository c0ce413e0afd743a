//! Sparecast: Marine Spare-Parts & Maintenance Analytics
//!
//! Analytics core for cleaning raw spare-parts inventory exports and
//! computing maintenance reliability statistics across a vessel fleet.
//!
//! ## Architecture
//!
//! - **Classifier**: parses free-text equipment descriptions into
//!   structured records (brand, category, part number, specification)
//! - **Reliability Estimator**: per-component MTBF from the maintenance
//!   job log
//! - **Trend Forecaster**: backtested seasonal ARIMA forecast of monthly
//!   maintenance activity
//! - **Activity Summary**: yearly pivot with year-over-year trend flags
//!
//! The three pipelines are independent, synchronous, and side-effect-free;
//! only their result tables are merged for reporting, which is the report
//! layer's concern.

pub mod classifier;
pub mod config;
pub mod forecast;
pub mod loader;
pub mod patterns;
pub mod reliability;
pub mod summary;
pub mod types;

// Re-export configuration
pub use config::{Config, ForecastSettings, RegistryConfig};

// Re-export commonly used types
pub use types::{
    AccuracyBand, BacktestMetrics, ClassifiedItem, ComponentActivity, ForecastFailure,
    ForecastSeries, MaintenanceEvent, MonthCount, RawJobRow, ReliabilityRecord, Trend,
    UNCATEGORIZED,
};

// Re-export the pipeline entry points
pub use classifier::Classifier;
pub use forecast::{monthly_counts, Forecaster};
pub use loader::{parse_events, ParsedEvents};
pub use patterns::{PatternError, PatternLibrary};
pub use reliability::compute_reliability;
pub use summary::component_activity;
