//! Trend Forecaster
//!
//! Monthly aggregation + backtested seasonal ARIMA forecasting for one
//! component's maintenance activity.
//!
//! Pipeline per request:
//! 1. Aggregate events into a strictly monthly series, every calendar month
//!    in range present, missing months zero-filled (the model assumes
//!    fixed-period sampling with no gaps)
//! 2. Refuse with `InsufficientHistory` when fewer than the configured
//!    number of months actually contain events
//! 3. Backtest: hold out the final months, fit on the log1p-transformed
//!    head, forecast the holdout, score MAE / RMSE / normalized MAE against
//!    the actuals
//! 4. Refit on the full log1p series and forecast the requested horizon
//!    with interval bounds, everything inverse-transformed with expm1 and
//!    floored at zero
//!
//! The model architecture is fixed — ARIMA(1,1,1) with seasonal (1,0,1) at
//! period 12 — and deliberately not auto-selected; see `sarima`.

pub mod sarima;

use crate::config::{Config, ForecastSettings};
use crate::types::{
    AccuracyBand, BacktestMetrics, ForecastFailure, ForecastSeries, MaintenanceEvent, MonthCount,
};
use chrono::{Datelike, NaiveDate};
use statrs::distribution::{ContinuousCDF, Normal};
use std::collections::BTreeMap;
use tracing::debug;

pub use sarima::{ModelError, SeasonalArima, SEASONAL_PERIOD};

/// Aggregate events into a gap-free monthly count series. Months between
/// the first and last event with no activity appear with a zero count.
/// Returns an empty series for an empty event set.
pub fn monthly_counts(events: &[MaintenanceEvent]) -> Vec<MonthCount> {
    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for event in events {
        *counts.entry(first_of_month(event.event_date)).or_insert(0) += 1;
    }

    let (Some(&first), Some(&last)) = (
        counts.keys().next(),
        counts.keys().next_back(),
    ) else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut month = first;
    loop {
        series.push(MonthCount {
            month,
            count: counts.get(&month).copied().unwrap_or(0),
        });
        if month == last {
            break;
        }
        month = next_month(month);
    }
    series
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // day 1 of an existing date's month always exists
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn next_month(month: NaiveDate) -> NaiveDate {
    let (y, m) = if month.month() == 12 {
        (month.year() + 1, 1)
    } else {
        (month.year(), month.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(month)
}

/// Forecaster over injected settings. Stateless between calls.
pub struct Forecaster {
    settings: ForecastSettings,
}

impl Forecaster {
    pub fn new(settings: ForecastSettings) -> Self {
        Self { settings }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.forecast.clone())
    }

    /// Forecast one component straight from the shared event log. Events
    /// for other components are ignored.
    pub fn forecast_component(
        &self,
        component_name: &str,
        events: &[MaintenanceEvent],
        horizon: usize,
    ) -> Result<ForecastSeries, ForecastFailure> {
        let own: Vec<MaintenanceEvent> = events
            .iter()
            .filter(|e| e.component_name == component_name)
            .cloned()
            .collect();
        let series = monthly_counts(&own);
        self.forecast_series(component_name, &series, horizon)
    }

    /// Forecast from an already-aggregated monthly series.
    pub fn forecast_series(
        &self,
        component_name: &str,
        series: &[MonthCount],
        horizon: usize,
    ) -> Result<ForecastSeries, ForecastFailure> {
        if series.is_empty() {
            return Err(ForecastFailure::EmptySeries);
        }

        // Months that actually contain events — zero-filled gaps don't
        // count toward history.
        let observed_months = series.iter().filter(|c| c.count > 0).count();
        if observed_months < self.settings.min_history_months {
            return Err(ForecastFailure::InsufficientHistory {
                observed_months,
                required: self.settings.min_history_months,
            });
        }

        let counts: Vec<f64> = series.iter().map(|c| f64::from(c.count)).collect();
        let log_series: Vec<f64> = counts.iter().map(|&c| c.ln_1p()).collect();

        // Backtest on the held-out tail.
        let holdout = self.settings.backtest_holdout_months.min(log_series.len() - 1);
        let split = log_series.len() - holdout;
        let backtest = self.run_backtest(&log_series[..split], &counts[split..])?;
        let accuracy = AccuracyBand::from_normalized_error(backtest.normalized_mae);

        debug!(
            component = component_name,
            mae = backtest.mean_absolute_error,
            rmse = backtest.root_mean_squared_error,
            accuracy = %accuracy,
            "backtest complete"
        );

        // Final fit on the full series.
        let mut model = SeasonalArima::new(SEASONAL_PERIOD);
        model.fit(&log_series).map_err(model_failure)?;
        let log_forecast = model.forecast(horizon).map_err(model_failure)?;

        let z = interval_quantile(self.settings.interval_confidence)?;
        let sigma = model.sigma();

        let mut predicted = Vec::with_capacity(horizon);
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for (step, &point) in log_forecast.iter().enumerate() {
            // interval widens as sqrt(h) in log space — random-walk growth
            // for a once-differenced model
            let spread = z * sigma * ((step + 1) as f64).sqrt();
            predicted.push(point.exp_m1().max(0.0));
            lower.push((point - spread).exp_m1().max(0.0));
            upper.push((point + spread).exp_m1().max(0.0));
        }

        Ok(ForecastSeries {
            component_name: component_name.to_string(),
            history: series.to_vec(),
            predicted_counts: predicted,
            lower_bound: lower,
            upper_bound: upper,
            backtest,
            accuracy,
        })
    }

    /// Fit on the training head, forecast the holdout, score against the
    /// actual counts.
    fn run_backtest(
        &self,
        train_log: &[f64],
        actual_counts: &[f64],
    ) -> Result<BacktestMetrics, ForecastFailure> {
        let mut model = SeasonalArima::new(SEASONAL_PERIOD);
        model.fit(train_log).map_err(model_failure)?;
        let log_forecast = model.forecast(actual_counts.len()).map_err(model_failure)?;

        let predictions: Vec<f64> = log_forecast.iter().map(|v| v.exp_m1().max(0.0)).collect();

        let n = actual_counts.len() as f64;
        let mae = predictions
            .iter()
            .zip(actual_counts)
            .map(|(p, a)| (p - a).abs())
            .sum::<f64>()
            / n;
        let rmse = (predictions
            .iter()
            .zip(actual_counts)
            .map(|(p, a)| (p - a) * (p - a))
            .sum::<f64>()
            / n)
            .sqrt();
        let actual_mean = actual_counts.iter().sum::<f64>() / n;
        let normalized_mae = (actual_mean > 0.0).then(|| mae / actual_mean);

        Ok(BacktestMetrics {
            mean_absolute_error: mae,
            root_mean_squared_error: rmse,
            normalized_mae,
        })
    }
}

fn model_failure(e: ModelError) -> ForecastFailure {
    ForecastFailure::ModelFit {
        cause: e.to_string(),
    }
}

/// Two-sided normal quantile for the configured confidence level.
fn interval_quantile(confidence: f64) -> Result<f64, ForecastFailure> {
    let normal = Normal::new(0.0, 1.0).map_err(|e| ForecastFailure::ModelFit {
        cause: e.to_string(),
    })?;
    let p = 0.5 + confidence.clamp(0.0, 0.9999) / 2.0;
    Ok(normal.inverse_cdf(p))
}
