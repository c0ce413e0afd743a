//! Fixed-architecture seasonal ARIMA.
//!
//! Implements the forecaster's model: non-seasonal order (1,1,1) with
//! seasonal order (1,0,1) at a fixed period. On the once-differenced series
//! `w_t` the model is
//!
//! ```text
//! w_t = c + phi*w_{t-1} + PHI*w_{t-s} + theta*e_{t-1} + THETA*e_{t-s} + e_t
//! ```
//!
//! Estimation is two-stage conditional least squares: an AR-only pass
//! produces provisional residuals, then a second pass regresses on the
//! lagged values and lagged residuals together (Hannan–Rissanen style).
//! The architecture is never auto-selected; when the differenced series is
//! shorter than one seasonal period the seasonal lags have no support and
//! their coefficients are estimated as zero, but the orders stay fixed.

use thiserror::Error;

/// Seasonal period of the fixed architecture (monthly data, yearly cycle).
pub const SEASONAL_PERIOD: usize = 12;

/// Fewest observations `fit` accepts; below this even the non-seasonal
/// regression has no degrees of freedom.
pub const MIN_OBSERVATIONS: usize = 6;

/// Pivot floor for the normal-equations solve.
const SINGULARITY_EPS: f64 = 1e-10;

/// AR coefficients are clamped inside the unit circle so the forecast
/// recursion cannot diverge on awkward short series.
const AR_CLAMP: f64 = 0.99;

/// Numerical failures during fitting or forecasting. These surface to the
/// caller — a failed fit never degrades into a default forecast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("insufficient observations: {got} (need at least {need})")]
    TooShort { got: usize, need: usize },
    #[error("normal equations are singular — series is degenerate")]
    Singular,
    #[error("non-finite value encountered during {stage}")]
    NonFinite { stage: &'static str },
    #[error("model has not been fitted")]
    NotFitted,
}

/// ARIMA(1,1,1) x (1,0,1) at a fixed seasonal period.
#[derive(Debug, Clone)]
pub struct SeasonalArima {
    period: usize,
    intercept: f64,
    ar: f64,
    seasonal_ar: f64,
    ma: f64,
    seasonal_ma: f64,
    /// Whether the training window was long enough to estimate the
    /// seasonal lags
    seasonal_active: bool,
    /// Training series on the original (caller's) scale
    original: Vec<f64>,
    /// Once-differenced training series
    diffed: Vec<f64>,
    /// Residuals under the final coefficients
    residuals: Vec<f64>,
    /// Residual standard deviation
    sigma: f64,
    fitted: bool,
}

impl SeasonalArima {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            intercept: 0.0,
            ar: 0.0,
            seasonal_ar: 0.0,
            ma: 0.0,
            seasonal_ma: 0.0,
            seasonal_active: false,
            original: Vec::new(),
            diffed: Vec::new(),
            residuals: Vec::new(),
            sigma: 0.0,
            fitted: false,
        }
    }

    /// Fit to a series (already transformed by the caller; this model knows
    /// nothing about log scales).
    pub fn fit(&mut self, data: &[f64]) -> Result<(), ModelError> {
        if data.len() < MIN_OBSERVATIONS {
            return Err(ModelError::TooShort {
                got: data.len(),
                need: MIN_OBSERVATIONS,
            });
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite { stage: "input" });
        }

        let diffed: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();
        let n = diffed.len();

        // Seasonal lags need enough rows past the first full period to
        // leave the regression some degrees of freedom.
        let seasonal_active = n >= self.period + 4;

        // Stage 1: AR-only regression for provisional residuals.
        let start1 = if seasonal_active { self.period } else { 1 };
        let mut rows = Vec::with_capacity(n - start1);
        let mut targets = Vec::with_capacity(n - start1);
        for t in start1..n {
            let mut row = vec![1.0, diffed[t - 1]];
            if seasonal_active {
                row.push(diffed[t - self.period]);
            }
            rows.push(row);
            targets.push(diffed[t]);
        }
        let stage1 = ols(&rows, &targets)?;
        let (c1, phi1, sphi1) = (
            stage1[0],
            stage1[1],
            if seasonal_active { stage1[2] } else { 0.0 },
        );

        let mut provisional = vec![0.0; n];
        for t in start1..n {
            let mut pred = c1 + phi1 * diffed[t - 1];
            if seasonal_active {
                pred += sphi1 * diffed[t - self.period];
            }
            provisional[t] = diffed[t] - pred;
        }

        // Stage 2: joint AR + MA regression on the provisional residuals.
        // The seasonal MA lag reaches back a full period into the residual
        // series, which itself only starts at `start1`; without a second
        // full period its column is identically zero, so it joins the
        // regression only once it has support of its own.
        let seasonal_ma_active = seasonal_active && n >= 2 * self.period + 6;
        let start2 = if seasonal_ma_active {
            2 * self.period
        } else if seasonal_active {
            self.period + 1
        } else {
            2
        };
        let k = 3 + usize::from(seasonal_active) + usize::from(seasonal_ma_active);
        if n.saturating_sub(start2) >= k {
            let mut rows = Vec::with_capacity(n - start2);
            let mut targets = Vec::with_capacity(n - start2);
            for t in start2..n {
                let mut row = vec![1.0, diffed[t - 1]];
                if seasonal_active {
                    row.push(diffed[t - self.period]);
                }
                row.push(provisional[t - 1]);
                if seasonal_ma_active {
                    row.push(provisional[t - self.period]);
                }
                rows.push(row);
                targets.push(diffed[t]);
            }
            let beta = ols(&rows, &targets)?;
            let mut next = beta.iter().copied();
            // column order mirrors the row construction above
            self.intercept = next.next().unwrap_or(0.0);
            self.ar = next.next().unwrap_or(0.0).clamp(-AR_CLAMP, AR_CLAMP);
            self.seasonal_ar = if seasonal_active {
                next.next().unwrap_or(0.0).clamp(-AR_CLAMP, AR_CLAMP)
            } else {
                0.0
            };
            self.ma = next.next().unwrap_or(0.0);
            self.seasonal_ma = if seasonal_ma_active {
                next.next().unwrap_or(0.0)
            } else {
                0.0
            };
        } else {
            // Not enough rows for the joint pass: keep the AR fit, MA = 0.
            self.intercept = c1;
            self.ar = phi1.clamp(-AR_CLAMP, AR_CLAMP);
            self.seasonal_ar = sphi1.clamp(-AR_CLAMP, AR_CLAMP);
            self.ma = 0.0;
            self.seasonal_ma = 0.0;
        }
        self.seasonal_active = seasonal_active;

        // Final residuals and sigma under the chosen coefficients.
        let mut residuals = vec![0.0; n];
        let mut sq_sum = 0.0;
        let mut count = 0usize;
        for t in start1..n {
            let mut pred = self.intercept + self.ar * diffed[t - 1];
            if t >= 1 {
                pred += self.ma * residuals[t - 1];
            }
            if self.seasonal_active && t >= self.period {
                pred += self.seasonal_ar * diffed[t - self.period];
                pred += self.seasonal_ma * residuals[t - self.period];
            }
            residuals[t] = diffed[t] - pred;
            sq_sum += residuals[t] * residuals[t];
            count += 1;
        }
        let sigma = if count > 0 {
            (sq_sum / count as f64).sqrt()
        } else {
            0.0
        };
        if !sigma.is_finite() {
            return Err(ModelError::NonFinite { stage: "residuals" });
        }

        self.original = data.to_vec();
        self.diffed = diffed;
        self.residuals = residuals;
        self.sigma = sigma;
        self.fitted = true;
        Ok(())
    }

    /// Recursive multi-step forecast on the caller's scale. Future shocks
    /// are taken as zero; the differenced forecasts are integrated from the
    /// last training observation.
    pub fn forecast(&self, steps: usize) -> Result<Vec<f64>, ModelError> {
        if !self.fitted {
            return Err(ModelError::NotFitted);
        }

        let mut w = self.diffed.clone();
        let mut e = self.residuals.clone();
        let mut diff_forecasts = Vec::with_capacity(steps);

        for _ in 0..steps {
            let len = w.len();
            let mut pred = self.intercept + self.ar * w[len - 1] + self.ma * e[len - 1];
            if self.seasonal_active && len >= self.period {
                pred += self.seasonal_ar * w[len - self.period];
                pred += self.seasonal_ma * e[len - self.period];
            }
            diff_forecasts.push(pred);
            w.push(pred);
            e.push(0.0);
        }

        // Integrate back to the level scale.
        let mut level = self.original.last().copied().unwrap_or(0.0);
        let mut out = Vec::with_capacity(steps);
        for diff in diff_forecasts {
            level += diff;
            if !level.is_finite() {
                return Err(ModelError::NonFinite { stage: "forecast" });
            }
            out.push(level);
        }
        Ok(out)
    }

    /// Residual standard deviation of the fit (caller's scale, differenced).
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn is_seasonal_active(&self) -> bool {
        self.seasonal_active
    }
}

/// Ordinary least squares via the normal equations. Small systems only
/// (at most 5 unknowns), solved by Gaussian elimination with partial
/// pivoting.
fn ols(rows: &[Vec<f64>], targets: &[f64]) -> Result<Vec<f64>, ModelError> {
    let k = rows.first().map_or(0, Vec::len);
    if k == 0 || rows.len() < k {
        return Err(ModelError::Singular);
    }

    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for (row, &y) in rows.iter().zip(targets) {
        for i in 0..k {
            xty[i] += row[i] * y;
            for j in 0..k {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    solve(xtx, xty).ok_or(ModelError::Singular)
}

fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let mut pivot = col;
        for row in (col + 1)..n {
            if a[row][col].abs() > a[pivot][col].abs() {
                pivot = row;
            }
        }
        if a[pivot][col].abs() < SINGULARITY_EPS {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for c in col..n {
                a[row][c] -= factor * a[col][c];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[i][j] * x[j];
        }
        x[i] = sum / a[i][i];
    }
    x.iter().all(|v| v.is_finite()).then_some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short_rejected() {
        let mut model = SeasonalArima::new(SEASONAL_PERIOD);
        let err = model.fit(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, ModelError::TooShort { got: 3, .. }));
    }

    #[test]
    fn test_constant_series_is_degenerate() {
        // every difference is zero — the lag column is identically zero
        let mut model = SeasonalArima::new(SEASONAL_PERIOD);
        let data = vec![5.0; 20];
        assert_eq!(model.fit(&data), Err(ModelError::Singular));
    }

    #[test]
    fn test_forecast_before_fit_rejected() {
        let model = SeasonalArima::new(SEASONAL_PERIOD);
        assert_eq!(model.forecast(3), Err(ModelError::NotFitted));
    }

    #[test]
    fn test_short_series_fits_without_seasonal_lags() {
        let mut model = SeasonalArima::new(SEASONAL_PERIOD);
        let data = vec![2.0, 4.0, 3.0, 5.0, 4.0, 7.0, 5.0, 8.0, 6.0, 9.0];
        model.fit(&data).expect("short varied series should fit");
        assert!(!model.is_seasonal_active());
        let forecast = model.forecast(3).expect("forecast after fit");
        assert_eq!(forecast.len(), 3);
        assert!(forecast.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_long_series_activates_seasonal_lags() {
        let mut model = SeasonalArima::new(SEASONAL_PERIOD);
        // two years of a noisy yearly cycle
        let data: Vec<f64> = (0..30)
            .map(|i| {
                let month = i % 12;
                5.0 + (month as f64 * std::f64::consts::PI / 6.0).sin() * 3.0
                    + (i as f64 * 0.7).sin() * 0.3
            })
            .collect();
        model.fit(&data).expect("seasonal series should fit");
        assert!(model.is_seasonal_active());
        let forecast = model.forecast(6).expect("forecast after fit");
        assert_eq!(forecast.len(), 6);
        assert!(forecast.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_trending_series_forecasts_continue_trend() {
        let mut model = SeasonalArima::new(SEASONAL_PERIOD);
        let data: Vec<f64> = (0..16).map(|i| i as f64 + ((i * 7) % 3) as f64 * 0.2).collect();
        model.fit(&data).expect("trend series should fit");
        let forecast = model.forecast(3).expect("forecast after fit");
        // a strongly increasing series should keep forecasting above the
        // last observed level
        assert!(forecast[0] > data[10]);
    }

    #[test]
    fn test_sigma_is_finite_and_nonnegative() {
        let mut model = SeasonalArima::new(SEASONAL_PERIOD);
        let data = vec![3.0, 5.0, 4.0, 6.0, 5.0, 8.0, 6.0, 9.0, 7.0, 10.0, 8.0, 11.0];
        model.fit(&data).expect("fit");
        assert!(model.sigma().is_finite());
        assert!(model.sigma() >= 0.0);
    }
}
