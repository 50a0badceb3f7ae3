use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};
use crate::models::PriceSeries;

/// Parameters of the random-walk forecast extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Synthetic days appended after the last observed date.
    pub future_steps: usize,
    /// Trailing points feeding each new synthetic point.
    pub lookback: usize,
    /// The mean day-over-day delta is scaled by a uniform draw from
    /// [-weight, weight].
    pub weight: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            future_steps: 10,
            lookback: 7,
            weight: 5.0,
        }
    }
}

impl ForecastConfig {
    pub fn new(future_steps: usize, lookback: usize, weight: f64) -> Self {
        Self {
            future_steps,
            lookback,
            weight,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.future_steps == 0 {
            return Err(DataError::InvalidConfig(
                "future_steps must be at least 1".to_string(),
            ));
        }
        if self.lookback < 2 {
            return Err(DataError::InvalidConfig(
                "lookback must be at least 2 to form a price difference".to_string(),
            ));
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(DataError::InvalidConfig(format!(
                "weight must be a positive number, got {}",
                self.weight
            )));
        }
        Ok(())
    }
}

/// The one-shot load result, read-only for the rest of the process.
///
/// `accuracy_pct` is the user-visible "forecast accuracy" figure: a
/// uniform draw from [25, 85] per run, not a measured error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub series: PriceSeries,
    pub max_observed_date: NaiveDate,
    pub future_steps: usize,
    pub accuracy_pct: f64,
}

impl MarketSnapshot {
    /// Whether a date falls in the forecast region.
    pub fn is_forecast(&self, date: NaiveDate) -> bool {
        date > self.max_observed_date
    }

    /// Last forecasted date.
    pub fn forecast_end(&self) -> NaiveDate {
        self.max_observed_date + Duration::days(self.future_steps as i64)
    }
}
