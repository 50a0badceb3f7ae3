use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// How the broker fee applies to a transaction total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeKind {
    /// Flat amount deducted from the total.
    #[default]
    Fixed,
    /// Percentage of the total, on a 0-100 scale.
    Percentage,
}

impl FeeKind {
    /// Fee-adjusted transaction total.
    pub fn apply(self, total: f64, fee: f64) -> f64 {
        match self {
            FeeKind::Fixed => total - fee,
            FeeKind::Percentage => total * (1.0 - fee / 100.0),
        }
    }
}

/// Input to the gain/loss evaluation.
///
/// `anchor_price` is "today" (the last observed point); `forecast` holds
/// the synthetic prices after it, one per future day. Negative or zero
/// `total_owned`/`fee` are the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub anchor_price: f64,
    pub forecast: Vec<f64>,
    pub total_owned: f64,
    pub fee: f64,
    pub fee_kind: FeeKind,
}

/// Direction the narrative reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendOutlook {
    Downward,
    Upward,
    Fluctuating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// `total_owned * anchor_price`, before any fee.
    pub current_total: f64,
    /// Current total after the fee adjustment.
    pub after_fee_total: f64,
    pub outlook: TrendOutlook,
    /// Narrative with `<b>`/`<br>` markup the dashboard renders; currency
    /// values formatted to two decimals.
    pub message: String,
}

/// Index of the first occurrence of the largest value.
fn first_max(values: &[f64]) -> usize {
    let mut idx = 0;
    for (i, &value) in values.iter().enumerate().skip(1) {
        if value > values[idx] {
            idx = i;
        }
    }
    idx
}

/// Index of the first occurrence of the smallest value.
fn first_min(values: &[f64]) -> usize {
    let mut idx = 0;
    for (i, &value) in values.iter().enumerate().skip(1) {
        if value < values[idx] {
            idx = i;
        }
    }
    idx
}

/// Evaluate a holding against the anchored forecast window.
///
/// The window is `[anchor, forecast...]`, so an extreme "at index 0"
/// means today. Ties resolve to the lowest index, which also makes a
/// completely flat window read as a peak today (the downward branch).
pub fn gain_loss(request: &RecommendationRequest) -> Result<Recommendation> {
    if request.forecast.is_empty() {
        return Err(DataError::EmptyForecast);
    }

    let mut window = Vec::with_capacity(request.forecast.len() + 1);
    window.push(request.anchor_price);
    window.extend_from_slice(&request.forecast);

    let current_total = request.total_owned * request.anchor_price;
    let current_after_fee = request.fee_kind.apply(current_total, request.fee);

    let max_index = first_max(&window);
    let min_index = first_min(&window);
    let max_total = request
        .fee_kind
        .apply(request.total_owned * window[max_index], request.fee);
    let min_total = request
        .fee_kind
        .apply(request.total_owned * window[min_index], request.fee);

    let (outlook, message) = if max_index == 0 {
        (
            TrendOutlook::Downward,
            format!(
                "Downward trend to be expected, sell now to prevent significant loss.<br>\
                 After sale: <b>${:.2}</b> (fee deducted).<br>\
                 Potential amount saved: <b>${:.2}</b> (fee deducted).",
                current_after_fee,
                current_after_fee - min_total
            ),
        )
    } else if min_index == 0 {
        (
            TrendOutlook::Upward,
            format!(
                "Upward trend to be expected, reaching peak in {} days.<br>\
                 If sold during the peak: <b>${:.2}</b> (fee deducted).<br>\
                 Forecasted gain: <b>${:.2}</b> (fee deducted).",
                max_index,
                max_total,
                max_total - current_after_fee
            ),
        )
    } else {
        let swing = if min_index < max_index {
            format!(
                "hitting floor in {} days and reaching peak in {} days",
                min_index, max_index
            )
        } else {
            format!(
                "hitting peak in {} days and reaching floor in {} days",
                max_index, min_index
            )
        };
        (
            TrendOutlook::Fluctuating,
            format!(
                "Fluctuations expected, {}.<br>\
                 Potential gain in {} days: <b>${:.2}</b> (fee deducted).<br>\
                 Potential loss if forecast is wrong: <b>${:.2}</b> (fee deducted).",
                swing,
                max_index,
                max_total - current_after_fee,
                current_after_fee - min_total
            ),
        )
    };

    Ok(Recommendation {
        current_total,
        after_fee_total: current_after_fee,
        outlook,
        message,
    })
}
