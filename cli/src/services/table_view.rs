use serde::{Deserialize, Serialize};

use crate::models::AnchoredWindow;
use crate::utils::format_date;

/// Row highlight relative to the anchor ("today") price. `Above` gets the
/// positive indicator, `Below` the negative one, `Equal` stays neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceFlag {
    Above,
    Below,
    Equal,
}

/// One rendered table row: ISO date, two-decimal price, highlight flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub date: String,
    pub price: String,
    pub flag: PriceFlag,
}

/// Format the anchored window for the dashboard table. The anchor row
/// comes first and is always `Equal` (it compares against itself).
pub fn format_window(window: &AnchoredWindow) -> Vec<TableRow> {
    let anchor_price = window.anchor.price;

    std::iter::once(&window.anchor)
        .chain(window.forecast.iter())
        .map(|point| TableRow {
            date: format_date(point.date),
            price: format!("{:.2}", point.price),
            // exact comparison: the anchor row must stay neutral
            flag: if point.price == anchor_price {
                PriceFlag::Equal
            } else if point.price > anchor_price {
                PriceFlag::Above
            } else {
                PriceFlag::Below
            },
        })
        .collect()
}
