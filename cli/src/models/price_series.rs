use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// One long-form record: a company's price on a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub company: String,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, company: impl Into<String>, price: f64) -> Self {
        Self {
            date,
            company: company.into(),
            price,
        }
    }
}

/// Long-form price series, kept sorted by date ascending.
///
/// For any single company dates are unique and chronological. Rows past
/// `MarketSnapshot::max_observed_date` are forecasted, everything before
/// is observed. The company set is fixed once the series is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from unordered points. Sorting is stable, so the
    /// company order within a date stays as given (arbitrary by contract).
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by(|a, b| a.date.cmp(&b.date));
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append rows and restore the date ordering.
    pub fn extend(&mut self, extra: Vec<PricePoint>) {
        self.points.extend(extra);
        self.points.sort_by(|a, b| a.date.cmp(&b.date));
    }

    /// Distinct companies in first-appearance order.
    pub fn companies(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for point in &self.points {
            if !seen.iter().any(|c| c == &point.company) {
                seen.push(point.company.clone());
            }
        }
        seen
    }

    pub fn contains_company(&self, company: &str) -> bool {
        self.points.iter().any(|p| p.company == company)
    }

    /// All points for one company, in date order.
    pub fn company_points(&self, company: &str) -> Vec<&PricePoint> {
        self.points.iter().filter(|p| p.company == company).collect()
    }

    /// All prices for one company, in date order.
    pub fn company_prices(&self, company: &str) -> Vec<f64> {
        self.points
            .iter()
            .filter(|p| p.company == company)
            .map(|p| p.price)
            .collect()
    }

    /// Earliest and latest date in the series.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.points.first()?.date;
        let last = self.points.last()?.date;
        Some((first, last))
    }

    /// Filter by company list and inclusive date range. `None` means no
    /// constraint on that axis.
    pub fn filter(
        &self,
        companies: Option<&[String]>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<PricePoint> {
        self.points
            .iter()
            .filter(|p| companies.map_or(true, |cs| cs.iter().any(|c| c == &p.company)))
            .filter(|p| from.map_or(true, |d| p.date >= d))
            .filter(|p| to.map_or(true, |d| p.date <= d))
            .cloned()
            .collect()
    }

    /// The recommendation window for one company: the last observed point
    /// ("today", the anchor) followed by its `future_steps` forecasted
    /// points.
    pub fn anchored_window(&self, company: &str, future_steps: usize) -> Result<AnchoredWindow> {
        let points = self.company_points(company);
        if points.is_empty() {
            return Err(DataError::UnknownCompany(company.to_string()));
        }
        if points.len() < future_steps + 1 {
            return Err(DataError::InsufficientHistory {
                company: company.to_string(),
                have: points.len(),
                need: future_steps + 1,
            });
        }

        let tail = &points[points.len() - (future_steps + 1)..];
        Ok(AnchoredWindow {
            company: company.to_string(),
            anchor: tail[0].clone(),
            forecast: tail[1..].iter().map(|p| (*p).clone()).collect(),
        })
    }
}

/// A company's anchored view: "today" first, forecasted points after it.
#[derive(Debug, Clone, Serialize)]
pub struct AnchoredWindow {
    pub company: String,
    pub anchor: PricePoint,
    pub forecast: Vec<PricePoint>,
}

impl AnchoredWindow {
    /// Anchor price followed by the forecasted prices.
    pub fn prices(&self) -> Vec<f64> {
        let mut prices = Vec::with_capacity(self.forecast.len() + 1);
        prices.push(self.anchor.price);
        prices.extend(self.forecast.iter().map(|p| p.price));
        prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_series() -> PriceSeries {
        PriceSeries::from_points(vec![
            PricePoint::new(d("2024-01-02"), "ACME", 11.0),
            PricePoint::new(d("2024-01-01"), "ACME", 10.0),
            PricePoint::new(d("2024-01-01"), "GLOBEX", 20.0),
            PricePoint::new(d("2024-01-02"), "GLOBEX", 19.0),
            PricePoint::new(d("2024-01-03"), "ACME", 12.0),
            PricePoint::new(d("2024-01-03"), "GLOBEX", 18.0),
        ])
    }

    #[test]
    fn test_from_points_sorts_by_date() {
        let series = sample_series();
        let dates: Vec<NaiveDate> = series.points().iter().map(|p| p.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_companies_distinct_in_first_appearance_order() {
        let series = sample_series();
        assert_eq!(series.companies(), vec!["ACME", "GLOBEX"]);
    }

    #[test]
    fn test_company_prices_in_date_order() {
        let series = sample_series();
        assert_eq!(series.company_prices("ACME"), vec![10.0, 11.0, 12.0]);
        assert_eq!(series.company_prices("GLOBEX"), vec![20.0, 19.0, 18.0]);
    }

    #[test]
    fn test_filter_by_company_and_range() {
        let series = sample_series();
        let only_acme = vec!["ACME".to_string()];
        let points = series.filter(Some(&only_acme), Some(d("2024-01-02")), None);
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.company == "ACME"));
        assert!(points.iter().all(|p| p.date >= d("2024-01-02")));

        let all = series.filter(None, None, Some(d("2024-01-01")));
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_anchored_window_splits_anchor_and_forecast() {
        let series = sample_series();
        let window = series.anchored_window("ACME", 2).unwrap();
        assert_eq!(window.anchor.price, 10.0);
        assert_eq!(window.forecast.len(), 2);
        assert_eq!(window.prices(), vec![10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_anchored_window_unknown_company() {
        let series = sample_series();
        let err = series.anchored_window("INITECH", 2).unwrap_err();
        assert!(matches!(err, DataError::UnknownCompany(_)));
    }

    #[test]
    fn test_anchored_window_short_history() {
        let series = sample_series();
        let err = series.anchored_window("ACME", 5).unwrap_err();
        assert!(matches!(err, DataError::InsufficientHistory { .. }));
    }
}
