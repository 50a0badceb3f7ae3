use rand::Rng;

use crate::error::{DataError, Result};
use crate::models::{ForecastConfig, PricePoint, PriceSeries};
use crate::utils::future_dates;
use chrono::NaiveDate;

// Bounds of the cosmetic accuracy figure shown next to the forecast.
const ACCURACY_MIN: f64 = 25.0;
const ACCURACY_MAX: f64 = 85.0;

/// Next synthetic price from a trailing window: the last price plus the
/// mean of consecutive first differences, scaled by a fresh uniform draw
/// from [-weight, weight].
///
/// The window must hold at least two points; the loader guarantees that
/// through `ForecastConfig::validate` and the history check.
fn next_price<R: Rng>(window: &[f64], weight: f64, rng: &mut R) -> f64 {
    let diffs: Vec<f64> = window.windows(2).map(|w| w[1] - w[0]).collect();
    let mean = diffs.iter().sum::<f64>() / diffs.len() as f64;
    let scaled = mean * rng.random_range(-weight..=weight);
    window[window.len() - 1] + scaled
}

/// Append `config.future_steps` synthetic points per company, dated
/// `max_observed_date + 1 ..= max_observed_date + future_steps`.
///
/// The lookback window slides forward as points are generated, so later
/// synthetic points feed on earlier ones.
pub fn extend_series<R: Rng>(
    series: &mut PriceSeries,
    max_observed_date: NaiveDate,
    config: &ForecastConfig,
    rng: &mut R,
) -> Result<()> {
    let dates = future_dates(max_observed_date, config.future_steps);
    let mut extra: Vec<PricePoint> = Vec::new();

    for company in series.companies() {
        let prices = series.company_prices(&company);
        if prices.len() < config.lookback {
            return Err(DataError::InsufficientHistory {
                company,
                have: prices.len(),
                need: config.lookback,
            });
        }

        let mut window: Vec<f64> = prices[prices.len() - config.lookback..].to_vec();
        for date in &dates {
            let price = next_price(&window, config.weight, rng);
            extra.push(PricePoint::new(*date, company.clone(), price));
            window.remove(0);
            window.push(price);
        }
    }

    series.extend(extra);
    Ok(())
}

/// The per-run "forecast accuracy" percentage. A cosmetic uniform draw,
/// not a measured error.
pub fn draw_accuracy<R: Rng>(rng: &mut R) -> f64 {
    rng.random_range(ACCURACY_MIN..ACCURACY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn observed(company: &str, prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                PricePoint::new(d("2024-01-01") + chrono::Duration::days(i as i64), company, price)
            })
            .collect()
    }

    #[test]
    fn test_appends_exactly_future_steps_per_company() {
        let mut points = observed("ACME", &[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
        points.extend(observed("GLOBEX", &[20.0, 21.0, 20.0, 22.0, 21.0, 23.0, 22.0]));
        let mut series = PriceSeries::from_points(points);
        let max_date = d("2024-01-07");
        let config = ForecastConfig::default();
        let mut rng = StdRng::seed_from_u64(1);

        extend_series(&mut series, max_date, &config, &mut rng).unwrap();

        for company in ["ACME", "GLOBEX"] {
            let points = series.company_points(company);
            assert_eq!(points.len(), 7 + config.future_steps);

            let forecast: Vec<_> = points.iter().filter(|p| p.date > max_date).collect();
            assert_eq!(forecast.len(), config.future_steps);
            for (i, point) in forecast.iter().enumerate() {
                let expected = max_date + chrono::Duration::days(i as i64 + 1);
                assert_eq!(point.date, expected);
            }
        }
    }

    #[test]
    fn test_flat_history_forecasts_flat() {
        // Mean first difference is zero, so the random multiplier has
        // nothing to scale and every synthetic price equals the anchor.
        let mut series = PriceSeries::from_points(observed(
            "ACME",
            &[100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0],
        ));
        let config = ForecastConfig::default();
        let mut rng = StdRng::seed_from_u64(99);

        extend_series(&mut series, d("2024-01-07"), &config, &mut rng).unwrap();

        for price in series.company_prices("ACME") {
            assert_eq!(price, 100.0);
        }
    }

    #[test]
    fn test_exactly_lookback_points_is_enough() {
        let mut series = PriceSeries::from_points(observed("ACME", &[1.0, 2.0, 3.0]));
        let config = ForecastConfig::new(5, 3, 5.0);
        let mut rng = StdRng::seed_from_u64(7);

        extend_series(&mut series, d("2024-01-03"), &config, &mut rng).unwrap();
        assert_eq!(series.company_points("ACME").len(), 3 + 5);
    }

    #[test]
    fn test_short_history_is_rejected() {
        let mut series = PriceSeries::from_points(observed("ACME", &[1.0, 2.0]));
        let config = ForecastConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        let err = extend_series(&mut series, d("2024-01-02"), &config, &mut rng).unwrap_err();
        assert!(matches!(err, DataError::InsufficientHistory { .. }));
    }

    #[test]
    fn test_same_seed_same_forecast() {
        let build = |seed: u64| {
            let mut series = PriceSeries::from_points(observed(
                "ACME",
                &[10.0, 12.0, 11.0, 13.0, 15.0, 14.0, 16.0],
            ));
            let mut rng = StdRng::seed_from_u64(seed);
            extend_series(&mut series, d("2024-01-07"), &ForecastConfig::default(), &mut rng)
                .unwrap();
            series.company_prices("ACME")
        };

        assert_eq!(build(42), build(42));
        assert_ne!(build(42), build(43));
    }

    #[test]
    fn test_accuracy_draw_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let pct = draw_accuracy(&mut rng);
            assert!((ACCURACY_MIN..ACCURACY_MAX).contains(&pct));
        }
    }
}
