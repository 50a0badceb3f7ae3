use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rand::Rng;

use crate::error::{DataError, Result};
use crate::models::{ForecastConfig, MarketSnapshot, PricePoint, PriceSeries};
use crate::services::forecaster;
use crate::utils::{parse_date, Logger, Timer};

/// Loads the wide price table and produces the forecast-augmented
/// snapshot. The sole I/O boundary of the pipeline: malformed input fails
/// here and no partial series is produced.
pub struct MarketLoader {
    config: ForecastConfig,
    logger: Logger,
}

impl MarketLoader {
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            logger: Logger::new("LOADER"),
        })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// One-shot load: read the file, reshape to long form, extend with the
    /// forecast, draw the run's accuracy figure.
    pub fn load<R: Rng>(&self, path: &Path, rng: &mut R) -> Result<MarketSnapshot> {
        let timer = Timer::start("market load");
        self.logger
            .info(&format!("Reading price table from {}", path.display()));
        let content = fs::read_to_string(path)?;
        let snapshot = self.load_from_str(&content, rng)?;
        timer.log_elapsed();
        Ok(snapshot)
    }

    /// Same pipeline over in-memory CSV content.
    pub fn load_from_str<R: Rng>(&self, content: &str, rng: &mut R) -> Result<MarketSnapshot> {
        let mut series = parse_wide_table(content)?;
        let (_, max_observed_date) = series.date_bounds().ok_or(DataError::EmptyTable)?;

        forecaster::extend_series(&mut series, max_observed_date, &self.config, rng)?;
        let accuracy_pct = forecaster::draw_accuracy(rng);

        self.logger.info(&format!(
            "Loaded {} companies, {} points, max observed date {}",
            series.companies().len(),
            series.len(),
            max_observed_date
        ));

        Ok(MarketSnapshot {
            series,
            max_observed_date,
            future_steps: self.config.future_steps,
            accuracy_pct,
        })
    }
}

/// Reshape the wide table (first column the date, one column per company)
/// into the long (date, company, price) form, sorted by date.
fn parse_wide_table(content: &str) -> Result<PriceSeries> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let companies: Vec<String> = headers.iter().skip(1).map(|h| h.trim().to_string()).collect();
    if companies.is_empty() || companies.iter().any(|c| c.is_empty()) {
        return Err(DataError::MissingCompanyColumns);
    }

    let mut points: Vec<PricePoint> = Vec::new();
    let mut seen_dates: HashSet<String> = HashSet::new();

    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        // 1-based data row number, header included, for error messages
        let row = idx + 2;

        let date_cell = record.get(0).unwrap_or("").to_string();
        let date = parse_date(&date_cell).ok_or_else(|| DataError::InvalidDate {
            row,
            value: date_cell.clone(),
        })?;
        if !seen_dates.insert(date_cell.clone()) {
            return Err(DataError::DuplicateDate {
                row,
                value: date_cell,
            });
        }

        for (col, company) in companies.iter().enumerate() {
            let cell = record.get(col + 1).unwrap_or("");
            let price: f64 = cell
                .trim()
                .parse()
                .map_err(|_| DataError::InvalidPrice {
                    row,
                    company: company.clone(),
                    value: cell.to_string(),
                })?;
            points.push(PricePoint::new(date, company.clone(), price));
        }
    }

    if points.is_empty() {
        return Err(DataError::EmptyTable);
    }

    Ok(PriceSeries::from_points(points))
}
