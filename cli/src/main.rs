use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;

use stockcast::prelude::*;
use stockcast::utils::init_logger;

#[derive(Parser)]
#[command(name = "stockcast")]
#[command(about = "Forecast company price series and print buy/sell advice from a wide CSV table")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a price table and print the forecast-augmented tail per company
    Forecast {
        /// Wide CSV file: date column first, one column per company
        #[arg(short, long)]
        input: PathBuf,
        /// Seed for a reproducible forecast
        #[arg(long)]
        seed: Option<u64>,
        /// Rows to print per company
        #[arg(long, default_value_t = 15)]
        tail: usize,
        /// Future days to append
        #[arg(long, default_value_t = 10)]
        future_steps: usize,
        /// Trailing points feeding each forecasted point
        #[arg(long, default_value_t = 7)]
        lookback: usize,
        /// Random scale applied to the mean day-over-day delta
        #[arg(long, default_value_t = 5.0)]
        weight: f64,
    },
    /// Print the recommendation for one company
    Advise {
        /// Wide CSV file: date column first, one column per company
        #[arg(short, long)]
        input: PathBuf,
        /// Company column to evaluate
        #[arg(short, long)]
        company: String,
        /// Quantity held or intended to buy
        #[arg(long, default_value_t = 10.0)]
        owned: f64,
        /// Broker fee
        #[arg(long, default_value_t = 0.0)]
        fee: f64,
        /// How the fee applies
        #[arg(long, value_enum, default_value = "fixed")]
        fee_type: FeeArg,
        /// Seed for a reproducible forecast
        #[arg(long)]
        seed: Option<u64>,
        /// Emit the full result as JSON instead of plain text
        #[arg(long)]
        json: bool,
        /// Future days to append
        #[arg(long, default_value_t = 10)]
        future_steps: usize,
        /// Trailing points feeding each forecasted point
        #[arg(long, default_value_t = 7)]
        lookback: usize,
        /// Random scale applied to the mean day-over-day delta
        #[arg(long, default_value_t = 5.0)]
        weight: f64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FeeArg {
    Fixed,
    Percentage,
}

impl From<FeeArg> for FeeKind {
    fn from(arg: FeeArg) -> Self {
        match arg {
            FeeArg::Fixed => FeeKind::Fixed,
            FeeArg::Percentage => FeeKind::Percentage,
        }
    }
}

#[derive(Debug, Serialize)]
struct AdviceOutput {
    company: String,
    current_total: f64,
    after_fee_total: f64,
    outlook: TrendOutlook,
    accuracy_pct: f64,
    message: String,
    table: Vec<TableRow>,
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn load_snapshot(
    input: &PathBuf,
    future_steps: usize,
    lookback: usize,
    weight: f64,
    seed: Option<u64>,
) -> anyhow::Result<MarketSnapshot> {
    let loader = MarketLoader::new(ForecastConfig::new(future_steps, lookback, weight))?;
    let mut rng = make_rng(seed);
    Ok(loader.load(input, &mut rng)?)
}

/// Strip the dashboard markup for terminal output.
fn plain_text(message: &str) -> String {
    message
        .replace("<br>", "\n")
        .replace("<b>", "")
        .replace("</b>", "")
}

fn main() -> anyhow::Result<()> {
    init_logger()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Forecast {
            input,
            seed,
            tail,
            future_steps,
            lookback,
            weight,
        } => {
            let snapshot = load_snapshot(&input, future_steps, lookback, weight, seed)?;

            for company in snapshot.series.companies() {
                println!("\n{}", company);
                let points = snapshot.series.company_points(&company);
                let start = points.len().saturating_sub(tail);
                for point in &points[start..] {
                    let marker = if snapshot.is_forecast(point.date) { "*" } else { " " };
                    println!("{} {}  {:>12.2}", marker, point.date, point.price);
                }
            }

            println!(
                "\nRows marked '*' are forecasted. Forecast accuracy: {:.2}%",
                snapshot.accuracy_pct
            );
        }
        Commands::Advise {
            input,
            company,
            owned,
            fee,
            fee_type,
            seed,
            json,
            future_steps,
            lookback,
            weight,
        } => {
            let snapshot = load_snapshot(&input, future_steps, lookback, weight, seed)?;

            let window = snapshot.series.anchored_window(&company, snapshot.future_steps)?;
            let request = RecommendationRequest {
                anchor_price: window.anchor.price,
                forecast: window.forecast.iter().map(|p| p.price).collect(),
                total_owned: owned,
                fee,
                fee_kind: fee_type.into(),
            };
            let recommendation = gain_loss(&request)?;
            let table = format_window(&window);

            if json {
                let output = AdviceOutput {
                    company,
                    current_total: recommendation.current_total,
                    after_fee_total: recommendation.after_fee_total,
                    outlook: recommendation.outlook,
                    accuracy_pct: snapshot.accuracy_pct,
                    message: recommendation.message,
                    table,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}\n", company);
                for row in &table {
                    let marker = match row.flag {
                        PriceFlag::Above => '+',
                        PriceFlag::Below => '-',
                        PriceFlag::Equal => ' ',
                    };
                    println!("{} {}  {:>12}", marker, row.date, row.price);
                }
                println!("\nCurrent total: ${:.2}", recommendation.current_total);
                println!("Forecast accuracy: {:.2}%", snapshot.accuracy_pct);
                println!("\n{}", plain_text(&recommendation.message));
            }
        }
    }

    Ok(())
}
