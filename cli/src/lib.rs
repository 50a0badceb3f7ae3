//! # Stockcast - Price Series Forecasting Library
//!
//! A small Rust library behind a stock price dashboard:
//! - Wide-to-long reshaping of per-company price tables
//! - Naive random-walk forecast extension (seedable)
//! - Buy/sell/hold recommendation narratives
//! - View-facing table formatting and selection bookkeeping
//!
//! ## Quick Start
//!
//! ```no_run
//! use stockcast::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! fn main() -> Result<(), stockcast::DataError> {
//!     let loader = MarketLoader::new(ForecastConfig::default())?;
//!     let mut rng = StdRng::seed_from_u64(42);
//!     let snapshot = loader.load(std::path::Path::new("data/stocks.csv"), &mut rng)?;
//!     println!(
//!         "{} companies, forecast through {}",
//!         snapshot.series.companies().len(),
//!         snapshot.forecast_end()
//!     );
//!     Ok(())
//! }
//! ```

// Core modules - these contain the main functionality
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{DataError, Result};

// Prelude for convenient imports
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! Import this module to get the most commonly used types and functions:
    //! ```rust
    //! use stockcast::prelude::*;
    //! ```

    pub use crate::error::DataError;
    pub use crate::models::{
        apply_selection, AnchoredWindow, ForecastConfig, MarketSnapshot, PricePoint, PriceSeries,
        SelectionState, SelectionUpdate, SELECT_ALL,
    };
    pub use crate::services::{
        format_window, gain_loss, FeeKind, MarketLoader, PriceFlag, Recommendation,
        RecommendationRequest, TableRow, TrendOutlook,
    };
}

// Re-export some commonly used utilities
pub use utils::{init_logger, Logger, Timer};
