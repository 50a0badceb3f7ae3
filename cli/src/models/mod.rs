pub mod forecast;
pub mod price_series;
pub mod selection;

pub use forecast::*;
pub use price_series::*;
pub use selection::*;
