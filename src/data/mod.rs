//! Data module - CSV loading, range filtering and aggregation

mod loader;
mod processor;
mod record;

pub use loader::{DataLoader, LoaderError};
pub use processor::{DailyTotal, DateRange, RideReport, WeatherTotal};
pub use record::RentalTable;
