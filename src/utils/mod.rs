/// Module containing environment variable helpers
pub mod config;
/// Module containing logging utilities
pub mod logger;
/// Module containing local validation of files, dates, URLs and metadata
pub mod validation;

pub use config::*;
pub use logger::*;
pub use validation::*;
