//! Core business logic abstractions

pub mod comparison;
pub mod config;
pub mod error;
pub mod log;
pub mod rates;
pub mod valuation;

// Re-export main types for cleaner imports
pub use comparison::{Comparison, compare};
pub use error::{ComparisonError, RateError, ValuationError};
pub use rates::{Instrument, RateMode, RateProvider, RateSet, RateSide};
pub use valuation::{ComparisonRow, Investment, RowKind};
