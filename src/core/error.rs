//! Error types for rate retrieval and valuation

use crate::core::rates::{Instrument, RateSide};
use chrono::NaiveDate;
use thiserror::Error;

fn codes(instruments: &[Instrument]) -> String {
    instruments
        .iter()
        .map(Instrument::code)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ways a single rate fetch can fail.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("No exchange rate API key configured")]
    MissingCredential,

    #[error("Date {date} is in the future (today is {today})")]
    FutureDate { date: NaiveDate, today: NaiveDate },

    #[error("Failed to retrieve exchange rates: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Exchange rate service error: {message}")]
    Service { message: String },

    #[error("Exchange rate service returned HTTP {status}")]
    Http { status: u16 },

    #[error("Failed to parse exchange rate response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Rate data missing for {}", codes(.missing))]
    PartialData { missing: Vec<Instrument> },
}

#[derive(Debug, Error)]
pub enum ValuationError {
    #[error("Missing {side} rate data for {instrument}")]
    MissingRate {
        instrument: Instrument,
        side: RateSide,
    },

    #[error("Invalid investment: {0}")]
    InvalidInvestment(String),
}

/// Failure of the whole fetch-then-value flow.
#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("Could not get {side} rates: {source}")]
    Rates { side: RateSide, source: RateError },

    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_data_names_instruments() {
        let err = RateError::PartialData {
            missing: vec![Instrument::Eur, Instrument::Xau],
        };
        assert_eq!(err.to_string(), "Rate data missing for EUR, XAU");
    }

    #[test]
    fn test_missing_rate_names_side() {
        let err = ValuationError::MissingRate {
            instrument: Instrument::Xau,
            side: RateSide::Historical,
        };
        assert_eq!(err.to_string(), "Missing historical rate data for XAU");
    }

    #[test]
    fn test_comparison_error_keeps_source() {
        let err = ComparisonError::Rates {
            side: RateSide::Live,
            source: RateError::Service {
                message: "Invalid access key".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Could not get live rates: Exchange rate service error: Invalid access key"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
