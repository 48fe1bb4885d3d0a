//! Exchange-rate abstractions and core types

use crate::core::error::RateError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Currency every rate is quoted against.
pub const BASE_CURRENCY: &str = "TRY";

/// An alternative the fund purchase is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Instrument {
    Usd,
    Eur,
    Xau,
}

impl Instrument {
    /// Fixed display order of the comparison table.
    pub const ALL: [Instrument; 3] = [Instrument::Usd, Instrument::Eur, Instrument::Xau];

    pub fn code(&self) -> &'static str {
        match self {
            Instrument::Usd => "USD",
            Instrument::Eur => "EUR",
            Instrument::Xau => "XAU",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Instrument::Usd => "USD ($)",
            Instrument::Eur => "EUR (€)",
            Instrument::Xau => "Gold (oz)",
        }
    }

    pub fn unit_symbol(&self) -> &'static str {
        match self {
            Instrument::Usd => "$",
            Instrument::Eur => "€",
            Instrument::Xau => "oz",
        }
    }
}

impl Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which point in time a [`RateSet`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateSide {
    Historical,
    Live,
}

impl Display for RateSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RateSide::Historical => "historical",
                RateSide::Live => "live",
            }
        )
    }
}

/// What a rate provider is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateMode {
    Historical(NaiveDate),
    Live,
}

impl RateMode {
    pub fn side(&self) -> RateSide {
        match self {
            RateMode::Historical(_) => RateSide::Historical,
            RateMode::Live => RateSide::Live,
        }
    }
}

impl Display for RateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateMode::Historical(date) => write!(f, "historical ({})", date.format("%Y-%m-%d")),
            RateMode::Live => write!(f, "live"),
        }
    }
}

/// TRY price of one unit of each instrument at a point in time.
///
/// Only strictly positive, finite rates are ever handed out; anything else
/// reads as missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateSet {
    rates: BTreeMap<Instrument, f64>,
}

impl RateSet {
    pub fn new(rates: impl IntoIterator<Item = (Instrument, f64)>) -> Self {
        RateSet {
            rates: rates.into_iter().collect(),
        }
    }

    pub fn get(&self, instrument: Instrument) -> Option<f64> {
        self.rates
            .get(&instrument)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }

    /// Instruments without a usable rate, in display order.
    pub fn missing(&self) -> Vec<Instrument> {
        Instrument::ALL
            .into_iter()
            .filter(|i| self.get(*i).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Instrument, f64)> + '_ {
        Instrument::ALL
            .into_iter()
            .filter_map(|i| self.get(i).map(|rate| (i, rate)))
    }
}

impl FromIterator<(Instrument, f64)> for RateSet {
    fn from_iter<T: IntoIterator<Item = (Instrument, f64)>>(iter: T) -> Self {
        RateSet::new(iter)
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch(&self, mode: RateMode) -> Result<RateSet, RateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_set_complete() {
        let rates = RateSet::new([
            (Instrument::Usd, 32.0),
            (Instrument::Eur, 34.5),
            (Instrument::Xau, 75_000.0),
        ]);
        assert!(rates.is_complete());
        assert_eq!(rates.get(Instrument::Eur), Some(34.5));
        assert_eq!(rates.iter().count(), 3);
    }

    #[test]
    fn test_rate_set_treats_non_positive_as_missing() {
        let rates = RateSet::new([
            (Instrument::Usd, 0.0),
            (Instrument::Eur, -1.0),
            (Instrument::Xau, f64::NAN),
        ]);
        assert_eq!(rates.get(Instrument::Usd), None);
        assert_eq!(
            rates.missing(),
            vec![Instrument::Usd, Instrument::Eur, Instrument::Xau]
        );
        assert!(!rates.is_complete());
    }

    #[test]
    fn test_rate_set_missing_keeps_display_order() {
        let rates: RateSet = [(Instrument::Eur, 35.0)].into_iter().collect();
        assert_eq!(rates.missing(), vec![Instrument::Usd, Instrument::Xau]);
    }

    #[test]
    fn test_rate_mode_display() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 26).unwrap();
        assert_eq!(
            RateMode::Historical(date).to_string(),
            "historical (2024-04-26)"
        );
        assert_eq!(RateMode::Live.to_string(), "live");
        assert_eq!(RateMode::Live.side(), RateSide::Live);
    }
}
