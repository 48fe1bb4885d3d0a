//! Values a fund purchase against what the same money would be worth had it
//! been converted into each [`Instrument`] on the purchase date.
use crate::core::error::ValuationError;
use crate::core::rates::{Instrument, RateSet, RateSide};
use chrono::NaiveDate;
use tracing::debug;

/// A single fund purchase. `amount_invested` is derived from the unit price
/// and quantity, so it always equals their product.
#[derive(Debug, Clone, PartialEq)]
pub struct Investment {
    fund_name: String,
    purchase_date: NaiveDate,
    fund_unit_price: f64,
    fund_quantity: u32,
    fund_current_price: f64,
    amount_invested: f64,
}

impl Investment {
    pub fn new(
        fund_name: impl Into<String>,
        purchase_date: NaiveDate,
        fund_unit_price: f64,
        fund_quantity: u32,
        fund_current_price: f64,
    ) -> Result<Self, ValuationError> {
        if !fund_unit_price.is_finite() || fund_unit_price <= 0.0 {
            return Err(ValuationError::InvalidInvestment(format!(
                "unit price must be positive, got {fund_unit_price}"
            )));
        }
        if fund_quantity == 0 {
            return Err(ValuationError::InvalidInvestment(
                "quantity must be at least 1".to_string(),
            ));
        }
        if !fund_current_price.is_finite() || fund_current_price < 0.0 {
            return Err(ValuationError::InvalidInvestment(format!(
                "current price must not be negative, got {fund_current_price}"
            )));
        }

        Ok(Investment {
            fund_name: fund_name.into(),
            purchase_date,
            fund_unit_price,
            fund_quantity,
            fund_current_price,
            amount_invested: fund_unit_price * f64::from(fund_quantity),
        })
    }

    pub fn fund_name(&self) -> &str {
        &self.fund_name
    }

    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    pub fn fund_unit_price(&self) -> f64 {
        self.fund_unit_price
    }

    pub fn fund_quantity(&self) -> u32 {
        self.fund_quantity
    }

    pub fn fund_current_price(&self) -> f64 {
        self.fund_current_price
    }

    pub fn amount_invested(&self) -> f64 {
        self.amount_invested
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Fund,
    Instrument(Instrument),
}

/// One line of the comparison. Prices and values are in TRY, unrounded.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub label: String,
    pub kind: RowKind,
    pub start_price: f64,
    pub quantity_acquired: f64,
    pub current_price: f64,
    pub current_value: f64,
    pub return_percent: f64,
}

fn return_percent(current_value: f64, amount_invested: f64) -> f64 {
    (current_value - amount_invested) / amount_invested * 100.0
}

fn require_rate(
    rates: &RateSet,
    instrument: Instrument,
    side: RateSide,
) -> Result<f64, ValuationError> {
    rates
        .get(instrument)
        .ok_or(ValuationError::MissingRate { instrument, side })
}

/// Builds the comparison table: the fund first, then USD, EUR and XAU.
///
/// Both rate sets must be complete. The first gap found (historical before
/// live, in instrument order) fails the whole computation.
pub fn compute(
    investment: &Investment,
    historical: &RateSet,
    live: &RateSet,
) -> Result<Vec<ComparisonRow>, ValuationError> {
    let mut rates = Vec::with_capacity(Instrument::ALL.len());
    for instrument in Instrument::ALL {
        let start = require_rate(historical, instrument, RateSide::Historical)?;
        let current = require_rate(live, instrument, RateSide::Live)?;
        rates.push((instrument, start, current));
    }

    let amount = investment.amount_invested();
    let fund_value = f64::from(investment.fund_quantity()) * investment.fund_current_price();

    let mut rows = Vec::with_capacity(rates.len() + 1);
    rows.push(ComparisonRow {
        label: investment.fund_name().to_string(),
        kind: RowKind::Fund,
        start_price: investment.fund_unit_price(),
        quantity_acquired: f64::from(investment.fund_quantity()),
        current_price: investment.fund_current_price(),
        current_value: fund_value,
        return_percent: return_percent(fund_value, amount),
    });

    for (instrument, start, current) in rates {
        let units = amount / start;
        let value = units * current;
        debug!(
            instrument = %instrument,
            units, value, "Valued alternative purchase"
        );
        rows.push(ComparisonRow {
            label: instrument.label().to_string(),
            kind: RowKind::Instrument(instrument),
            start_price: start,
            quantity_acquired: units,
            current_price: current,
            current_value: value,
            return_percent: return_percent(value, amount),
        });
    }

    Ok(rows)
}
