//! Fetches both rate sets for an investment and values it.
use crate::core::error::ComparisonError;
use crate::core::rates::{RateMode, RateProvider, RateSet};
use crate::core::valuation::{self, ComparisonRow, Investment};
use futures::future::join;
use tracing::info;

/// Rates and rows produced by one comparison run.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub historical: RateSet,
    pub live: RateSet,
    pub rows: Vec<ComparisonRow>,
}

/// Fetches the purchase-date and live rates concurrently, then runs the
/// valuation. Either fetch failing aborts before any row is produced.
pub async fn compare(
    investment: &Investment,
    provider: &(dyn RateProvider + Send + Sync),
) -> Result<Comparison, ComparisonError> {
    let historical_mode = RateMode::Historical(investment.purchase_date());
    let (historical, live) = join(
        provider.fetch(historical_mode),
        provider.fetch(RateMode::Live),
    )
    .await;

    let historical = historical.map_err(|source| ComparisonError::Rates {
        side: historical_mode.side(),
        source,
    })?;
    let live = live.map_err(|source| ComparisonError::Rates {
        side: RateMode::Live.side(),
        source,
    })?;
    info!("Fetched historical and live rates");

    let rows = valuation::compute(investment, &historical, &live)?;
    Ok(Comparison {
        historical,
        live,
        rows,
    })
}
