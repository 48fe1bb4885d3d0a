use super::ui;
use crate::core::rates::{BASE_CURRENCY, RateMode, RateProvider, RateSet};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::Cell;
use tracing::info;

pub fn render_rates(mode: RateMode, rates: &RateSet) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Instrument"),
        ui::header_cell(&format!("{BASE_CURRENCY} per unit")),
    ]);
    for (instrument, rate) in rates.iter() {
        table.add_row(vec![
            Cell::new(instrument.label()),
            ui::number_cell(ui::format_grouped(rate, 4)),
        ]);
    }

    format!(
        "Exchange rates: {}\n\n{}",
        ui::style_text(&mode.to_string(), ui::StyleType::Title),
        table
    )
}

/// Prints one rate set: for `date` when given, otherwise live.
pub async fn run(provider: &(dyn RateProvider + Send + Sync), date: Option<NaiveDate>) -> Result<()> {
    let mode = date.map_or(RateMode::Live, RateMode::Historical);
    info!("Fetching {} rates", mode);

    let pb = ui::new_spinner("Fetching exchange rates...");
    let result = provider.fetch(mode).await;
    pb.finish_and_clear();

    println!("{}", render_rates(mode, &result?));
    Ok(())
}
