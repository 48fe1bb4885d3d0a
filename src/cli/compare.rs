use super::ui;
use crate::core::comparison::{self, Comparison};
use crate::core::config::FundConfig;
use crate::core::rates::{BASE_CURRENCY, RateProvider};
use crate::core::valuation::{Investment, RowKind};
use anyhow::{Result, bail};
use chrono::NaiveDate;
use comfy_table::Cell;
use tracing::{debug, info};

pub const DEFAULT_FUND_NAME: &str = "V Mall Fon";
pub const DEFAULT_UNIT_PRICE: f64 = 20_100.0;
pub const DEFAULT_QUANTITY: u32 = 50;
pub const DEFAULT_CURRENT_PRICE: f64 = 35_133.0;

pub fn default_purchase_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 26).unwrap_or_default()
}

/// Purchase details as given on the command line. Anything left out falls
/// back to the config file and then to the built-in example purchase.
#[derive(Debug, Clone, Default)]
pub struct CompareRequest {
    pub fund_name: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub unit_price: Option<f64>,
    pub quantity: Option<u32>,
    pub current_price: Option<f64>,
}

impl CompareRequest {
    pub fn resolve(self, defaults: &FundConfig, today: NaiveDate) -> Result<Investment> {
        let fund_name = self
            .fund_name
            .or_else(|| defaults.name.clone())
            .unwrap_or_else(|| DEFAULT_FUND_NAME.to_string());
        let purchase_date = self
            .purchase_date
            .or(defaults.purchase_date)
            .unwrap_or_else(default_purchase_date);
        let unit_price = self
            .unit_price
            .or(defaults.unit_price)
            .unwrap_or(DEFAULT_UNIT_PRICE);
        let quantity = self.quantity.or(defaults.quantity).unwrap_or(DEFAULT_QUANTITY);
        let current_price = self
            .current_price
            .or(defaults.current_price)
            .unwrap_or(DEFAULT_CURRENT_PRICE);

        if purchase_date > today {
            bail!("Purchase date {purchase_date} is in the future (today is {today})");
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            bail!("Purchase price must be a non-negative number, got {unit_price}");
        }
        if !current_price.is_finite() || current_price < 0.0 {
            bail!("Current price must be a non-negative number, got {current_price}");
        }

        Ok(Investment::new(
            fund_name,
            purchase_date,
            unit_price,
            quantity,
            current_price,
        )?)
    }
}

/// Renders the comparison table with a short header describing the purchase.
pub fn render_comparison(investment: &Investment, comparison: &Comparison) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Instrument"),
        ui::header_cell(&format!("Start Price ({BASE_CURRENCY})")),
        ui::header_cell("Quantity Acquired"),
        ui::header_cell(&format!("Current Price ({BASE_CURRENCY})")),
        ui::header_cell(&format!("Current Value ({BASE_CURRENCY})")),
        ui::header_cell("Return %"),
    ]);

    for row in &comparison.rows {
        let quantity = match row.kind {
            RowKind::Fund => format!("{} units", investment.fund_quantity()),
            RowKind::Instrument(instrument) => ui::format_units(instrument, row.quantity_acquired),
        };
        table.add_row(vec![
            Cell::new(&row.label),
            ui::number_cell(ui::format_amount(row.start_price)),
            ui::number_cell(quantity),
            ui::number_cell(ui::format_amount(row.current_price)),
            ui::number_cell(ui::format_amount(row.current_value)),
            ui::return_cell(row.return_percent),
        ]);
    }

    let mut output = format!(
        "Fund vs Currency & Gold: {}\n",
        ui::style_text(investment.fund_name(), ui::StyleType::Title)
    );
    output.push_str(&format!(
        "{} {}   {} {}\n\n",
        ui::style_text("Purchased:", ui::StyleType::Label),
        investment.purchase_date().format("%Y-%m-%d"),
        ui::style_text("Invested:", ui::StyleType::Label),
        ui::format_amount(investment.amount_invested()),
    ));
    output.push_str(&table.to_string());
    output
}

pub async fn run(
    investment: &Investment,
    provider: &(dyn RateProvider + Send + Sync),
) -> Result<()> {
    info!("Comparing {} against USD, EUR and gold", investment.fund_name());
    debug!(?investment, "Resolved investment");

    println!(
        "{}",
        ui::style_text(
            "Note: gold (XAU) data is not available for every historical date; the comparison fails if it is missing.",
            ui::StyleType::Note
        )
    );

    let pb = ui::new_spinner("Fetching exchange rates...");
    let result = comparison::compare(investment, provider).await;
    pb.finish_and_clear();

    let comparison = result?;
    println!("{}", render_comparison(investment, &comparison));
    println!(
        "\n{}",
        ui::style_text(
            "Rates provided by https://exchangerate.host",
            ui::StyleType::Subtle
        )
    );
    Ok(())
}
