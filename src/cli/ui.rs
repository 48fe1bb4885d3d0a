use crate::core::error::{ComparisonError, RateError, ValuationError};
use crate::core::rates::Instrument;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Error,
    Note,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Error => style(text).red(),
        StyleType::Note => style(text).yellow(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// A right-aligned cell.
pub fn number_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Creates a cell for displaying a return with color coding.
pub fn return_cell(change: f64) -> Cell {
    let color = if change >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(format_percent(change))
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

/// Groups the integer part in thousands: `1256250.0` becomes `1,256,250.00`.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// TRY amount with two decimals.
pub fn format_amount(value: f64) -> String {
    format!("{} TL", format_grouped(value, 2))
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Units of an instrument: gold is shown to four decimals.
pub fn format_units(instrument: Instrument, units: f64) -> String {
    let decimals = match instrument {
        Instrument::Xau => 4,
        Instrument::Usd | Instrument::Eur => 2,
    };
    format!("{} {}", format_grouped(units, decimals), instrument.unit_symbol())
}

fn describe_rate_error(error: &RateError) -> String {
    match error {
        RateError::MissingCredential => format!(
            "No API key found. Set the '{}' environment variable or providers.exchangerate.access_key in the config file.",
            crate::core::config::ACCESS_KEY_ENV
        ),
        RateError::FutureDate { date, today } => {
            format!("The purchase date {date} is after today ({today}).")
        }
        RateError::Transport(e) => format!("Could not reach the exchange rate service: {e}"),
        RateError::Service { message } => format!("The exchange rate service reported an error: {message}"),
        RateError::Http { status } => {
            format!("The exchange rate service is unavailable (HTTP {status}).")
        }
        RateError::Decode(e) => {
            format!("The exchange rate service sent an unreadable response: {e}")
        }
        RateError::PartialData { missing } if missing.as_slice() == [Instrument::Xau] => {
            "Gold (XAU) prices are not published for this date. Try a nearby purchase date."
                .to_string()
        }
        RateError::PartialData { missing } => format!(
            "The exchange rate service has no data for {}.",
            missing
                .iter()
                .map(Instrument::code)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Turns an application error into the message shown to the user.
pub fn describe_error(error: &anyhow::Error) -> String {
    if let Some(err) = error.downcast_ref::<ComparisonError>() {
        return match err {
            ComparisonError::Rates { side, source } => {
                format!("Could not get {side} rates. {}", describe_rate_error(source))
            }
            ComparisonError::Valuation(ValuationError::MissingRate { instrument, side }) => {
                format!("The {side} rates have no usable price for {instrument}; the comparison cannot be made.")
            }
            ComparisonError::Valuation(e) => e.to_string(),
        };
    }
    if let Some(err) = error.downcast_ref::<RateError>() {
        return describe_rate_error(err);
    }
    format!("{error:#}")
}

/// Creates a spinner shown while rates are fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
