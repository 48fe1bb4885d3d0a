use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::error::RateError;
use crate::core::rates::{BASE_CURRENCY, Instrument, RateMode, RateProvider, RateSet};

/// RateProvider backed by the exchangerate.host `historical` and `live` endpoints.
pub struct ExchangeRateHostProvider {
    base_url: String,
    access_key: Option<String>,
    client: reqwest::Client,
}

impl ExchangeRateHostProvider {
    pub fn new(base_url: &str, access_key: Option<String>) -> Result<Self, RateError> {
        let client = reqwest::Client::builder().user_agent("fundvs/0.1").build()?;
        Ok(ExchangeRateHostProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key,
            client,
        })
    }

    fn endpoint_url(&self, date: Option<NaiveDate>) -> String {
        let endpoint = if date.is_some() { "historical" } else { "live" };
        format!("{}/{}", self.base_url, endpoint)
    }

    fn query_params(access_key: &str, date: Option<NaiveDate>) -> Vec<(&'static str, String)> {
        let currencies = Instrument::ALL
            .iter()
            .map(Instrument::code)
            .collect::<Vec<_>>()
            .join(",");
        let mut params = vec![("access_key", access_key.to_string())];
        if let Some(date) = date {
            params.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        params.push(("source", BASE_CURRENCY.to_string()));
        params.push(("currencies", currencies));
        params
    }
}

#[derive(Debug, Deserialize)]
struct RateResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    quotes: HashMap<String, Option<f64>>,
    error: Option<RateResponseError>,
}

#[derive(Debug, Deserialize)]
struct RateResponseError {
    info: Option<String>,
}

fn default_success() -> bool {
    true
}

/// Converts `TRY<CODE>` quotes (units of CODE per 1 TRY) into TRY per unit.
fn rates_from_quotes(quotes: &HashMap<String, Option<f64>>) -> Result<RateSet, RateError> {
    let mut rates = Vec::new();
    let mut missing = Vec::new();

    for instrument in Instrument::ALL {
        let key = format!("{BASE_CURRENCY}{}", instrument.code());
        match quotes.get(&key).copied().flatten() {
            Some(quote) if quote.is_finite() && quote > 0.0 => rates.push((instrument, 1.0 / quote)),
            _ => missing.push(instrument),
        }
    }

    if !missing.is_empty() {
        return Err(RateError::PartialData { missing });
    }
    Ok(RateSet::new(rates))
}

#[async_trait]
impl RateProvider for ExchangeRateHostProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(mode = %mode))]
    async fn fetch(&self, mode: RateMode) -> Result<RateSet, RateError> {
        let access_key = self
            .access_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(RateError::MissingCredential)?;

        let date = match mode {
            RateMode::Historical(date) => {
                let today = Local::now().date_naive();
                if date > today {
                    return Err(RateError::FutureDate { date, today });
                }
                Some(date)
            }
            RateMode::Live => None,
        };

        let url = self.endpoint_url(date);
        debug!("Requesting rates from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&Self::query_params(access_key, date))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, "Received exchange rate response");

        let data: RateResponse = match serde_json::from_str(&body) {
            Ok(data) => data,
            Err(_) if !status.is_success() => {
                return Err(RateError::Http {
                    status: status.as_u16(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        if !data.success {
            let message = data
                .error
                .and_then(|e| e.info)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(RateError::Service { message });
        }
        if !status.is_success() {
            return Err(RateError::Http {
                status: status.as_u16(),
            });
        }

        rates_from_quotes(&data.quotes)
    }
}
