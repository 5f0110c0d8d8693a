use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::ProviderEndpoints,
    enrichment::{EnrichmentError, ensure_success, provider_url},
};

pub const BASE_CURRENCY: &str = "GBP";

#[derive(Deserialize)]
struct LatestRates {
    #[serde(default)]
    conversion_rates: HashMap<String, f64>,
}

/// How much of `currency` one pound buys, with two decimals.
///
/// `Ok(None)` when the provider does not list the currency.
pub async fn fetch_exchange_rate(
    client: &Client,
    endpoints: &ProviderEndpoints,
    currency: &str,
) -> Result<Option<String>, EnrichmentError> {
    let key = endpoints
        .exchange_rate_api_key
        .as_deref()
        .ok_or(EnrichmentError::MissingApiKey("EXCHANGE_RATE_API_KEY"))?;

    let url = provider_url(
        &endpoints.exchange_rate_url,
        &["v6", key, "latest", BASE_CURRENCY],
    )?;
    let response = ensure_success(client.get(url).send().await?)?;
    let rates: LatestRates = response.json().await?;

    Ok(rates
        .conversion_rates
        .get(&currency.to_uppercase())
        .map(|rate| format!("{:.2}", rate)))
}
