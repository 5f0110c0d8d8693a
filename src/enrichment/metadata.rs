use reqwest::Client;
use serde_json::Value;

use crate::{
    config::ProviderEndpoints,
    enrichment::{EnrichmentError, ensure_success, provider_url},
    types::CountryMetadata,
};

/// Placeholder for facts a provider did not report.
pub const NOT_AVAILABLE: &str = "N/A";

const GEODB_HOST: &str = "wft-geo-db.p.rapidapi.com";

/// Resolves language, currency, capital and population of a country.
///
/// RestCountries is asked first. If it fails for any reason GeoDB is tried,
/// which only knows capital and population; both failing is
/// [`EnrichmentError::CountryNotFound`].
pub async fn fetch_metadata(
    client: &Client,
    endpoints: &ProviderEndpoints,
    country_id: &str,
) -> Result<CountryMetadata, EnrichmentError> {
    match from_restcountries(client, endpoints, country_id).await {
        Ok(metadata) => Ok(metadata),
        Err(_) => from_geodb(client, endpoints, country_id)
            .await
            .map_err(|_| EnrichmentError::CountryNotFound(country_id.to_string())),
    }
}

async fn from_restcountries(
    client: &Client,
    endpoints: &ProviderEndpoints,
    country_id: &str,
) -> Result<CountryMetadata, EnrichmentError> {
    let url = provider_url(
        &endpoints.restcountries_url,
        &["v3.1", "alpha", country_id],
    )?;
    let response = ensure_success(client.get(url).send().await?)?;
    let body: Value = response.json().await?;

    let country = body
        .as_array()
        .and_then(|a| a.first())
        .ok_or(EnrichmentError::MissingData("country"))?;

    // languages and currencies are objects keyed by code, first key wins
    let official_language = country["languages"]
        .as_object()
        .and_then(|l| l.values().next())
        .and_then(Value::as_str)
        .unwrap_or(NOT_AVAILABLE)
        .to_string();
    let currency = country["currencies"]
        .as_object()
        .and_then(|c| c.keys().next())
        .map(String::as_str)
        .unwrap_or(NOT_AVAILABLE)
        .to_string();
    let capital = country["capital"]
        .as_array()
        .and_then(|c| c.first())
        .and_then(Value::as_str)
        .unwrap_or(NOT_AVAILABLE)
        .to_string();

    Ok(CountryMetadata {
        official_language,
        currency,
        capital,
        population: country["population"].as_u64().unwrap_or(0),
    })
}

async fn from_geodb(
    client: &Client,
    endpoints: &ProviderEndpoints,
    country_id: &str,
) -> Result<CountryMetadata, EnrichmentError> {
    let key = endpoints
        .geodb_api_key
        .as_deref()
        .ok_or(EnrichmentError::MissingApiKey("GEODB_API_KEY"))?;

    let id = country_id.to_uppercase();
    let url = provider_url(&endpoints.geodb_url, &["v1", "geo", "countries", &id])?;
    let response = client
        .get(url)
        .header("X-RapidAPI-Key", key)
        .header("X-RapidAPI-Host", GEODB_HOST)
        .send()
        .await?;
    let body: Value = ensure_success(response)?.json().await?;

    let country = body
        .get("data")
        .filter(|d| d.is_object())
        .ok_or(EnrichmentError::MissingData("data"))?;

    Ok(CountryMetadata {
        official_language: NOT_AVAILABLE.to_string(),
        currency: NOT_AVAILABLE.to_string(),
        capital: country["capital"]
            .as_str()
            .filter(|c| !c.is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        population: country["population"].as_u64().unwrap_or(0),
    })
}
