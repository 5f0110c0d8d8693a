//! # Country Facts Module
//!
//! Gathers what the country details view shows about a country from public
//! third-party APIs. None of this goes through the Photomap backend.
//!
//! ## Pipeline
//!
//! ```text
//! stage 1: metadata   RestCountries ──(fails)──► GeoDB
//!                          │
//! stage 2 (concurrent):    ├── weather      (needs capital + API key)
//!                          ├── exchange     (needs currency + API key)
//!                          ├── World Bank   (8 indicators, concurrent)
//!                          └── Factbook     (needs a mapped region)
//! ```
//!
//! Stage 1 is the only one that can fail the whole lookup: without a country
//! there is nothing to show. Every stage 2 lookup is best effort and a failure
//! just leaves its part of [`CountryDetails`] empty.

mod exchange;
mod factbook;
mod metadata;
mod weather;
mod worldbank;

use std::fmt;

use reqwest::{Client, Response, Url};

use crate::{config::ProviderEndpoints, countries, types::CountryDetails, utils};

pub use exchange::fetch_exchange_rate;
pub use factbook::{factbook_location, fetch_factbook};
pub use metadata::{NOT_AVAILABLE, fetch_metadata};
pub use weather::fetch_weather;
pub use worldbank::{INDICATORS, WorldBankIndicator, fetch_indicators};

#[derive(Debug)]
pub enum EnrichmentError {
    Request(reqwest::Error),
    Status(u16),
    /// No provider knows the country.
    CountryNotFound(String),
    /// The provider answered but without the expected field.
    MissingData(&'static str),
    MissingApiKey(&'static str),
    NotMapped(String),
    InvalidUrl(String),
}

impl fmt::Display for EnrichmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrichmentError::Request(e) => write!(f, "request failed: {}", e),
            EnrichmentError::Status(status) => write!(f, "provider responded with status {}", status),
            EnrichmentError::CountryNotFound(id) => {
                write!(f, "unable to fetch country data for '{}' from any provider", id)
            }
            EnrichmentError::MissingData(field) => write!(f, "response has no {}", field),
            EnrichmentError::MissingApiKey(name) => write!(f, "{} is not configured", name),
            EnrichmentError::NotMapped(id) => write!(f, "no Factbook entry for '{}'", id),
            EnrichmentError::InvalidUrl(base) => write!(f, "'{}' is not a valid base URL", base),
        }
    }
}

impl std::error::Error for EnrichmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnrichmentError::Request(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for EnrichmentError {
    fn from(err: reqwest::Error) -> Self {
        EnrichmentError::Request(err)
    }
}

pub(crate) fn ensure_success(response: Response) -> Result<Response, EnrichmentError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(EnrichmentError::Status(response.status().as_u16()))
    }
}

/// Appends percent-encoded path segments to a provider base URL.
pub(crate) fn provider_url(base: &str, segments: &[&str]) -> Result<Url, EnrichmentError> {
    let invalid = || EnrichmentError::InvalidUrl(base.to_string());
    let mut url = Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Runs the country facts pipeline against a set of providers.
#[derive(Debug, Clone)]
pub struct CountryDetailsService {
    client: Client,
    endpoints: ProviderEndpoints,
}

impl CountryDetailsService {
    pub fn new(endpoints: ProviderEndpoints) -> Self {
        Self {
            client: Client::new(),
            endpoints,
        }
    }

    pub fn from_env() -> Self {
        Self::new(ProviderEndpoints::from_env())
    }

    pub fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    /// Collects everything known about `country_id`.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichmentError::CountryNotFound`] when neither RestCountries
    /// nor GeoDB can describe the country. Failures of the other providers
    /// never surface here.
    pub async fn details(&self, country_id: &str) -> Result<CountryDetails, EnrichmentError> {
        let country_id = country_id.trim().to_lowercase();
        let metadata = fetch_metadata(&self.client, &self.endpoints, &country_id).await?;

        let has_capital = metadata.capital != NOT_AVAILABLE;
        let has_currency = metadata.currency != NOT_AVAILABLE;

        let (weather, exchange_rate, indicators, factbook) = tokio::join!(
            async {
                if !has_capital {
                    return None;
                }
                fetch_weather(&self.client, &self.endpoints, &metadata.capital)
                    .await
                    .ok()
            },
            async {
                if !has_currency {
                    return None;
                }
                fetch_exchange_rate(&self.client, &self.endpoints, &metadata.currency)
                    .await
                    .ok()
                    .flatten()
            },
            async {
                let indicators = fetch_indicators(&self.client, &self.endpoints, &country_id).await;
                (!indicators.is_empty()).then_some(indicators)
            },
            async {
                fetch_factbook(&self.client, &self.endpoints, &country_id)
                    .await
                    .ok()
            }
        );

        let local_time = weather
            .as_ref()
            .and_then(|w| utils::local_time(w.timezone));
        let flights_url = has_capital.then(|| utils::flights_url(&metadata.capital));

        Ok(CountryDetails {
            name: countries::display_name(&country_id),
            country_id,
            metadata,
            weather,
            local_time,
            exchange_rate,
            indicators,
            factbook,
            flights_url,
        })
    }
}
