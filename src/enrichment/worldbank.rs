use futures::future::join_all;
use reqwest::Client;
use serde_json::Value;

use crate::{
    config::ProviderEndpoints,
    enrichment::{EnrichmentError, ensure_success, provider_url},
    types::{Indicator, WorldBankIndicators},
    utils,
};

/// The World Bank indicators shown for a country, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldBankIndicator {
    Gdp,
    LifeExpectancy,
    GniPerCapita,
    GdpGrowth,
    InternetUsers,
    UrbanPopulation,
    Unemployment,
    /// GNI per capita at PPP, standing in for a development index.
    HdiProxy,
}

pub const INDICATORS: [WorldBankIndicator; 8] = [
    WorldBankIndicator::Gdp,
    WorldBankIndicator::LifeExpectancy,
    WorldBankIndicator::GniPerCapita,
    WorldBankIndicator::GdpGrowth,
    WorldBankIndicator::InternetUsers,
    WorldBankIndicator::UrbanPopulation,
    WorldBankIndicator::Unemployment,
    WorldBankIndicator::HdiProxy,
];

impl WorldBankIndicator {
    pub fn code(self) -> &'static str {
        match self {
            WorldBankIndicator::Gdp => "NY.GDP.MKTP.CD",
            WorldBankIndicator::LifeExpectancy => "SP.DYN.LE00.IN",
            WorldBankIndicator::GniPerCapita => "NY.GNP.PCAP.CD",
            WorldBankIndicator::GdpGrowth => "NY.GDP.MKTP.KD.ZG",
            WorldBankIndicator::InternetUsers => "IT.NET.USER.ZS",
            WorldBankIndicator::UrbanPopulation => "SP.URB.TOTL.IN.ZS",
            WorldBankIndicator::Unemployment => "SL.UEM.TOTL.ZS",
            WorldBankIndicator::HdiProxy => "NY.GNP.PCAP.PP.CD",
        }
    }

    fn format(self, value: f64) -> String {
        match self {
            WorldBankIndicator::Gdp
            | WorldBankIndicator::GniPerCapita
            | WorldBankIndicator::HdiProxy => utils::format_usd(value),
            WorldBankIndicator::LifeExpectancy => utils::format_years(value),
            WorldBankIndicator::GdpGrowth
            | WorldBankIndicator::InternetUsers
            | WorldBankIndicator::UrbanPopulation
            | WorldBankIndicator::Unemployment => utils::format_percent(value),
        }
    }

    fn slot(self, indicators: &mut WorldBankIndicators) -> &mut Option<Indicator> {
        match self {
            WorldBankIndicator::Gdp => &mut indicators.gdp,
            WorldBankIndicator::LifeExpectancy => &mut indicators.life_expectancy,
            WorldBankIndicator::GniPerCapita => &mut indicators.gni_per_capita,
            WorldBankIndicator::GdpGrowth => &mut indicators.gdp_growth,
            WorldBankIndicator::InternetUsers => &mut indicators.internet_users,
            WorldBankIndicator::UrbanPopulation => &mut indicators.urban_population,
            WorldBankIndicator::Unemployment => &mut indicators.unemployment,
            WorldBankIndicator::HdiProxy => &mut indicators.hdi_proxy,
        }
    }
}

const PER_PAGE: &str = "10";

struct RawEntry {
    value: f64,
    year: String,
}

/// Fetches every indicator concurrently.
///
/// An indicator that fails or has no value in the last ten entries is left
/// out; the result is empty only if all of them are.
pub async fn fetch_indicators(
    client: &Client,
    endpoints: &ProviderEndpoints,
    country_id: &str,
) -> WorldBankIndicators {
    let results = join_all(
        INDICATORS
            .iter()
            .map(|indicator| fetch_indicator(client, endpoints, country_id, indicator.code())),
    )
    .await;

    let mut indicators = WorldBankIndicators::default();
    for (indicator, result) in INDICATORS.into_iter().zip(results) {
        let Ok(Some(entry)) = result else {
            continue;
        };

        if indicator == WorldBankIndicator::Gdp {
            indicators.gdp_raw = Some(entry.value);
        }
        *indicator.slot(&mut indicators) = Some(Indicator {
            value: indicator.format(entry.value),
            year: entry.year,
        });
    }

    indicators
}

async fn fetch_indicator(
    client: &Client,
    endpoints: &ProviderEndpoints,
    country_id: &str,
    code: &str,
) -> Result<Option<RawEntry>, EnrichmentError> {
    let mut url = provider_url(
        &endpoints.worldbank_url,
        &["v2", "country", country_id, "indicator", code],
    )?;
    url.query_pairs_mut()
        .append_pair("format", "json")
        .append_pair("per_page", PER_PAGE);

    let response = ensure_success(client.get(url).send().await?)?;
    let body: Value = response.json().await?;

    Ok(first_value(&body))
}

// the payload is [paging, entries]; entries is null for unknown countries
fn first_value(body: &Value) -> Option<RawEntry> {
    body.get(1)?
        .as_array()?
        .iter()
        .find_map(|entry| {
            let value = entry.get("value")?.as_f64()?;
            let year = entry
                .get("date")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Some(RawEntry { value, year })
        })
}
