use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::ProviderEndpoints,
    enrichment::{EnrichmentError, ensure_success},
    types::Weather,
};

#[derive(Deserialize)]
struct WeatherResponse {
    main: MainReading,
    #[serde(default)]
    timezone: i32,
}

#[derive(Deserialize)]
struct MainReading {
    temp: f64,
}

/// Current temperature (°C) and UTC offset of a city, from OpenWeatherMap.
pub async fn fetch_weather(
    client: &Client,
    endpoints: &ProviderEndpoints,
    capital: &str,
) -> Result<Weather, EnrichmentError> {
    let key = endpoints
        .openweather_api_key
        .as_deref()
        .ok_or(EnrichmentError::MissingApiKey("OPENWEATHER_API_KEY"))?;

    let url = format!("{}/data/2.5/weather", endpoints.openweather_url);
    let response = client
        .get(&url)
        .query(&[("q", capital), ("units", "metric"), ("appid", key)])
        .send()
        .await?;
    let data: WeatherResponse = ensure_success(response)?.json().await?;

    Ok(Weather {
        temperature: data.main.temp,
        timezone: data.timezone,
    })
}
