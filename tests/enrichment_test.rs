use std::collections::HashSet;

use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use reqwest::Client;
use serde_json::{Value, json};

use photomap::{
    config::ProviderEndpoints,
    enrichment::{
        CountryDetailsService, EnrichmentError, INDICATORS, NOT_AVAILABLE, WorldBankIndicator,
        factbook_location, fetch_factbook, fetch_indicators,
    },
};

// Helper function to serve a router on a random local port
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn endpoints(base: &str) -> ProviderEndpoints {
    ProviderEndpoints {
        restcountries_url: base.to_string(),
        geodb_url: base.to_string(),
        geodb_api_key: Some("geo-key".to_string()),
        openweather_url: base.to_string(),
        openweather_api_key: Some("weather-key".to_string()),
        exchange_rate_url: base.to_string(),
        exchange_rate_api_key: Some("rate-key".to_string()),
        worldbank_url: base.to_string(),
        factbook_url: base.to_string(),
    }
}

async fn restcountries(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    match id.as_str() {
        "pt" => Ok(Json(json!([{
            "languages": { "por": "Portuguese" },
            "currencies": { "EUR": { "name": "Euro", "symbol": "€" } },
            "capital": ["Lisbon"],
            "population": 10300000
        }]))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn geodb(headers: HeaderMap, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    if headers.get("x-rapidapi-key").and_then(|v| v.to_str().ok()) != Some("geo-key") {
        return Err(StatusCode::FORBIDDEN);
    }
    match id.as_str() {
        "BR" => Ok(Json(json!({
            "data": { "code": "BR", "capital": "Brasília", "population": 203000000 }
        }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn indicator(Path((_, code)): Path<(String, String)>) -> Result<Json<Value>, StatusCode> {
    let page = json!({ "page": 1, "per_page": 10 });
    let entries = match code.as_str() {
        "NY.GDP.MKTP.CD" => json!([
            { "value": null, "date": "2023" },
            { "value": 250000000000.0, "date": "2022" }
        ]),
        "SP.DYN.LE00.IN" => json!([{ "value": 81.234, "date": "2022" }]),
        "NY.GNP.PCAP.CD" => json!([{ "value": 26000.0, "date": "2022" }]),
        "NY.GNP.PCAP.PP.CD" => json!([{ "value": 41000.0, "date": "2022" }]),
        "NY.GDP.MKTP.KD.ZG" => json!([{ "value": 2.3, "date": "2022" }]),
        "SP.URB.TOTL.IN.ZS" => json!([{ "value": 67.0, "date": "2021" }]),
        "SL.UEM.TOTL.ZS" => Value::Null,
        _ => return Err(StatusCode::INTERNAL_SERVER_ERROR),
    };
    Ok(Json(json!([page, entries])))
}

fn providers(weather_ok: bool) -> Router {
    let weather = move || async move {
        if weather_ok {
            Ok(Json(json!({ "main": { "temp": 21.5 }, "timezone": 3600 })))
        } else {
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    };

    Router::new()
        .route("/v3.1/alpha/{id}", get(restcountries))
        .route("/v1/geo/countries/{id}", get(geodb))
        .route("/data/2.5/weather", get(weather))
        .route(
            "/v6/{key}/latest/GBP",
            get(|| async { Json(json!({ "conversion_rates": { "EUR": 1.1734, "GBP": 1 } })) }),
        )
        .route("/v2/country/{id}/indicator/{code}", get(indicator))
        .route(
            "/europe/po.json",
            get(|| async {
                Json(json!({
                    "People and Society": { "Religions": { "text": "Roman Catholic 80.2%" } }
                }))
            }),
        )
        .route(
            "/europe/uk.json",
            get(|| async {
                Json(json!({ "People and Society": { "Religions": "Christian 46.2%" } }))
            }),
        )
}

#[tokio::test]
async fn test_weather_failure_does_not_fail_details() {
    let base = serve(providers(false)).await;
    let service = CountryDetailsService::new(endpoints(&base));

    let details = service.details("PT").await.unwrap();

    assert_eq!(details.country_id, "pt");
    assert_eq!(details.name, "Portugal");
    assert_eq!(details.metadata.capital, "Lisbon");
    assert_eq!(details.metadata.currency, "EUR");
    assert_eq!(details.metadata.official_language, "Portuguese");
    assert_eq!(details.metadata.population, 10_300_000);
    assert!(details.weather.is_none());
    assert!(details.local_time.is_none());

    // the other widgets are unaffected
    assert_eq!(details.exchange_rate.as_deref(), Some("1.17"));
    assert_eq!(
        details.factbook.unwrap().religion.as_deref(),
        Some("Roman Catholic 80.2%")
    );
    assert_eq!(
        details.flights_url.as_deref(),
        Some("https://www.google.com/travel/flights?q=Flights+from+London+to+Lisbon")
    );
}

#[tokio::test]
async fn test_weather_gives_local_time() {
    let base = serve(providers(true)).await;
    let service = CountryDetailsService::new(endpoints(&base));

    let details = service.details("pt").await.unwrap();

    let weather = details.weather.unwrap();
    assert_eq!(weather.temperature, 21.5);
    assert_eq!(weather.timezone, 3600);
    assert_eq!(details.local_time.unwrap().len(), 8);
}

#[tokio::test]
async fn test_missing_keys_skip_weather_and_exchange() {
    let base = serve(providers(true)).await;
    let mut endpoints = endpoints(&base);
    endpoints.openweather_api_key = None;
    endpoints.exchange_rate_api_key = None;

    let details = CountryDetailsService::new(endpoints)
        .details("pt")
        .await
        .unwrap();

    assert!(details.weather.is_none());
    assert!(details.exchange_rate.is_none());
    assert_eq!(details.metadata.capital, "Lisbon");
}

#[tokio::test]
async fn test_geodb_fallback() {
    let base = serve(providers(true)).await;
    let service = CountryDetailsService::new(endpoints(&base));

    let details = service.details("br").await.unwrap();

    assert_eq!(details.metadata.capital, "Brasília");
    assert_eq!(details.metadata.population, 203_000_000);
    assert_eq!(details.metadata.official_language, NOT_AVAILABLE);
    assert_eq!(details.metadata.currency, NOT_AVAILABLE);
    assert!(details.exchange_rate.is_none());
}

#[tokio::test]
async fn test_unknown_country_is_not_found() {
    let base = serve(providers(true)).await;
    let service = CountryDetailsService::new(endpoints(&base));

    let err = service.details("xx").await.unwrap_err();
    assert!(matches!(err, EnrichmentError::CountryNotFound(id) if id == "xx"));
}

#[tokio::test]
async fn test_geodb_needs_api_key() {
    let base = serve(providers(true)).await;
    let mut endpoints = endpoints(&base);
    endpoints.geodb_api_key = None;

    let err = CountryDetailsService::new(endpoints)
        .details("br")
        .await
        .unwrap_err();
    assert!(matches!(err, EnrichmentError::CountryNotFound(_)));
}

#[tokio::test]
async fn test_indicators_take_first_value_and_format() {
    let base = serve(providers(true)).await;

    let indicators = fetch_indicators(&Client::new(), &endpoints(&base), "pt").await;

    let gdp = indicators.gdp.unwrap();
    assert_eq!(gdp.value, "$250.00 Billion");
    assert_eq!(gdp.year, "2022");
    assert_eq!(indicators.gdp_raw, Some(250_000_000_000.0));

    assert_eq!(indicators.life_expectancy.unwrap().value, "81.2 years");
    assert_eq!(indicators.gni_per_capita.unwrap().value, "$26,000");
    assert_eq!(indicators.hdi_proxy.unwrap().value, "$41,000");
    assert_eq!(indicators.gdp_growth.unwrap().value, "2.3%");
    assert_eq!(indicators.urban_population.unwrap().year, "2021");

    // null entries and failed requests leave the indicator out
    assert!(indicators.unemployment.is_none());
    assert!(indicators.internet_users.is_none());
}

#[tokio::test]
async fn test_factbook_religion_as_plain_text() {
    let base = serve(providers(true)).await;

    let facts = fetch_factbook(&Client::new(), &endpoints(&base), "gb")
        .await
        .unwrap();
    assert_eq!(facts.religion.as_deref(), Some("Christian 46.2%"));
}

#[tokio::test]
async fn test_factbook_unmapped_country() {
    let base = serve(providers(true)).await;

    let err = fetch_factbook(&Client::new(), &endpoints(&base), "aq")
        .await
        .unwrap_err();
    assert!(matches!(err, EnrichmentError::NotMapped(_)));
}

#[test]
fn test_factbook_location_uses_gec_codes() {
    assert_eq!(factbook_location("GB"), Some(("europe", "uk")));
    assert_eq!(factbook_location("de"), Some(("europe", "gm")));
    assert_eq!(factbook_location("br"), Some(("south-america", "br")));
    assert_eq!(factbook_location("xx"), None);
}

#[test]
fn test_indicator_codes_are_distinct() {
    let codes: HashSet<&str> = INDICATORS.iter().map(|i| i.code()).collect();
    assert_eq!(codes.len(), INDICATORS.len());
    assert_eq!(INDICATORS[0], WorldBankIndicator::Gdp);
    assert_eq!(WorldBankIndicator::HdiProxy.code(), "NY.GNP.PCAP.PP.CD");
}
