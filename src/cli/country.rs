use tabled::Table;

use crate::{
    cli::spinner,
    enrichment::{CountryDetailsService, EnrichmentError, NOT_AVAILABLE},
    error, info,
    types::{CountryDetails, FactTableRow, Indicator},
    utils, warning,
};

const NOT_AVAILABLE_TEXT: &str = "not available";

/// Shows facts about a country; `flights` also opens a flight search to its capital.
pub async fn country(country_id: String, flights: bool) {
    let service = CountryDetailsService::from_env();

    let pb = spinner("Fetching country details...");
    let result = service.details(&country_id).await;
    pb.finish_and_clear();

    let details = match result {
        Ok(d) => d,
        Err(e @ EnrichmentError::CountryNotFound(_)) => error!("{}", e),
        Err(e) => error!("Cannot load country details. Err: {}", e),
    };

    info!("{} ({})", details.name, details.country_id.to_uppercase());
    println!("{}", Table::new(fact_rows(&details)));

    match &details.factbook {
        Some(facts) => match &facts.religion {
            Some(religion) => info!("Major religions: {}", religion),
            None => warning!("Major religions: {}", NOT_AVAILABLE_TEXT),
        },
        None => warning!("Factbook data is {} for this country.", NOT_AVAILABLE_TEXT),
    }

    match &details.flights_url {
        Some(url) if flights => {
            if let Err(e) = webbrowser::open(url) {
                warning!("Cannot open browser. Err: {}", e);
                info!("Flights: {}", url);
            }
        }
        Some(url) => info!("Flights: {}", url),
        None if flights => warning!("No capital known, cannot search flights."),
        None => {}
    }
}

fn fact_rows(details: &CountryDetails) -> Vec<FactTableRow> {
    let metadata = &details.metadata;
    let mut rows = vec![
        row("Capital", metadata.capital.clone()),
        row("Official language", metadata.official_language.clone()),
        row("Currency", metadata.currency.clone()),
        row(
            "Population",
            if metadata.population > 0 {
                utils::format_population(metadata.population)
            } else {
                NOT_AVAILABLE.to_string()
            },
        ),
        row(
            "Temperature",
            details
                .weather
                .as_ref()
                .map(|w| format!("{}°C", w.temperature))
                .unwrap_or_else(|| NOT_AVAILABLE_TEXT.to_string()),
        ),
        row(
            "Local time",
            details
                .local_time
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE_TEXT.to_string()),
        ),
        row(
            "1 GBP",
            details
                .exchange_rate
                .as_ref()
                .map(|rate| format!("{} {}", rate, metadata.currency))
                .unwrap_or_else(|| NOT_AVAILABLE_TEXT.to_string()),
        ),
    ];

    match &details.indicators {
        Some(indicators) => {
            let listed = [
                ("GDP", &indicators.gdp),
                ("Life expectancy", &indicators.life_expectancy),
                ("GNI per capita", &indicators.gni_per_capita),
                ("GDP growth", &indicators.gdp_growth),
                ("Internet users", &indicators.internet_users),
                ("Urban population", &indicators.urban_population),
                ("Unemployment", &indicators.unemployment),
                ("GNI per capita (PPP)", &indicators.hdi_proxy),
            ];
            for (fact, indicator) in listed {
                rows.push(row(fact, indicator_text(indicator.as_ref())));
            }
        }
        None => rows.push(row("Economic indicators", NOT_AVAILABLE_TEXT.to_string())),
    }

    rows
}

fn indicator_text(indicator: Option<&Indicator>) -> String {
    match indicator {
        Some(i) if i.year.is_empty() => i.value.clone(),
        Some(i) => format!("{} ({})", i.value, i.year),
        None => NOT_AVAILABLE_TEXT.to_string(),
    }
}

fn row(fact: &str, value: String) -> FactTableRow {
    FactTableRow {
        fact: fact.to_string(),
        value,
    }
}
