use reqwest::Client;
use serde_json::Value;

use crate::{
    config::ProviderEndpoints,
    enrichment::{EnrichmentError, ensure_success},
    types::FactbookFacts,
};

/// ISO alpha-2 code, Factbook region directory and GEC code.
///
/// The Factbook files are laid out by region and named by GEC code, which
/// differs from the ISO code for many countries. Countries missing here have
/// no Factbook facts.
const FACTBOOK_LOCATIONS: &[(&str, &str, &str)] = &[
    ("ae", "middle-east", "ae"),
    ("ar", "south-america", "ar"),
    ("at", "europe", "au"),
    ("au", "australia-oceania", "as"),
    ("bd", "south-asia", "bg"),
    ("be", "europe", "be"),
    ("bo", "south-america", "bl"),
    ("br", "south-america", "br"),
    ("ca", "north-america", "ca"),
    ("ch", "europe", "sz"),
    ("cl", "south-america", "ci"),
    ("cn", "east-n-southeast-asia", "ch"),
    ("co", "south-america", "co"),
    ("cr", "central-america-n-caribbean", "cs"),
    ("cu", "central-america-n-caribbean", "cu"),
    ("cz", "europe", "ez"),
    ("de", "europe", "gm"),
    ("dk", "europe", "da"),
    ("do", "central-america-n-caribbean", "dr"),
    ("ec", "south-america", "ec"),
    ("eg", "africa", "eg"),
    ("es", "europe", "sp"),
    ("et", "africa", "et"),
    ("fi", "europe", "fi"),
    ("fj", "australia-oceania", "fj"),
    ("fr", "europe", "fr"),
    ("gb", "europe", "uk"),
    ("gh", "africa", "gh"),
    ("gr", "europe", "gr"),
    ("gt", "central-america-n-caribbean", "gt"),
    ("hr", "europe", "hr"),
    ("hu", "europe", "hu"),
    ("id", "east-n-southeast-asia", "id"),
    ("ie", "europe", "ei"),
    ("il", "middle-east", "is"),
    ("in", "south-asia", "in"),
    ("iq", "middle-east", "iz"),
    ("ir", "middle-east", "ir"),
    ("is", "europe", "ic"),
    ("it", "europe", "it"),
    ("jm", "central-america-n-caribbean", "jm"),
    ("jo", "middle-east", "jo"),
    ("jp", "east-n-southeast-asia", "ja"),
    ("ke", "africa", "ke"),
    ("kh", "east-n-southeast-asia", "cb"),
    ("kr", "east-n-southeast-asia", "ks"),
    ("kz", "central-asia", "kz"),
    ("lb", "middle-east", "le"),
    ("lk", "south-asia", "ce"),
    ("ma", "africa", "mo"),
    ("mn", "east-n-southeast-asia", "mg"),
    ("mx", "north-america", "mx"),
    ("my", "east-n-southeast-asia", "my"),
    ("ng", "africa", "ni"),
    ("nl", "europe", "nl"),
    ("no", "europe", "no"),
    ("np", "south-asia", "np"),
    ("nz", "australia-oceania", "nz"),
    ("pa", "central-america-n-caribbean", "pm"),
    ("pe", "south-america", "pe"),
    ("ph", "east-n-southeast-asia", "rp"),
    ("pk", "south-asia", "pk"),
    ("pl", "europe", "pl"),
    ("pt", "europe", "po"),
    ("py", "south-america", "pa"),
    ("qa", "middle-east", "qa"),
    ("ro", "europe", "ro"),
    ("ru", "central-asia", "rs"),
    ("sa", "middle-east", "sa"),
    ("se", "europe", "sw"),
    ("sg", "east-n-southeast-asia", "sn"),
    ("th", "east-n-southeast-asia", "th"),
    ("tn", "africa", "ts"),
    ("tr", "middle-east", "tu"),
    ("tw", "east-n-southeast-asia", "tw"),
    ("tz", "africa", "tz"),
    ("ua", "europe", "up"),
    ("us", "north-america", "us"),
    ("uy", "south-america", "uy"),
    ("uz", "central-asia", "uz"),
    ("ve", "south-america", "ve"),
    ("vn", "east-n-southeast-asia", "vm"),
    ("za", "africa", "sf"),
];

/// Region directory and GEC code of a country, if it is mapped.
pub fn factbook_location(country_id: &str) -> Option<(&'static str, &'static str)> {
    let id = country_id.trim().to_lowercase();
    FACTBOOK_LOCATIONS
        .binary_search_by(|(iso, _, _)| (*iso).cmp(id.as_str()))
        .ok()
        .map(|i| (FACTBOOK_LOCATIONS[i].1, FACTBOOK_LOCATIONS[i].2))
}

/// Fetches the religion breakdown of a country from the Factbook.
pub async fn fetch_factbook(
    client: &Client,
    endpoints: &ProviderEndpoints,
    country_id: &str,
) -> Result<FactbookFacts, EnrichmentError> {
    let (region, gec) = factbook_location(country_id)
        .ok_or_else(|| EnrichmentError::NotMapped(country_id.to_string()))?;

    let url = format!(
        "{base}/{region}/{gec}.json",
        base = endpoints.factbook_url,
        region = region,
        gec = gec
    );
    let response = ensure_success(client.get(&url).send().await?)?;
    let body: Value = response.json().await?;

    Ok(FactbookFacts {
        religion: religion(&body),
    })
}

// "Religions" is either an object with a "text" field or plain text
fn religion(body: &Value) -> Option<String> {
    let religions = body.get("People and Society")?.get("Religions")?;
    match religions {
        Value::Object(obj) => obj.get("text")?.as_str().map(str::to_string),
        Value::String(text) => Some(text.clone()),
        _ => None,
    }
}
