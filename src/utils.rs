use std::collections::BTreeMap;

use chrono::{Datelike, FixedOffset, Utc};
use url::form_urlencoded;

use crate::types::{Image, ImageTableRow};

pub const FIRST_UPLOAD_YEAR: i32 = 1900;

const FLIGHTS_URL: &str = "https://www.google.com/travel/flights";

/// Turns a backend `filePath` into a URL a browser can open.
///
/// S3 paths and other absolute URLs are used verbatim; anything else is
/// relative to the backend.
pub fn resolve_image_url(base_url: &str, file_path: &str) -> String {
    if file_path.contains("s3.")
        || file_path.starts_with("http://")
        || file_path.starts_with("https://")
    {
        return file_path.to_string();
    }

    if file_path.starts_with('/') {
        format!("{}{}", base_url, file_path)
    } else {
        format!("{}/{}", base_url, file_path)
    }
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

pub fn is_valid_upload_year(year: i32) -> bool {
    (FIRST_UPLOAD_YEAR..=current_year()).contains(&year)
}

/// Parses a comma or whitespace separated list of image ids.
pub fn parse_ids(input: &str) -> Result<Vec<i64>, String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| format!("'{}' is not a valid image id", s))
        })
        .collect()
}

/// Formats an amount of US dollars the way the economic indicators show it.
pub fn format_usd(value: f64) -> String {
    if value >= 1_000_000_000_000.0 {
        return format!("${:.2} Trillion", value / 1_000_000_000_000.0);
    }
    if value >= 1_000_000_000.0 {
        return format!("${:.2} Billion", value / 1_000_000_000.0);
    }
    if value >= 1_000_000.0 {
        return format!("${:.2} Million", value / 1_000_000.0);
    }
    format!("${}", format_thousands(value))
}

/// Groups the integer part with commas and keeps up to three decimals.
pub fn format_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let int_part = rounded.trunc() as u64;
    let frac = rounded - rounded.trunc();

    let digits = int_part.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = if negative { format!("-{}", grouped) } else { grouped };
    if frac > 0.0 {
        let decimals = format!("{:.3}", frac);
        let decimals = decimals.trim_start_matches('0').trim_end_matches('0');
        if decimals.len() > 1 {
            out.push_str(decimals);
        }
    }
    out
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_years(value: f64) -> String {
    format!("{:.1} years", value)
}

pub fn format_population(population: u64) -> String {
    format_thousands(population as f64)
}

/// Current wall-clock time at a UTC offset given in seconds.
pub fn local_time(offset_seconds: i32) -> Option<String> {
    let offset = FixedOffset::east_opt(offset_seconds)?;
    Some(Utc::now().with_timezone(&offset).format("%H:%M:%S").to_string())
}

/// Google Flights search from London to a capital, with the query form-encoded.
pub fn flights_url(capital: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", &format!("Flights from London to {}", capital.trim()))
        .finish();
    format!("{}?{}", FLIGHTS_URL, query)
}

/// Storage included in the user's plan.
pub fn storage_quota(is_premium: bool) -> &'static str {
    if is_premium { "100GB" } else { "5GB" }
}

/// Groups images by year, newest year first.
pub fn group_by_year(images: Vec<Image>) -> Vec<(i32, Vec<Image>)> {
    let mut groups: BTreeMap<i32, Vec<Image>> = BTreeMap::new();
    for image in images {
        groups.entry(image.year).or_default().push(image);
    }
    groups.into_iter().rev().collect()
}

pub fn image_rows(images: &[Image]) -> Vec<ImageTableRow> {
    images
        .iter()
        .map(|i| ImageTableRow {
            id: i.id,
            year: i.year,
            country: i.country_id.to_uppercase(),
            url: i.url.clone(),
        })
        .collect()
}
