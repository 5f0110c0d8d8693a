//! ISO 3166-1 alpha-2 country codes and their English names.
//!
//! The backend stores photos under lower-case alpha-2 codes (`br`, `gb`, ...).
//! Names are resolved locally from the ISO table in `isocountry` so that
//! listing the countries a user visited needs no extra request.

use isocountry::CountryCode;

/// Looks up the ISO English name of an alpha-2 country code, case-insensitively.
pub fn country_name(code: &str) -> Option<&'static str> {
    let code = code.trim().to_ascii_uppercase();
    CountryCode::for_alpha2(&code).ok().map(|c| c.name())
}

/// Name to show for a country code, falling back to the code itself.
pub fn display_name(code: &str) -> String {
    country_name(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}
