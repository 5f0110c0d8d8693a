use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub fullname: String,
    pub email: String,
    pub is_premium: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "premium_flag")]
    pub premium: bool,
}

impl From<LoginResponse> for Session {
    fn from(res: LoginResponse) -> Self {
        Session {
            token: res.token,
            fullname: res.fullname,
            email: res.email,
            is_premium: res.premium,
        }
    }
}

// the backend sends the premium flag either as a boolean or as "true"/"false"
fn premium_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Text(s)) => s.trim().eq_ignore_ascii_case("true"),
        None => false,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub fullname: String,
    pub email: String,
    pub password: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorMessage {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCounts {
    #[serde(default)]
    pub photo_count: u64,
    #[serde(default)]
    pub country_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryAggregate {
    pub photo_count: u64,
    pub country_count: u64,
    pub countries_with_photos: Vec<CountryRef>,
    pub available_years: Vec<i32>,
}

/// Criterion an image listing is fetched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFilter {
    Year(i32),
    Album(i64),
    All,
}

/// Image as returned by the backend, before its file path is resolved.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: i64,
    pub file_path: String,
    pub year: i32,
    #[serde(default)]
    pub country_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: i64,
    pub url: String,
    pub year: i32,
    pub country_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: i64,
    pub album_name: String,
    #[serde(default)]
    pub country_id: String,
    #[serde(default)]
    pub number_of_images: u32,
    #[serde(default)]
    pub images: Vec<AlbumImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumImageRef {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    pub country_id: String,
    pub album_name: String,
    pub image_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageDto>,
}

/// A file ready to be sent to the backend as one part of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Tabled)]
pub struct ImageTableRow {
    pub id: i64,
    pub year: i32,
    pub country: String,
    pub url: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub id: i64,
    pub name: String,
    pub images: u32,
}

#[derive(Tabled)]
pub struct CountryTableRow {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryMetadata {
    pub official_language: String,
    pub currency: String,
    pub capital: String,
    pub population: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    pub temperature: f64,
    /// Shift from UTC in seconds.
    pub timezone: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub value: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldBankIndicators {
    pub gdp: Option<Indicator>,
    pub gdp_raw: Option<f64>,
    pub life_expectancy: Option<Indicator>,
    pub gni_per_capita: Option<Indicator>,
    pub gdp_growth: Option<Indicator>,
    pub internet_users: Option<Indicator>,
    pub urban_population: Option<Indicator>,
    pub unemployment: Option<Indicator>,
    pub hdi_proxy: Option<Indicator>,
}

impl WorldBankIndicators {
    pub fn is_empty(&self) -> bool {
        self.gdp.is_none()
            && self.life_expectancy.is_none()
            && self.gni_per_capita.is_none()
            && self.gdp_growth.is_none()
            && self.internet_users.is_none()
            && self.urban_population.is_none()
            && self.unemployment.is_none()
            && self.hdi_proxy.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactbookFacts {
    pub religion: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryDetails {
    pub country_id: String,
    pub name: String,
    pub metadata: CountryMetadata,
    pub weather: Option<Weather>,
    pub local_time: Option<String>,
    pub exchange_rate: Option<String>,
    pub indicators: Option<WorldBankIndicators>,
    pub factbook: Option<FactbookFacts>,
    pub flights_url: Option<String>,
}

#[derive(Tabled)]
pub struct FactTableRow {
    pub fact: String,
    pub value: String,
}
