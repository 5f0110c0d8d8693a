use async_trait::async_trait;
use reqwest::{
    Client, Response, StatusCode, Url,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;

use crate::{
    backend::{Backend, BackendError},
    config,
    types::{
        Album, CreateAlbumRequest, Image, ImageDto, ImageFilter, PhotoCounts, Session, UploadFile,
        UploadResponse,
    },
    utils,
};

/// [`Backend`] implementation talking HTTP to the Photomap REST API.
///
/// Holds one `reqwest::Client` so connections are reused across calls and
/// sends the session token as a bearer token on every request.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Builds a backend for the logged-in user against the configured URL.
    pub fn from_session(session: &Session) -> Self {
        Self::new(config::backend_url(), session.token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the backend URL.
    fn url(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let invalid = || BackendError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn to_image(&self, dto: ImageDto, fallback_country: &str) -> Image {
        Image {
            id: dto.id,
            url: utils::resolve_image_url(&self.base_url, &dto.file_path),
            year: dto.year,
            country_id: dto
                .country_id
                .unwrap_or_else(|| fallback_country.to_string()),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, BackendError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn get_images(&self, url: Url, country_id: &str) -> Result<Vec<Image>, BackendError> {
        let dtos: Vec<ImageDto> = self.get_json(url).await?;
        Ok(dtos
            .into_iter()
            .map(|dto| self.to_image(dto, country_id))
            .collect())
    }

    async fn delete(&self, segments: &[&str]) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.url(segments)?)
            .bearer_auth(&self.token)
            .send()
            .await?;

        check_status(response).await.map(|_| ())
    }
}

/// Passes 2xx responses through and turns everything else into an error.
pub(crate) async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(BackendError::Unauthorized);
    }

    let message = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        message: message.trim().to_string(),
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn photo_counts(&self) -> Result<PhotoCounts, BackendError> {
        self.get_json(self.url(&["api", "images", "count"])?)
            .await
    }

    async fn countries_with_photos(&self) -> Result<Vec<String>, BackendError> {
        self.get_json(self.url(&["api", "images", "countries-with-photos"])?)
            .await
    }

    async fn available_years(&self) -> Result<Vec<i32>, BackendError> {
        // the endpoint answers `null` for a user without photos
        let years: Option<Vec<i32>> = self
            .get_json(self.url(&["api", "images", "available-years"])?)
            .await?;
        Ok(years.unwrap_or_default())
    }

    async fn country_years(&self, country_id: &str) -> Result<Vec<i32>, BackendError> {
        self.get_json(self.url(&["api", "images", country_id, "available-years"])?)
            .await
    }

    async fn country_albums(&self, country_id: &str) -> Result<Vec<Album>, BackendError> {
        self.get_json(self.url(&["api", "albums", country_id])?)
            .await
    }

    async fn images(
        &self,
        country_id: &str,
        filter: ImageFilter,
    ) -> Result<Vec<Image>, BackendError> {
        let url = match filter {
            ImageFilter::Album(album_id) => {
                self.url(&["api", "albums", &album_id.to_string(), "images"])?
            }
            ImageFilter::Year(year) => {
                self.url(&["api", "images", country_id, &year.to_string()])?
            }
            ImageFilter::All => self.url(&["api", "images", country_id])?,
        };

        self.get_images(url, country_id).await
    }

    async fn all_pictures(&self, year: Option<i32>) -> Result<Vec<Image>, BackendError> {
        let mut url = self.url(&["api", "images", "allPictures"])?;
        if let Some(year) = year {
            url.query_pairs_mut().append_pair("year", &year.to_string());
        }

        self.get_images(url, "").await
    }

    async fn upload_images(
        &self,
        country_id: &str,
        year: i32,
        files: Vec<UploadFile>,
    ) -> Result<UploadResponse, BackendError> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes)
                .file_name(file.name)
                .mime_str(&file.content_type)?;
            form = form.part("images", part);
        }
        let form = form
            .text("countryId", country_id.to_string())
            .text("year", year.to_string());

        let response = self
            .client
            .post(self.url(&["api", "images", "upload"])?)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json::<UploadResponse>().await?)
    }

    async fn delete_images(&self, ids: &[i64]) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.url(&["api", "images", "delete-multiple"])?)
            .bearer_auth(&self.token)
            .json(ids)
            .send()
            .await?;

        check_status(response).await.map(|_| ())
    }

    async fn delete_images_by_year(
        &self,
        country_id: &str,
        year: i32,
    ) -> Result<(), BackendError> {
        self.delete(&["api", "images", country_id, &year.to_string()])
            .await
    }

    async fn delete_all_images(&self, country_id: &str) -> Result<(), BackendError> {
        self.delete(&["api", "images", "delete-all-images", country_id])
            .await
    }

    async fn create_album(&self, request: &CreateAlbumRequest) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url(&["api", "albums"])?)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        check_status(response).await.map(|_| ())
    }

    async fn delete_album(&self, album_id: i64) -> Result<(), BackendError> {
        self.delete(&["api", "albums", &album_id.to_string()])
            .await
    }

    async fn make_premium(&self) -> Result<(), BackendError> {
        let response = self
            .client
            .put(self.url(&["api", "auth", "users", "make-premium"])?)
            .bearer_auth(&self.token)
            .send()
            .await?;

        check_status(response).await.map(|_| ())
    }
}
