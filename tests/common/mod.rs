#![allow(dead_code)]

use std::{collections::BTreeSet, sync::Mutex};

use async_trait::async_trait;
use photomap::{
    backend::{Backend, BackendError},
    types::{
        Album, AlbumImageRef, CreateAlbumRequest, Image, ImageDto, ImageFilter, PhotoCounts,
        UploadFile, UploadResponse,
    },
};

/// In-memory backend recording every call it receives.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    images: Vec<Image>,
    albums: Vec<Album>,
    next_id: i64,
    calls: Vec<String>,
    failing: Vec<&'static str>,
    unauthorized: bool,
}

// Helper function to create a test image
pub fn image(id: i64, year: i32, country_id: &str) -> Image {
    Image {
        id,
        url: format!("http://localhost:8092/uploads/{}.jpg", id),
        year,
        country_id: country_id.to_string(),
    }
}

pub fn jpeg_file(name: &str) -> UploadFile {
    UploadFile {
        name: name.to_string(),
        content_type: "image/jpeg".to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_images(images: Vec<Image>) -> Self {
        let backend = Self::new();
        {
            let mut state = backend.state.lock().unwrap();
            state.next_id = images.iter().map(|i| i.id).max().unwrap_or(0) + 1;
            state.images = images;
        }
        backend
    }

    pub fn add_album(&self, album_id: i64, country_id: &str, name: &str, image_ids: &[i64]) {
        let mut state = self.state.lock().unwrap();
        state.albums.push(Album {
            id: album_id,
            album_name: name.to_string(),
            country_id: country_id.to_string(),
            number_of_images: image_ids.len() as u32,
            images: image_ids.iter().map(|id| AlbumImageRef { id: *id }).collect(),
        });
    }

    /// Makes every later call of `operation` fail with a 500.
    pub fn fail(&self, operation: &'static str) {
        self.state.lock().unwrap().failing.push(operation);
    }

    pub fn expire_session(&self) {
        self.state.lock().unwrap().unauthorized = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count_calls(&self, operation: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == operation).count()
    }

    pub fn image_ids(&self) -> Vec<i64> {
        self.state.lock().unwrap().images.iter().map(|i| i.id).collect()
    }

    pub fn albums(&self) -> Vec<Album> {
        self.state.lock().unwrap().albums.clone()
    }

    fn record(&self, operation: &'static str) -> Result<std::sync::MutexGuard<'_, FakeState>, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(operation.to_string());

        if state.unauthorized {
            return Err(BackendError::Unauthorized);
        }
        if state.failing.contains(&operation) {
            return Err(BackendError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        Ok(state)
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn photo_counts(&self) -> Result<PhotoCounts, BackendError> {
        let state = self.record("photo_counts")?;
        let countries: BTreeSet<&str> = state.images.iter().map(|i| i.country_id.as_str()).collect();
        Ok(PhotoCounts {
            photo_count: state.images.len() as u64,
            country_count: countries.len() as u64,
        })
    }

    async fn countries_with_photos(&self) -> Result<Vec<String>, BackendError> {
        let state = self.record("countries_with_photos")?;
        let countries: BTreeSet<String> = state.images.iter().map(|i| i.country_id.clone()).collect();
        Ok(countries.into_iter().collect())
    }

    async fn available_years(&self) -> Result<Vec<i32>, BackendError> {
        let state = self.record("available_years")?;
        let years: BTreeSet<i32> = state.images.iter().map(|i| i.year).collect();
        Ok(years.into_iter().rev().collect())
    }

    async fn country_years(&self, country_id: &str) -> Result<Vec<i32>, BackendError> {
        let state = self.record("country_years")?;
        let years: BTreeSet<i32> = state
            .images
            .iter()
            .filter(|i| i.country_id == country_id)
            .map(|i| i.year)
            .collect();
        Ok(years.into_iter().rev().collect())
    }

    async fn country_albums(&self, country_id: &str) -> Result<Vec<Album>, BackendError> {
        let state = self.record("country_albums")?;
        Ok(state
            .albums
            .iter()
            .filter(|a| a.country_id == country_id)
            .cloned()
            .collect())
    }

    async fn images(
        &self,
        country_id: &str,
        filter: ImageFilter,
    ) -> Result<Vec<Image>, BackendError> {
        let state = self.record("images")?;
        let images = match filter {
            ImageFilter::Year(year) => state
                .images
                .iter()
                .filter(|i| i.country_id == country_id && i.year == year)
                .cloned()
                .collect(),
            ImageFilter::All => state
                .images
                .iter()
                .filter(|i| i.country_id == country_id)
                .cloned()
                .collect(),
            ImageFilter::Album(album_id) => {
                let ids: Vec<i64> = state
                    .albums
                    .iter()
                    .filter(|a| a.id == album_id)
                    .flat_map(|a| a.images.iter().map(|r| r.id))
                    .collect();
                state
                    .images
                    .iter()
                    .filter(|i| ids.contains(&i.id))
                    .cloned()
                    .collect()
            }
        };
        Ok(images)
    }

    async fn all_pictures(&self, year: Option<i32>) -> Result<Vec<Image>, BackendError> {
        let state = self.record("all_pictures")?;
        Ok(state
            .images
            .iter()
            .filter(|i| year.is_none_or(|y| i.year == y))
            .cloned()
            .collect())
    }

    async fn upload_images(
        &self,
        country_id: &str,
        year: i32,
        files: Vec<UploadFile>,
    ) -> Result<UploadResponse, BackendError> {
        let mut state = self.record("upload_images")?;
        let mut response = UploadResponse::default();

        for file in files {
            state.next_id += 1;
            let id = state.next_id;
            let file_path = format!("/uploads/{}-{}", id, file.name);

            state.images.push(Image {
                id,
                url: format!("http://localhost:8092{}", file_path),
                year,
                country_id: country_id.to_string(),
            });
            response.image_urls.push(format!("http://localhost:8092{}", file_path));
            response.images.push(ImageDto {
                id,
                file_path,
                year,
                country_id: Some(country_id.to_string()),
            });
        }
        Ok(response)
    }

    async fn delete_images(&self, ids: &[i64]) -> Result<(), BackendError> {
        let mut state = self.record("delete_images")?;
        state.images.retain(|i| !ids.contains(&i.id));
        for album in state.albums.iter_mut() {
            album.images.retain(|r| !ids.contains(&r.id));
            album.number_of_images = album.images.len() as u32;
        }
        Ok(())
    }

    async fn delete_images_by_year(
        &self,
        country_id: &str,
        year: i32,
    ) -> Result<(), BackendError> {
        let mut state = self.record("delete_images_by_year")?;
        state
            .images
            .retain(|i| !(i.country_id == country_id && i.year == year));
        Ok(())
    }

    async fn delete_all_images(&self, country_id: &str) -> Result<(), BackendError> {
        let mut state = self.record("delete_all_images")?;
        state.images.retain(|i| i.country_id != country_id);
        Ok(())
    }

    async fn create_album(&self, request: &CreateAlbumRequest) -> Result<(), BackendError> {
        let mut state = self.record("create_album")?;
        state.next_id += 1;
        let id = state.next_id;
        state.albums.push(Album {
            id,
            album_name: request.album_name.clone(),
            country_id: request.country_id.clone(),
            number_of_images: request.image_ids.len() as u32,
            images: request
                .image_ids
                .iter()
                .map(|id| AlbumImageRef { id: *id })
                .collect(),
        });
        Ok(())
    }

    async fn delete_album(&self, album_id: i64) -> Result<(), BackendError> {
        let mut state = self.record("delete_album")?;
        let ids: Vec<i64> = state
            .albums
            .iter()
            .filter(|a| a.id == album_id)
            .flat_map(|a| a.images.iter().map(|r| r.id))
            .collect();
        state.albums.retain(|a| a.id != album_id);
        state.images.retain(|i| !ids.contains(&i.id));
        Ok(())
    }

    async fn make_premium(&self) -> Result<(), BackendError> {
        self.record("make_premium")?;
        Ok(())
    }
}
