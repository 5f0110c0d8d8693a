//! # Photomap Backend Module
//!
//! This module is the integration layer between the client and the Photomap
//! backend REST API. It handles HTTP communication, bearer authentication,
//! response decoding and the mapping of HTTP failures onto a small error type.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer
//!     ↓
//! Management Layer (PhotoManager, AggregateStore, SessionManager)
//!     ↓
//! Backend trait  ←  HttpBackend (reqwest)
//!     ↓
//! Photomap REST API
//! ```
//!
//! The management layer only sees the [`Backend`] trait. [`HttpBackend`] is the
//! production implementation; tests substitute an in-memory one.
//!
//! ## Endpoints
//!
//! ### Authentication (no token)
//! - `POST /api/auth/login` - exchange email and password for a token
//! - `POST /api/auth/register` - create an account
//!
//! ### Account
//! - `PUT /api/auth/users/make-premium` - upgrade to premium
//!
//! ### Aggregates
//! - `GET /api/images/count` - photo and country totals
//! - `GET /api/images/countries-with-photos` - ids of visited countries
//! - `GET /api/images/available-years` - years with at least one photo
//!
//! ### Per country
//! - `GET /api/images/{country}/available-years`
//! - `GET /api/images/{country}` and `GET /api/images/{country}/{year}`
//! - `GET /api/albums/{country}` and `GET /api/albums/{album}/images`
//! - `DELETE /api/images/{country}/{year}`
//! - `DELETE /api/images/delete-all-images/{country}`
//!
//! ### Images and albums
//! - `GET /api/images/allPictures` - every picture, optionally by year
//! - `POST /api/images/upload` - multipart upload
//! - `DELETE /api/images/delete-multiple` - delete a set of ids
//! - `POST /api/albums` and `DELETE /api/albums/{album}`
//!
//! ## Error Handling
//!
//! Every call returns [`BackendError`]. HTTP 401 and 403 become
//! [`BackendError::Unauthorized`] so the CLI can send the user back to
//! `photomap login`; other non-2xx responses keep their status and body text.
//! Nothing is retried.

pub mod auth;
mod http;

use std::fmt;

use async_trait::async_trait;

use crate::types::{
    Album, CreateAlbumRequest, Image, ImageFilter, PhotoCounts, UploadFile, UploadResponse,
};

pub use http::HttpBackend;

#[derive(Debug)]
pub enum BackendError {
    Request(reqwest::Error),
    Status { status: u16, message: String },
    Unauthorized,
    /// The configured backend URL cannot take a path.
    InvalidUrl(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Request(e) => write!(f, "request failed: {}", e),
            BackendError::Status { status, message } if message.is_empty() => {
                write!(f, "backend responded with status {}", status)
            }
            BackendError::Status { status, message } => {
                write!(f, "backend responded with status {}: {}", status, message)
            }
            BackendError::Unauthorized => {
                write!(f, "session is missing or expired, please log in again")
            }
            BackendError::InvalidUrl(base) => write!(f, "'{}' is not a valid backend URL", base),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::Request(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Request(err)
    }
}

/// Authenticated operations of the Photomap backend.
///
/// Each method is a single request. Callers decide what happens around it:
/// caching, invalidation and user feedback live in [`crate::management`].
#[async_trait]
pub trait Backend: Send + Sync {
    async fn photo_counts(&self) -> Result<PhotoCounts, BackendError>;

    /// Lower-case alpha-2 ids of every country holding at least one photo.
    async fn countries_with_photos(&self) -> Result<Vec<String>, BackendError>;

    /// Years with at least one photo, across all countries.
    async fn available_years(&self) -> Result<Vec<i32>, BackendError>;

    async fn country_years(&self, country_id: &str) -> Result<Vec<i32>, BackendError>;

    async fn country_albums(&self, country_id: &str) -> Result<Vec<Album>, BackendError>;

    async fn images(
        &self,
        country_id: &str,
        filter: ImageFilter,
    ) -> Result<Vec<Image>, BackendError>;

    /// Every picture of the user, optionally restricted to one year.
    async fn all_pictures(&self, year: Option<i32>) -> Result<Vec<Image>, BackendError>;

    async fn upload_images(
        &self,
        country_id: &str,
        year: i32,
        files: Vec<UploadFile>,
    ) -> Result<UploadResponse, BackendError>;

    async fn delete_images(&self, ids: &[i64]) -> Result<(), BackendError>;

    async fn delete_images_by_year(&self, country_id: &str, year: i32)
    -> Result<(), BackendError>;

    async fn delete_all_images(&self, country_id: &str) -> Result<(), BackendError>;

    async fn create_album(&self, request: &CreateAlbumRequest) -> Result<(), BackendError>;

    /// Deletes the album together with its images.
    async fn delete_album(&self, album_id: i64) -> Result<(), BackendError>;

    async fn make_premium(&self) -> Result<(), BackendError>;
}
