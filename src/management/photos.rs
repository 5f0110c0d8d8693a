use std::collections::HashMap;

use crate::{
    backend::{Backend, BackendError},
    management::{
        aggregate::AggregateStore,
        cache::{CacheKey, Lookup, QueryCache},
        filter::{Filter, FilterState, Selection},
        mutation::{MutationError, MutationKind, MutationState, Notice, NoticeLevel, ValidationError},
        upload::{JpegTranscoder, SkippedFile, Transcoder, prepare_upload},
    },
    types::{Album, CreateAlbumRequest, Image, ImageFilter, UploadFile},
    utils,
};

/// Outcome of a successful upload, handed to upload listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub country_id: String,
    pub year: i32,
    pub image_urls: Vec<String>,
    pub image_ids: Vec<i64>,
    pub uploaded: usize,
    pub skipped: Vec<SkippedFile>,
}

pub type UploadListener = Box<dyn FnMut(&UploadReport) + Send>;

/// Photo and album management for one country.
///
/// Owns the view state (filter and selection), the query cache and the
/// aggregate store, and runs every mutation through the same sequence:
/// validate, call the backend, then on success invalidate all three cache
/// partitions and refresh what depends on them. Outcomes are queued as
/// [`Notice`]s for the view to show.
pub struct PhotoManager<B: Backend> {
    backend: B,
    country_id: String,
    is_premium: bool,
    cache: QueryCache,
    filter: FilterState,
    selection: Selection,
    aggregate: AggregateStore,
    states: HashMap<MutationKind, MutationState>,
    notices: Vec<Notice>,
    transcoder: Box<dyn Transcoder>,
    upload_listeners: Vec<UploadListener>,
}

impl<B: Backend> PhotoManager<B> {
    pub fn new(backend: B, country_id: &str, is_premium: bool) -> Self {
        Self {
            backend,
            country_id: country_id.trim().to_lowercase(),
            is_premium,
            cache: QueryCache::new(),
            filter: FilterState::new(),
            selection: Selection::new(),
            aggregate: AggregateStore::new(),
            states: HashMap::new(),
            notices: Vec::new(),
            transcoder: Box::new(JpegTranscoder::default()),
            upload_listeners: Vec::new(),
        }
    }

    pub fn with_transcoder(mut self, transcoder: Box<dyn Transcoder>) -> Self {
        self.transcoder = transcoder;
        self
    }

    /// Registers a callback run after every successful upload.
    pub fn on_upload(&mut self, listener: UploadListener) {
        self.upload_listeners.push(listener);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn country_id(&self) -> &str {
        &self.country_id
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium
    }

    pub fn set_premium(&mut self, is_premium: bool) {
        self.is_premium = is_premium;
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn aggregate(&self) -> &AggregateStore {
        &self.aggregate
    }

    pub fn filter(&self) -> Filter {
        self.filter.current()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn mutation_state(&self, kind: MutationKind) -> MutationState {
        self.states.get(&kind).cloned().unwrap_or_default()
    }

    /// Drains the queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn toggle_year(&mut self, year: i32) -> Filter {
        self.filter.toggle_year(year)
    }

    pub fn toggle_album(&mut self, album_id: i64) -> Filter {
        self.filter.toggle_album(album_id)
    }

    pub fn toggle_show_all(&mut self) -> Filter {
        self.filter.toggle_show_all()
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    pub async fn years(&mut self) -> Lookup<Vec<i32>> {
        let key = CacheKey::years(&self.country_id);
        let backend = &self.backend;
        let country_id = &self.country_id;
        self.cache
            .fetch(key, || backend.country_years(country_id))
            .await
    }

    pub async fn albums(&mut self) -> Lookup<Vec<Album>> {
        let key = CacheKey::albums(&self.country_id);
        let backend = &self.backend;
        let country_id = &self.country_id;
        self.cache
            .fetch(key, || backend.country_albums(country_id))
            .await
    }

    /// Albums that hold at least one image, the only ones worth listing.
    pub async fn albums_with_images(&mut self) -> Lookup<Vec<Album>> {
        let mut lookup = self.albums().await;
        if let Some(albums) = lookup.data.as_mut() {
            albums.retain(|a| a.number_of_images > 0);
        }
        lookup
    }

    /// Images for the active filter; `None` without a filter, and then
    /// nothing is fetched.
    pub async fn images(&mut self) -> Option<Lookup<Vec<Image>>> {
        let filter = self.filter.current().image_filter()?;
        Some(self.images_for(filter).await)
    }

    pub async fn images_for(&mut self, filter: ImageFilter) -> Lookup<Vec<Image>> {
        let key = CacheKey::images(&self.country_id, filter);
        let backend = &self.backend;
        let country_id = &self.country_id;
        self.cache
            .fetch(key, || backend.images(country_id, filter))
            .await
    }

    /// Refreshes the aggregate store without any mutation.
    pub async fn refresh_aggregate(&mut self) {
        self.aggregate.refresh(&self.backend).await;
    }

    /// Deletes every selected image.
    pub async fn delete_selected(&mut self) -> Result<usize, MutationError> {
        let kind = MutationKind::DeleteImages;
        if self.selection.is_empty() {
            return Err(self.reject(kind, ValidationError::NoImagesSelected));
        }

        let ids = self.selection.ids();
        self.begin(kind);
        let result = self.backend.delete_images(&ids).await;
        self.finish(kind, result)?;

        self.selection.clear();
        self.after_success(true).await;
        self.succeed(
            "Images Deleted",
            format!("{} image(s) deleted successfully.", ids.len()),
        );
        Ok(ids.len())
    }

    pub async fn delete_year(&mut self, year: i32) -> Result<(), MutationError> {
        let kind = MutationKind::DeleteYear;
        self.begin(kind);
        let result = self
            .backend
            .delete_images_by_year(&self.country_id, year)
            .await;
        self.finish(kind, result)?;

        if self.filter.current().selected_year() == Some(year) {
            self.filter.clear();
        }
        self.after_success(true).await;
        self.succeed(
            "Images Deleted",
            format!("All images from year {} were deleted successfully.", year),
        );
        Ok(())
    }

    /// Deletes every image of the country. Any active filter is cleared since
    /// nothing is left to show under it.
    pub async fn delete_all(&mut self) -> Result<(), MutationError> {
        let kind = MutationKind::DeleteAll;
        self.begin(kind);
        let result = self.backend.delete_all_images(&self.country_id).await;
        self.finish(kind, result)?;

        self.filter.clear();
        self.after_success(true).await;
        self.succeed("All Images Deleted", "All images were deleted successfully.");
        Ok(())
    }

    /// Creates an album from the selection.
    ///
    /// Checks premium, then the name, then the selection; the first failing
    /// check is reported and no request is made.
    pub async fn create_album(&mut self, album_name: &str) -> Result<(), MutationError> {
        let kind = MutationKind::CreateAlbum;
        if !self.is_premium {
            return Err(self.reject(kind, ValidationError::PremiumRequired));
        }
        if album_name.trim().is_empty() {
            return Err(self.reject(kind, ValidationError::BlankAlbumName));
        }
        if self.selection.is_empty() {
            return Err(self.reject(kind, ValidationError::NoImagesSelected));
        }

        let request = CreateAlbumRequest {
            country_id: self.country_id.clone(),
            album_name: album_name.trim().to_string(),
            image_ids: self.selection.ids(),
        };

        self.begin(kind);
        let result = self.backend.create_album(&request).await;
        self.finish(kind, result)?;

        self.selection.clear();
        self.after_success(false).await;
        self.succeed("Album Created", "The album was successfully created.");
        Ok(())
    }

    /// Deletes an album and, on the backend, its images.
    pub async fn delete_album(&mut self, album_id: i64) -> Result<(), MutationError> {
        let kind = MutationKind::DeleteAlbum;
        self.begin(kind);
        let result = self.backend.delete_album(album_id).await;
        self.finish(kind, result)?;

        if self.filter.current().selected_album() == Some(album_id) {
            self.filter.clear();
        }
        self.after_success(true).await;
        self.succeed("Album Deleted", "The album was deleted successfully.");
        Ok(())
    }

    /// Uploads `files` for `year`.
    ///
    /// HEIC files are transcoded first. Files that cannot be prepared are
    /// skipped with a warning notice and the rest are still uploaded.
    pub async fn upload(
        &mut self,
        files: Vec<UploadFile>,
        year: i32,
    ) -> Result<UploadReport, MutationError> {
        let kind = MutationKind::Upload;
        if files.is_empty() {
            return Err(self.reject(kind, ValidationError::NoFilesSelected));
        }
        if !utils::is_valid_upload_year(year) {
            return Err(self.reject(kind, ValidationError::InvalidYear(year)));
        }

        let prepared = prepare_upload(files, self.transcoder.as_ref());
        for skipped in &prepared.skipped {
            self.notices.push(Notice::new(
                NoticeLevel::Warning,
                format!("Skipped {}", skipped.name),
                skipped.reason.clone(),
            ));
        }
        if prepared.files.is_empty() {
            return Err(self.reject(kind, ValidationError::NoUploadableFiles));
        }

        let uploaded = prepared.files.len();
        self.begin(kind);
        let result = self
            .backend
            .upload_images(&self.country_id, year, prepared.files)
            .await;
        let response = self.finish(kind, result)?;

        self.after_success(true).await;
        self.succeed(
            "Upload Complete",
            format!("{} image(s) uploaded successfully!", uploaded),
        );

        let report = UploadReport {
            country_id: self.country_id.clone(),
            year,
            image_ids: response.images.iter().map(|i| i.id).collect(),
            image_urls: response.image_urls,
            uploaded,
            skipped: prepared.skipped,
        };
        for listener in self.upload_listeners.iter_mut() {
            listener(&report);
        }
        Ok(report)
    }

    fn begin(&mut self, kind: MutationKind) {
        self.states.insert(kind, MutationState::InFlight);
    }

    fn finish<T>(
        &mut self,
        kind: MutationKind,
        result: Result<T, BackendError>,
    ) -> Result<T, MutationError> {
        match result {
            Ok(value) => {
                self.states.insert(kind, MutationState::Succeeded);
                Ok(value)
            }
            Err(e) => {
                let err = MutationError::Backend(e);
                self.states
                    .insert(kind, MutationState::Failed(err.to_string()));
                self.notices.push(kind.failure_notice(&err));
                Err(err)
            }
        }
    }

    fn reject(&mut self, kind: MutationKind, err: ValidationError) -> MutationError {
        let err = MutationError::Validation(err);
        self.notices.push(kind.failure_notice(&err));
        err
    }

    fn succeed(&mut self, title: &str, description: impl Into<String>) {
        self.notices
            .push(Notice::new(NoticeLevel::Success, title, description));
    }

    // every mutation invalidates all three partitions, whichever one changed
    async fn after_success(&mut self, refresh_aggregate: bool) {
        self.cache.invalidate_all();
        if refresh_aggregate {
            self.aggregate.refresh(&self.backend).await;
        }
    }
}
