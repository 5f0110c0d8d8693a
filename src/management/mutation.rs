use std::fmt;

use crate::backend::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Upload,
    DeleteImages,
    DeleteYear,
    DeleteAll,
    CreateAlbum,
    DeleteAlbum,
}

/// Lifecycle of one mutation kind. `Succeeded` and `Failed` are terminal
/// until the next attempt; nothing is retried automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MutationState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed(String),
}

/// Reasons an action is refused before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NoImagesSelected,
    BlankAlbumName,
    PremiumRequired,
    NoFilesSelected,
    NoUploadableFiles,
    InvalidYear(i32),
    PasswordTooShort,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoImagesSelected => {
                write!(f, "Please select at least one image.")
            }
            ValidationError::BlankAlbumName => write!(f, "Please enter a name for the album."),
            ValidationError::PremiumRequired => {
                write!(f, "Album creation is available only for premium users.")
            }
            ValidationError::NoFilesSelected => write!(f, "No file selected."),
            ValidationError::NoUploadableFiles => {
                write!(f, "None of the selected files can be uploaded.")
            }
            ValidationError::InvalidYear(year) => write!(
                f,
                "{} is not a valid year, pick one between 1900 and this year.",
                year
            ),
            ValidationError::PasswordTooShort => {
                write!(f, "Password must be at least 6 characters long.")
            }
        }
    }
}

impl ValidationError {
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::NoImagesSelected => "No images selected",
            ValidationError::BlankAlbumName => "Album Name Required",
            ValidationError::PremiumRequired => "Premium Feature",
            ValidationError::NoFilesSelected | ValidationError::NoUploadableFiles => {
                "Nothing to upload"
            }
            ValidationError::InvalidYear(_) => "Invalid year",
            ValidationError::PasswordTooShort => "Password too short",
        }
    }
}

#[derive(Debug)]
pub enum MutationError {
    Validation(ValidationError),
    Backend(BackendError),
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationError::Validation(e) => write!(f, "{}", e),
            MutationError::Backend(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MutationError {}

impl From<ValidationError> for MutationError {
    fn from(err: ValidationError) -> Self {
        MutationError::Validation(err)
    }
}

impl From<BackendError> for MutationError {
    fn from(err: BackendError) -> Self {
        MutationError::Backend(err)
    }
}

impl MutationError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, MutationError::Backend(BackendError::Unauthorized))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A transient, user-facing message about the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Prints the notice with the matching output macro.
    pub fn print(&self) {
        match self.level {
            NoticeLevel::Success => crate::success!("{}: {}", self.title, self.description),
            NoticeLevel::Warning | NoticeLevel::Error => {
                crate::warning!("{}: {}", self.title, self.description)
            }
        }
    }
}

impl MutationKind {
    /// Notice for a failed mutation. Validation failures carry their own text.
    pub fn failure_notice(&self, err: &MutationError) -> Notice {
        if let MutationError::Validation(v) = err {
            return Notice::new(NoticeLevel::Warning, v.title(), v.to_string());
        }

        let (title, description) = match self {
            MutationKind::Upload => ("Upload Failed", "Error uploading image(s) to the server."),
            MutationKind::DeleteImages => {
                ("Deletion Failed", "There was an error deleting the images.")
            }
            MutationKind::DeleteYear => (
                "Deletion Failed",
                "There was an error deleting the images of that year.",
            ),
            MutationKind::DeleteAll => (
                "Deletion Failed",
                "There was an error deleting all images of the country.",
            ),
            MutationKind::CreateAlbum => {
                ("Creation Failed", "There was an error creating the album.")
            }
            MutationKind::DeleteAlbum => {
                ("Deletion Failed", "There was an error deleting the album.")
            }
        };

        Notice::new(
            NoticeLevel::Error,
            title,
            format!("{} ({})", description, err),
        )
    }
}
