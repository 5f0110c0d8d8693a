mod aggregate;
mod cache;
mod filter;
mod mutation;
mod photos;
mod session;
mod upload;

pub use aggregate::AggregateStore;
pub use cache::{CacheKey, Cacheable, CachedValue, Lookup, Partition, QueryCache};
pub use filter::{Filter, FilterState, Selection};
pub use mutation::{
    MutationError, MutationKind, MutationState, Notice, NoticeLevel, ValidationError,
};
pub use photos::{PhotoManager, UploadListener, UploadReport};
pub use session::{SessionError, SessionManager};
pub use upload::{
    ACCEPTED_EXTENSIONS, DEFAULT_JPEG_QUALITY, JpegTranscoder, PreparedUpload, SkippedFile,
    TranscodeError, Transcoder, is_accepted, is_heic, is_heif_payload, prepare_upload,
    read_upload_file,
};
