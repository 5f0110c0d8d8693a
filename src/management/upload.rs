use std::{fmt, path::Path};

use image::{DynamicImage, RgbImage, codecs::jpeg::JpegEncoder};

use crate::types::UploadFile;

pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "heic", "heif"];
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

// ISO-BMFF major brands of HEVC coded HEIF files
const HEIF_BRANDS: &[&[u8; 4]] = &[
    b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"mif1", b"msf1",
];

#[derive(Debug)]
pub enum TranscodeError {
    Decode(image::ImageError),
    Encode(image::ImageError),
    /// libheif rejected the file.
    Heif(String),
    /// The crate was built without the `heic` feature.
    HeifUnsupported,
}

impl fmt::Display for TranscodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscodeError::Decode(e) => write!(f, "cannot decode image: {}", e),
            TranscodeError::Encode(e) => write!(f, "cannot encode JPEG: {}", e),
            TranscodeError::Heif(e) => write!(f, "cannot decode HEIF: {}", e),
            TranscodeError::HeifUnsupported => {
                write!(f, "this build has no HEIC decoder, rebuild with --features heic")
            }
        }
    }
}

impl std::error::Error for TranscodeError {}

/// Converts files the backend cannot take into a format it can.
pub trait Transcoder: Send + Sync {
    fn needs_transcoding(&self, file: &UploadFile) -> bool {
        is_heic(file)
    }

    fn transcode(&self, file: &UploadFile) -> Result<UploadFile, TranscodeError>;
}

/// Re-encodes HEIC/HEIF files as JPEG.
///
/// HEIF payloads are decoded with libheif when the `heic` feature is on;
/// anything else, such as a PNG saved with a `.heic` name, goes through the
/// `image` crate decoders. Files neither can read fail and are skipped by
/// [`prepare_upload`].
#[derive(Debug, Clone, Copy)]
pub struct JpegTranscoder {
    pub quality: u8,
}

impl Default for JpegTranscoder {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Transcoder for JpegTranscoder {
    fn transcode(&self, file: &UploadFile) -> Result<UploadFile, TranscodeError> {
        let rgb = DynamicImage::ImageRgb8(decode_rgb(&file.bytes)?);

        let mut bytes = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut bytes, self.quality);
        rgb.write_with_encoder(encoder)
            .map_err(TranscodeError::Encode)?;

        Ok(UploadFile {
            name: jpeg_file_name(&file.name),
            content_type: "image/jpeg".to_string(),
            bytes,
        })
    }
}

/// Whether `bytes` start like an HEVC coded HEIF file.
pub fn is_heif_payload(bytes: &[u8]) -> bool {
    bytes.len() >= 12
        && &bytes[4..8] == b"ftyp"
        && HEIF_BRANDS.iter().any(|brand| &bytes[8..12] == *brand)
}

#[cfg(feature = "heic")]
fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, TranscodeError> {
    if is_heif_payload(bytes) {
        return decode_heif(bytes);
    }
    decode_other(bytes)
}

#[cfg(not(feature = "heic"))]
fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, TranscodeError> {
    if is_heif_payload(bytes) {
        return Err(TranscodeError::HeifUnsupported);
    }
    decode_other(bytes)
}

fn decode_other(bytes: &[u8]) -> Result<RgbImage, TranscodeError> {
    image::load_from_memory(bytes)
        .map(|decoded| decoded.to_rgb8())
        .map_err(TranscodeError::Decode)
}

#[cfg(feature = "heic")]
fn decode_heif(bytes: &[u8]) -> Result<RgbImage, TranscodeError> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let heif_err = |e: libheif_rs::HeifError| TranscodeError::Heif(e.to_string());
    let lib = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(bytes).map_err(heif_err)?;
    let handle = ctx.primary_image_handle().map_err(heif_err)?;
    let image = lib
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(heif_err)?;

    let planes = image.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| TranscodeError::Heif("no interleaved RGB plane".to_string()))?;

    // rows are padded to `stride` bytes
    let row = plane.width as usize * 3;
    let mut pixels = Vec::with_capacity(row * plane.height as usize);
    for line in plane.data.chunks(plane.stride).take(plane.height as usize) {
        let line = line
            .get(..row)
            .ok_or_else(|| TranscodeError::Heif("truncated image row".to_string()))?;
        pixels.extend_from_slice(line);
    }

    RgbImage::from_raw(plane.width, plane.height, pixels)
        .ok_or_else(|| TranscodeError::Heif("pixel buffer size mismatch".to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct PreparedUpload {
    pub files: Vec<UploadFile>,
    pub skipped: Vec<SkippedFile>,
}

/// Filters and converts files before an upload.
///
/// Files with an unsupported extension and files that fail to transcode are
/// reported in `skipped`; the rest keep their order.
pub fn prepare_upload(files: Vec<UploadFile>, transcoder: &dyn Transcoder) -> PreparedUpload {
    let mut prepared = PreparedUpload::default();

    for file in files {
        if !is_accepted(&file) {
            prepared.skipped.push(SkippedFile {
                reason: "unsupported file type, use JPG, PNG, WEBP, BMP or HEIC".to_string(),
                name: file.name,
            });
            continue;
        }

        if !transcoder.needs_transcoding(&file) {
            prepared.files.push(file);
            continue;
        }

        match transcoder.transcode(&file) {
            Ok(converted) => prepared.files.push(converted),
            Err(e) => prepared.skipped.push(SkippedFile {
                name: file.name,
                reason: format!("HEIC format not supported ({}), try JPG or PNG", e),
            }),
        }
    }

    prepared
}

pub fn is_heic(file: &UploadFile) -> bool {
    let ct = file.content_type.to_ascii_lowercase();
    ct == "image/heic"
        || ct == "image/heif"
        || matches!(extension(&file.name).as_deref(), Some("heic" | "heif"))
}

pub fn is_accepted(file: &UploadFile) -> bool {
    extension(&file.name).is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
        || is_heic(file)
}

/// Reads a file from disk into an [`UploadFile`], guessing its content type.
pub async fn read_upload_file(path: &Path) -> Result<UploadFile, std::io::Error> {
    let bytes = async_fs::read(path).await?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    let content_type = match extension(&name).as_deref() {
        Some("heic") => "image/heic".to_string(),
        Some("heif") => "image/heif".to_string(),
        _ => mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    };

    Ok(UploadFile {
        name,
        content_type,
        bytes,
    })
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn jpeg_file_name(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if matches!(extension(name).as_deref(), Some("heic" | "heif")) => {
            format!("{}.jpg", &name[..dot])
        }
        _ => format!("{}.jpg", name),
    }
}
