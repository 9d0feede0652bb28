use image::{DynamicImage, GenericImageView};
use std::fs;
use std::path::Path;

use crate::error::{OcrError, OcrResult};

pub(super) fn ensure_exists(path: &Path) -> OcrResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(OcrError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

pub(super) fn load_image(path: &Path) -> OcrResult<DynamicImage> {
    let bytes = fs::read(path)
        .map_err(|err| OcrError::decode(path, format!("failed to read file: {}", err)))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read image file");
    decode_image(path, &bytes)
}

pub(super) fn decode_image(path: &Path, bytes: &[u8]) -> OcrResult<DynamicImage> {
    if bytes.is_empty() {
        return Err(OcrError::decode(path, "file is empty"));
    }
    if let Some(mime) = sniff_non_image(bytes) {
        return Err(OcrError::decode(path, format!("unsupported file type '{}'", mime)));
    }

    let image =
        image::load_from_memory(bytes).map_err(|err| OcrError::decode(path, err.to_string()))?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(OcrError::decode(path, "image has no pixels"));
    }
    tracing::debug!(width, height, color = ?image.color(), "decoded image");
    Ok(image)
}

/// Returns the sniffed MIME type when the bytes are recognisably something
/// other than an image. Unknown content is left for the decoder to judge.
fn sniff_non_image(bytes: &[u8]) -> Option<&'static str> {
    let kind = infer::get(bytes)?;
    let detected = kind.mime_type();
    if detected.starts_with("image/") {
        None
    } else {
        Some(detected)
    }
}
