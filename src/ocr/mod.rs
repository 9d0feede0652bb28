mod engine;
pub mod preprocess;
mod source;

use image::GrayImage;
use std::path::{Path, PathBuf};

use crate::error::OcrResult;

pub use engine::{Recognizer, Tesseract};

pub const DEFAULT_LANGUAGE: &str = "eng";

/// Engine settings handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    /// Location of the `tesseract` binary; `None` looks it up on `PATH`.
    pub engine_path: Option<PathBuf>,
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine_path: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Load, grayscale, binarize and recognize, stopping at the first failure.
#[derive(Debug, Clone)]
pub struct Pipeline<R> {
    recognizer: R,
    language: String,
}

impl Pipeline<Tesseract> {
    pub fn tesseract(config: &OcrConfig) -> Self {
        Self::new(Tesseract::new(config), &config.language)
    }
}

impl<R: Recognizer> Pipeline<R> {
    pub fn new(recognizer: R, language: &str) -> Self {
        Self {
            recognizer,
            language: language.to_string(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Runs every step up to, but not including, recognition and returns the
    /// binary image that would be sent to the engine.
    pub fn prepare(&self, path: &Path) -> OcrResult<GrayImage> {
        source::ensure_exists(path)?;
        let decoded = source::load_image(path)?;
        let mut gray = preprocess::to_grayscale(&decoded);
        drop(decoded);
        let threshold = preprocess::binarize_otsu(&mut gray);
        tracing::debug!(threshold, "binarized image");
        Ok(gray)
    }

    /// Returns the engine's text verbatim.
    pub fn recognize(&self, path: &Path) -> OcrResult<String> {
        let binary = self.prepare(path)?;
        let text = self.recognizer.recognize(&binary, &self.language)?;
        tracing::debug!(chars = text.chars().count(), "recognized text");
        Ok(text)
    }
}

/// Runs the Tesseract-backed pipeline on one image file.
pub fn recognize_text(path: impl AsRef<Path>, config: &OcrConfig) -> OcrResult<String> {
    Pipeline::tesseract(config).recognize(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, OcrError};
    use std::cell::RefCell;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingRecognizer {
        calls: RefCell<Vec<(u32, u32, String)>>,
    }

    impl Recognizer for RecordingRecognizer {
        fn recognize(&self, image: &GrayImage, language: &str) -> OcrResult<String> {
            let (width, height) = image.dimensions();
            self.calls
                .borrow_mut()
                .push((width, height, language.to_string()));
            Ok(" TOTAL 12.50\n\n".to_string())
        }
    }

    struct FailingRecognizer;

    impl Recognizer for FailingRecognizer {
        fn recognize(&self, _image: &GrayImage, _language: &str) -> OcrResult<String> {
            Err(OcrError::recognition("Failed loading language 'eng'"))
        }
    }

    fn write_png(path: &Path) {
        let image = image::RgbImage::from_fn(12, 6, |x, _| {
            if x < 6 {
                image::Rgb([20, 20, 40])
            } else {
                image::Rgb([240, 235, 220])
            }
        });
        image.save(path).expect("save png");
    }

    #[test]
    fn default_config_is_english_on_path() {
        let config = OcrConfig::default();
        assert_eq!(config.language, "eng");
        assert!(config.engine_path.is_none());
        assert_eq!(Pipeline::tesseract(&config).language(), "eng");
    }

    #[test]
    fn text_is_returned_untrimmed() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("receipt.png");
        write_png(&path);

        let recognizer = RecordingRecognizer::default();
        let pipeline = Pipeline::new(&recognizer, "eng");
        let text = pipeline.recognize(&path).expect("recognize");
        assert_eq!(text, " TOTAL 12.50\n\n");
        assert_eq!(
            recognizer.calls.borrow().as_slice(),
            &[(12, 6, "eng".to_string())]
        );
    }

    #[test]
    fn missing_file_never_reaches_engine() {
        let dir = tempdir().expect("tempdir");
        let recognizer = RecordingRecognizer::default();
        let err = Pipeline::new(&recognizer, "eng")
            .recognize(&dir.path().join("missing.jpg"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(recognizer.calls.borrow().is_empty());
    }

    #[test]
    fn engine_fault_is_surfaced_with_message() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("receipt.png");
        write_png(&path);

        let err = Pipeline::new(FailingRecognizer, "eng")
            .recognize(&path)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RecognitionError);
        assert!(err.to_string().contains("Failed loading language 'eng'"));
    }
}
