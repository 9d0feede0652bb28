use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    DecodeError,
    RecognitionError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::DecodeError => "decode_error",
            ErrorKind::RecognitionError => "recognition_error",
        }
    }
}

/// Errors produced by the image-to-text pipeline.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to decode image {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("OCR engine failed: {0}")]
    Recognition(String),
}

impl OcrError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OcrError::NotFound { .. } => ErrorKind::NotFound,
            OcrError::Decode { .. } => ErrorKind::DecodeError,
            OcrError::Recognition(_) => ErrorKind::RecognitionError,
        }
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        OcrError::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn recognition(message: impl Into<String>) -> Self {
        OcrError::Recognition(message.into())
    }
}

pub type OcrResult<T> = Result<T, OcrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = OcrError::NotFound {
            path: PathBuf::from("scans/missing.png"),
        };
        assert_eq!(err.to_string(), "Image file not found at scans/missing.png");
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = OcrError::decode("a.png", "file is empty");
        assert_eq!(err.to_string(), "failed to decode image a.png: file is empty");
        assert_eq!(err.kind().as_str(), "decode_error");

        let err = OcrError::recognition("Error opening data file eng.traineddata");
        assert!(err.to_string().contains("eng.traineddata"));
        assert_eq!(err.kind(), ErrorKind::RecognitionError);
    }
}
