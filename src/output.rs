use serde::Serialize;

use crate::error::{ErrorKind, OcrResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct JsonOutcome<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Renders a pipeline outcome as the single block printed on stdout.
pub fn render_outcome(outcome: &OcrResult<String>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => match outcome {
            Ok(text) => text.clone(),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => format!("Error: {}", err),
                _ => format!("Error during OCR processing: {}", err),
            },
        },
        OutputFormat::Json => {
            let payload = match outcome {
                Ok(text) => JsonOutcome {
                    ok: true,
                    text: Some(text.as_str()),
                    kind: None,
                    message: None,
                },
                Err(err) => JsonOutcome {
                    ok: false,
                    text: None,
                    kind: Some(err.kind()),
                    message: Some(err.to_string()),
                },
            };
            serde_json::to_string(&payload)
                .unwrap_or_else(|err| format!(r#"{{"ok":false,"message":"{}"}}"#, err))
        }
    }
}

/// Exit status for an outcome. Failures only change the status when
/// `distinct_codes` is set; otherwise every completed run exits 0.
pub fn exit_code(outcome: &OcrResult<String>, distinct_codes: bool) -> i32 {
    match outcome {
        Ok(_) => 0,
        Err(_) if !distinct_codes => 0,
        Err(err) => match err.kind() {
            ErrorKind::NotFound => 2,
            ErrorKind::DecodeError => 3,
            ErrorKind::RecognitionError => 4,
        },
    }
}
