use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};

pub mod error;
pub mod logging;
pub mod ocr;
pub mod output;
pub mod settings;
mod test_util;

pub use error::{ErrorKind, OcrError, OcrResult};
pub use ocr::{OcrConfig, Pipeline, Recognizer, Tesseract, recognize_text};
pub use output::OutputFormat;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub image_path: Option<String>,
    pub tesseract_path: Option<String>,
    pub lang: Option<String>,
    pub settings_path: Option<String>,
    pub format: OutputFormat,
    pub exit_code: bool,
    pub list_langs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub text: String,
    pub exit_code: i32,
}

/// Resolves settings and runs one CLI invocation.
///
/// Pipeline failures are part of the returned output; only problems with
/// explicit options (a bad `--read-settings` file, an empty language) come
/// back as `Err`.
pub fn run(config: Config) -> Result<RunOutput> {
    let settings_path = config.settings_path.as_deref().map(Path::new);
    let settings = settings::load_settings(settings_path)?;
    let ocr_config = resolve_ocr_config(&config, &settings)?;
    tracing::debug!(
        engine = ?ocr_config.engine_path,
        language = %ocr_config.language,
        "resolved OCR config"
    );

    if config.list_langs {
        let languages = Tesseract::new(&ocr_config)
            .list_languages()
            .with_context(|| "failed to list OCR languages")?;
        return Ok(RunOutput {
            text: languages.join("\n"),
            exit_code: 0,
        });
    }

    let image_path = config
        .image_path
        .as_deref()
        .ok_or_else(|| anyhow!("image path is required"))?;
    let outcome = recognize_text(image_path, &ocr_config);
    if let Err(err) = &outcome {
        tracing::debug!(kind = err.kind().as_str(), "OCR failed: {}", err);
    }

    Ok(RunOutput {
        text: output::render_outcome(&outcome, config.format),
        exit_code: output::exit_code(&outcome, config.exit_code),
    })
}

fn resolve_ocr_config(config: &Config, settings: &settings::Settings) -> Result<OcrConfig> {
    let mut ocr_config = settings.ocr_config();
    if let Some(path) = config.tesseract_path.as_deref() {
        let path = path.trim();
        if !path.is_empty() {
            ocr_config.engine_path = Some(PathBuf::from(path));
        }
    }
    if let Some(lang) = config.lang.as_deref() {
        ocr_config.language = lang.trim().to_string();
    }
    if ocr_config.language.is_empty() {
        return Err(anyhow!("ocr language is empty"));
    }
    Ok(ocr_config)
}
