use anyhow::{Context, Result, anyhow};
use image::GrayImage;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{OcrError, OcrResult};
use crate::ocr::OcrConfig;

const DEFAULT_PROGRAM: &str = "tesseract";

/// Text recognition backend fed with the binarized image.
pub trait Recognizer {
    fn recognize(&self, image: &GrayImage, language: &str) -> OcrResult<String>;
}

impl<R: Recognizer + ?Sized> Recognizer for &R {
    fn recognize(&self, image: &GrayImage, language: &str) -> OcrResult<String> {
        (**self).recognize(image, language)
    }
}

/// Runs the `tesseract` command line tool.
#[derive(Debug, Clone)]
pub struct Tesseract {
    program: PathBuf,
}

impl Tesseract {
    pub fn new(config: &OcrConfig) -> Self {
        let program = config
            .engine_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRAM));
        Self { program }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn list_languages(&self) -> Result<Vec<String>> {
        let output = Command::new(&self.program)
            .arg("--list-langs")
            .output()
            .with_context(|| format!("failed to run {} --list-langs", self.program.display()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("tesseract --list-langs failed: {}", stderr.trim()));
        }
        Ok(parse_language_list(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Resolves a `+`, `,` or space separated language request against the
    /// installed traineddata. When the engine cannot be asked or lists nothing,
    /// the request is passed through untouched and the engine reports the
    /// problem later.
    pub fn normalize_languages(&self, requested: &str) -> Result<String> {
        let trimmed = requested.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("ocr language is empty"));
        }
        match self.list_languages() {
            Ok(available) if !available.is_empty() => select_languages(trimmed, &available),
            Ok(_) => {
                tracing::debug!("tesseract listed no languages on stdout");
                Ok(trimmed.to_string())
            }
            Err(err) => {
                tracing::debug!("could not list tesseract languages: {:#}", err);
                Ok(trimmed.to_string())
            }
        }
    }
}

impl Recognizer for Tesseract {
    fn recognize(&self, image: &GrayImage, language: &str) -> OcrResult<String> {
        let language = self
            .normalize_languages(language)
            .map_err(|err| OcrError::recognition(format!("{:#}", err)))?;

        let mut tmp = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .map_err(|err| {
                OcrError::recognition(format!("failed to create temp file for OCR: {}", err))
            })?;
        image
            .write_to(&mut tmp, image::ImageFormat::Png)
            .map_err(|err| {
                OcrError::recognition(format!("failed to write temp image for OCR: {}", err))
            })?;
        tmp.flush().map_err(|err| {
            OcrError::recognition(format!("failed to flush temp image for OCR: {}", err))
        })?;

        tracing::debug!(
            program = %self.program.display(),
            language = %language,
            "running tesseract"
        );
        let output = Command::new(&self.program)
            .arg(tmp.path())
            .arg("stdout")
            .arg("-l")
            .arg(&language)
            .output()
            .map_err(|err| {
                OcrError::recognition(format!(
                    "failed to run {} (is it installed?): {}",
                    self.program.display(),
                    err
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let message = if stderr.is_empty() {
                format!("tesseract exited with {}", output.status)
            } else {
                format!("tesseract failed: {}", stderr)
            };
            return Err(OcrError::recognition(message));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

fn parse_language_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

fn select_languages(requested: &str, available: &[String]) -> Result<String> {
    let mut chosen = Vec::new();
    let mut missing = Vec::new();
    for raw in requested.split(['+', ',', ' ']) {
        let lang = raw.trim();
        if lang.is_empty() {
            continue;
        }
        if available.iter().any(|value| value == lang) {
            chosen.push(lang.to_string());
        } else {
            missing.push(lang.to_string());
        }
    }

    if chosen.is_empty() {
        return Err(anyhow!(
            "ocr language(s) not available: {} (available: {})",
            missing.join(", "),
            available.join(", ")
        ));
    }
    if !missing.is_empty() {
        tracing::warn!(
            "ocr language(s) not available: {} (available: {})",
            missing.join(", "),
            available.join(", ")
        );
    }
    Ok(chosen.join("+"))
}
