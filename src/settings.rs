use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ocr::{DEFAULT_LANGUAGE, OcrConfig};

const DEFAULT_SETTINGS_TOML: &str = include_str!("../settings.toml");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tesseract_path: Option<String>,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tesseract_path: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    tesseract: Option<TesseractSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct TesseractSettings {
    path: Option<String>,
    language: Option<String>,
}

/// Loads the bundled defaults, then every settings file that exists, later
/// files overriding earlier ones. Unreadable implicit files are skipped with a
/// warning; `extra_path` must exist and parse when given.
pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();
    let defaults: SettingsFile =
        toml::from_str(DEFAULT_SETTINGS_TOML).with_context(|| "failed to parse default settings")?;
    settings.merge(defaults);

    let mut implicit_paths = Vec::new();
    implicit_paths.push(PathBuf::from("settings.toml"));
    implicit_paths.push(PathBuf::from("settings.local.toml"));

    if let Some(home) = home_dir() {
        implicit_paths.push(home.join("settings.toml"));
        implicit_paths.push(home.join("settings.local.toml"));
    }

    for path in implicit_paths {
        if !path.is_file() {
            continue;
        }
        match read_settings_file(&path) {
            Ok(parsed) => settings.merge(parsed),
            Err(err) => tracing::warn!("skipping settings file: {:#}", err),
        }
    }

    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        settings.merge(read_settings_file(extra)?);
    }

    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<SettingsFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings: {}", path.display()))?;
    let parsed = toml::from_str(&content)
        .with_context(|| format!("failed to parse settings: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(parsed)
}

impl Settings {
    fn merge(&mut self, incoming: SettingsFile) {
        if let Some(tesseract) = incoming.tesseract {
            if let Some(path) = tesseract.path {
                if !path.trim().is_empty() {
                    self.tesseract_path = Some(path);
                }
            }
            if let Some(language) = tesseract.language {
                if !language.trim().is_empty() {
                    self.language = language;
                }
            }
        }
    }

    pub fn ocr_config(&self) -> OcrConfig {
        OcrConfig {
            engine_path: self.tesseract_path.as_deref().map(expand_tilde),
            language: self.language.trim().to_string(),
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().and_then(|home| {
        let home = home.trim();
        if home.is_empty() {
            None
        } else {
            Some(Path::new(home).join(".image-to-text"))
        }
    })
}

fn expand_tilde(value: &str) -> PathBuf {
    let value = value.trim();
    if value == "~" || value.starts_with("~/") {
        if let Ok(home) = std::env::var("HOME") {
            let home = home.trim();
            if !home.is_empty() {
                return PathBuf::from(format!("{}{}", home, &value[1..]));
            }
        }
    }
    PathBuf::from(value)
}
