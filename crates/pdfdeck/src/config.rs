use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::deck::{DeckSettings, FitMode};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "pdfdeck";

const MIN_THUMBNAIL_WIDTH: u32 = 64;
const MAX_THUMBNAIL_WIDTH: u32 = 1024;
const MAX_PROJECTION_SIDE: u32 = 8192;

pub const VALID_KEYS: &[&str] = &[
    "defaults.theme",
    "defaults.thumbnail_width",
    "defaults.projection_width",
    "defaults.projection_height",
    "defaults.projector_fullscreen",
    "defaults.start_mode",
    "defaults.fit",
    "pdfium.library_dir",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdfium: Option<PdfiumConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection_width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection_height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projector_fullscreen: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_mode: Option<StartMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<FitMode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfiumConfig {
    /// Directory holding the PDFium shared library. When unset the
    /// executable's directory, the working directory and the system library
    /// path are tried in that order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_dir: Option<PathBuf>,
}

/// Which window the GUI opens in when files are given on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartMode {
    #[default]
    Organizer,
    Present,
}

impl StartMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "organizer" => Some(Self::Organizer),
            "present" => Some(Self::Present),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Organizer => "organizer",
            Self::Present => "present",
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `pdfdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(error = %e, "using default config");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# pdfdeck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults_mut().theme = Some(value.to_string());
            }
            "defaults.thumbnail_width" => {
                let width = parse_pixels(key, value)?;
                if !(MIN_THUMBNAIL_WIDTH..=MAX_THUMBNAIL_WIDTH).contains(&width) {
                    anyhow::bail!(
                        "Invalid thumbnail_width: {value}. Must be between {MIN_THUMBNAIL_WIDTH} and {MAX_THUMBNAIL_WIDTH}."
                    );
                }
                self.defaults_mut().thumbnail_width = Some(width);
            }
            "defaults.projection_width" => {
                let width = parse_pixels(key, value)?;
                self.defaults_mut().projection_width = Some(width);
            }
            "defaults.projection_height" => {
                let height = parse_pixels(key, value)?;
                self.defaults_mut().projection_height = Some(height);
            }
            "defaults.projector_fullscreen" => {
                let enabled = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => anyhow::bail!(
                        "Invalid projector_fullscreen: {value}. Must be 'true' or 'false'."
                    ),
                };
                self.defaults_mut().projector_fullscreen = Some(enabled);
            }
            "defaults.start_mode" => {
                let Some(mode) = StartMode::from_name(value) else {
                    anyhow::bail!(
                        "Invalid start_mode: {value}. Must be 'organizer' or 'present'."
                    );
                };
                self.defaults_mut().start_mode = Some(mode);
            }
            "defaults.fit" => {
                let Some(fit) = FitMode::from_name(value) else {
                    anyhow::bail!("Invalid fit: {value}. Must be 'page' or 'width'.");
                };
                self.defaults_mut().fit = Some(fit);
            }
            "pdfium.library_dir" => {
                let pdfium = self.pdfium.get_or_insert_with(PdfiumConfig::default);
                pdfium.library_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: {}",
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    fn defaults_mut(&mut self) -> &mut DefaultsConfig {
        self.defaults.get_or_insert_with(DefaultsConfig::default)
    }

    fn defaults(&self) -> Option<&DefaultsConfig> {
        self.defaults.as_ref()
    }

    pub fn theme_name(&self) -> &str {
        self.defaults()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("dark")
    }

    pub fn start_mode(&self) -> StartMode {
        self.defaults()
            .and_then(|d| d.start_mode)
            .unwrap_or_default()
    }

    pub fn projector_fullscreen(&self) -> bool {
        self.defaults()
            .and_then(|d| d.projector_fullscreen)
            .unwrap_or(true)
    }

    pub fn library_dir(&self) -> Option<&Path> {
        self.pdfium.as_ref().and_then(|p| p.library_dir.as_deref())
    }

    /// Deck settings with configured values over the built-in defaults.
    pub fn deck_settings(&self) -> DeckSettings {
        let mut settings = DeckSettings::default();
        if let Some(defaults) = self.defaults() {
            if let Some(width) = defaults.thumbnail_width {
                settings.thumbnail_width = width;
            }
            if let Some(width) = defaults.projection_width {
                settings.projection_size[0] = width;
            }
            if let Some(height) = defaults.projection_height {
                settings.projection_size[1] = height;
            }
            if let Some(fit) = defaults.fit {
                settings.fit = fit;
            }
        }
        settings
    }
}

fn parse_pixels(key: &str, value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(n) if (1..=MAX_PROJECTION_SIDE).contains(&n) => Ok(n),
        _ => anyhow::bail!(
            "Invalid value for {key}: {value}. Must be a pixel count between 1 and {MAX_PROJECTION_SIDE}."
        ),
    }
}
