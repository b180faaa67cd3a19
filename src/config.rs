use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// An RGB colour, written as `[r, g, b]` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const GREY: Rgb = Rgb(128, 128, 128);

    /// Formats the colour as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

fn default_style_font_size() -> f64 {
    22.0
}

/// Declarative text style selected by a `[tag]` at the start of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    #[serde(default = "default_style_font_size")]
    pub font_size: f64,
    /// When absent, the body text colour is used.
    #[serde(default)]
    pub color: Option<Rgb>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl StyleDescriptor {
    pub fn new(font_size: f64, color: Rgb) -> Self {
        StyleDescriptor {
            font_size,
            color: Some(color),
            bold: false,
            italic: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Settings for one build or validate invocation.
///
/// Constructed once (defaults overlaid by user keys) and then only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Full-slide picture placed behind every slide, when the file exists.
    pub background_image: Option<PathBuf>,
    pub background_color: Option<Rgb>,
    pub title_color: Rgb,
    pub text_color: Rgb,
    pub font_name: String,
    /// Slide width in inches.
    pub slide_width: f64,
    /// Slide height in inches.
    pub slide_height: f64,
    pub enable_animations: bool,
    pub enable_slide_numbers: bool,
    pub enable_overflow_warnings: bool,
    pub styles: BTreeMap<String, StyleDescriptor>,
}

impl Default for Configuration {
    fn default() -> Self {
        let mut styles = BTreeMap::new();
        styles.insert(
            "vocabulary".to_string(),
            StyleDescriptor::new(24.0, Rgb(0, 102, 0)).bold(),
        );
        styles.insert(
            "question".to_string(),
            StyleDescriptor::new(20.0, Rgb(102, 0, 102)),
        );
        styles.insert(
            "answer".to_string(),
            StyleDescriptor::new(18.0, Rgb(128, 128, 128)).italic(),
        );
        styles.insert(
            "emphasis".to_string(),
            StyleDescriptor::new(22.0, Rgb(192, 0, 0)).bold(),
        );

        Configuration {
            background_image: None,
            background_color: None,
            title_color: Rgb(192, 0, 0),
            text_color: Rgb(0, 0, 102),
            font_name: "Montserrat".to_string(),
            slide_width: 13.33,
            slide_height: 7.5,
            enable_animations: true,
            enable_slide_numbers: true,
            enable_overflow_warnings: true,
            styles,
        }
    }
}

impl Configuration {
    /// Builds a configuration from a JSON document.
    ///
    /// Each top-level key of `json` replaces the default value wholesale;
    /// missing keys keep their defaults. A user `styles` object therefore
    /// replaces the whole default style table.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let user: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(user) = user else {
            return Err(serde::de::Error::custom(
                "config root must be a JSON object",
            ));
        };

        let mut merged = serde_json::to_value(Configuration::default())?;
        if let serde_json::Value::Object(base) = &mut merged {
            for (key, value) in user {
                base.insert(key, value);
            }
        }
        serde_json::from_value(merged)
    }

    /// Loads a configuration file, failing on any I/O or JSON error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads a configuration file if it exists, falling back to defaults
    /// (with a warning) when it cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Looks up a style by tag name. Unknown names yield `None`, which callers
    /// treat as default body styling.
    pub fn style(&self, name: &str) -> Option<&StyleDescriptor> {
        self.styles.get(name)
    }
}
