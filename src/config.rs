use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{error, warn};

use crate::view::ViewOption;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "DataConfig::default_uk_csv")]
    pub uk_csv: String,
    #[serde(default = "DataConfig::default_us_csv")]
    pub us_csv: String,
}

impl DataConfig {
    fn default_uk_csv() -> String {
        "data/data_social_media_use.csv".to_string()
    }
    fn default_us_csv() -> String {
        "data/flat_data.csv".to_string()
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            uk_csv: Self::default_uk_csv(),
            us_csv: Self::default_us_csv(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "WindowConfig::default_width")]
    pub width: f32,
    #[serde(default = "WindowConfig::default_height")]
    pub height: f32,
    #[serde(default = "WindowConfig::default_pixels_per_point")]
    pub pixels_per_point: f32,
}

impl WindowConfig {
    fn default_width() -> f32 {
        1400.0
    }
    fn default_height() -> f32 {
        1000.0
    }
    fn default_pixels_per_point() -> f32 {
        1.25
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            pixels_per_point: Self::default_pixels_per_point(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_width")]
    pub width: u32,
    #[serde(default = "RenderConfig::default_height")]
    pub height: u32,
    #[serde(default = "RenderConfig::default_out_dir")]
    pub out_dir: String,
}

impl RenderConfig {
    fn default_width() -> u32 {
        1200
    }
    fn default_height() -> u32 {
        600
    }
    fn default_out_dir() -> String {
        "target/plots".to_string()
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            out_dir: Self::default_out_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewConfig {
    #[serde(default)]
    pub default: ViewOption,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

impl AppConfig {
    fn format_f32_compact(x: f32) -> String {
        let mut s = format!("{:.6}", x);
        while s.contains('.') && s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        if s.is_empty() { "0".to_string() } else { s }
    }

    /// Serializes the defaults with every value line commented out.
    fn commented_template(&self) -> Option<String> {
        let text = toml::to_string_pretty(self).ok()?;
        let mut commented = String::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                commented.push('\n');
            } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
                commented.push_str(line);
                commented.push('\n');
            } else {
                let mut out_line = line.to_string();
                if let Some((lhs, rhs)) = line.split_once('=') {
                    let rhs_trim = rhs.trim();
                    if rhs_trim.contains('.') && !rhs_trim.contains('"') {
                        if let Ok(val) = rhs_trim.parse::<f32>() {
                            let mut formatted = Self::format_f32_compact(val);
                            if !formatted.contains('.') {
                                formatted.push_str(".0");
                            }
                            out_line = format!("{} = {}", lhs.trim(), formatted);
                        }
                    }
                }
                commented.push_str("# ");
                commented.push_str(&out_line);
                commented.push('\n');
            }
        }
        Some(commented)
    }

    /// Reads `path`; falls back to defaults on any error. A missing file is
    /// created with the defaults as a commented template.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        error!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    error!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        let default_cfg = Self::default();
        match default_cfg.commented_template() {
            Some(text) => {
                if let Err(err) = fs::write(path_obj, text) {
                    warn!("Failed to write default config to {path}: {err}");
                }
            }
            None => warn!("Failed to serialize default config; continuing with defaults"),
        }
        default_cfg
    }
}
