//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub photoshoot: PhotoshootConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// External generative service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Bearer credential. Falls back to the GEMINI_API_KEY environment
    /// variable when absent.
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_text_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_image_model() -> String {
    "imagen-4.0-ultra-generate-001".to_string()
}

fn default_timeout() -> u64 {
    120000
}

/// Supported output aspect ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "9:16")]
    Vertical,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "3:4")]
    Portrait,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Widescreen => "16:9",
            Self::Vertical => "9:16",
            Self::Landscape => "4:3",
            Self::Portrait => "3:4",
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::Square
    }
}

/// Engine selected for the chat's implicit (non-profile) generation path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineSelector {
    /// Resolve to text or image generation by prompt keywords
    Auto,
    /// Plain text generation
    Text,
    /// Pure text-to-image generation
    ImageGeneration,
    /// Reference-image editor; only usable through consistency profiles
    ProfileEditor,
    /// Search-grounded text generation with cited sources
    GroundedSearch,
}

impl Default for EngineSelector {
    fn default() -> Self {
        Self::Auto
    }
}

/// Requested encoding of generated images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Jpeg
    }
}

/// Process-wide defaults for the chat's implicit generation path
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    #[serde(default = "default_number_of_images")]
    pub number_of_images: u32,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    #[serde(default)]
    pub engine: EngineSelector,
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_number_of_images() -> u32 {
    1
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            number_of_images: default_number_of_images(),
            aspect_ratio: AspectRatio::default(),
            engine: EngineSelector::default(),
            output_format: OutputFormat::default(),
        }
    }
}

/// Multi-shot photoshoot session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhotoshootConfig {
    /// Courtesy pause between shots, not correctness-driven
    #[serde(default = "default_shot_delay")]
    pub shot_delay_ms: u64,
    #[serde(default = "default_shots")]
    pub default_shots: u32,
}

fn default_shot_delay() -> u64 {
    3000
}

fn default_shots() -> u32 {
    4
}

impl Default for PhotoshootConfig {
    fn default() -> Self {
        Self {
            shot_delay_ms: default_shot_delay(),
            default_shots: default_shots(),
        }
    }
}

/// Local persistence and image output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub base_path: String,
    #[serde(default = "default_state_file")]
    pub state_file: String,
}

fn default_storage_path() -> String {
    "./studio_output".to_string()
}

fn default_state_file() -> String {
    "./studio_state.json".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/default.toml")
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            // Start with default values
            .set_default("api.base_url", default_base_url())?
            .set_default("api.text_model", default_text_model())?
            .set_default("api.image_model", default_image_model())?
            .set_default("api.timeout_ms", default_timeout() as i64)?
            .set_default("storage.base_path", default_storage_path())?
            .set_default("storage.state_file", default_state_file())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            // Load from configuration file
            .add_source(
                File::with_name(path.as_ref().to_str().unwrap_or("config/default")).required(false),
            )
            // Override with environment variables (prefixed with LUMIUM_)
            .add_source(Environment::with_prefix("LUMIUM").separator("__").try_parsing(true))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "API base URL cannot be empty".to_string(),
            )));
        }
        if self.generation.number_of_images == 0 || self.generation.number_of_images > 8 {
            return Err(AppError::Config(config::ConfigError::Message(
                "generation.number_of_images must be between 1 and 8".to_string(),
            )));
        }
        if !(2..=8).contains(&self.photoshoot.default_shots) {
            return Err(AppError::Config(config::ConfigError::Message(
                "photoshoot.default_shots must be between 2 and 8".to_string(),
            )));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                key: None,
                base_url: default_base_url(),
                text_model: default_text_model(),
                image_model: default_image_model(),
                timeout_ms: default_timeout(),
            },
            generation: GenerationConfig::default(),
            photoshoot: PhotoshootConfig::default(),
            storage: StorageConfig {
                base_path: default_storage_path(),
                state_file: default_state_file(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}
