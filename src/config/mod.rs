//! Configuration module

pub mod settings;

pub use settings::{
    ApiConfig, AspectRatio, EngineSelector, GenerationConfig, OutputFormat, PhotoshootConfig,
    Settings,
};
