//! Faceswap Core Library
//!
//! This crate provides the domain models, error types, configuration and
//! media-type helpers shared by every Faceswap component.

pub mod config;
pub mod error;
pub mod media_type;
pub mod models;

// Re-export commonly used types
pub use config::{AdminConfig, Config, GeminiConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{AspectRatio, ImageSize, StorageArea};
