//! Faceswap Storage Library
//!
//! This crate provides the storage abstraction and the local filesystem
//! implementation used for templates, generated images and user uploads.
//!
//! # Layout
//!
//! Files live in one of three areas under a common root:
//!
//! - `generated/{uuid}.{ext}`: generation output
//! - `templates_gallery/{uuid}_{name}` or `templates_gallery/{uuid}.png`: gallery templates
//! - `user_uploads/{uuid}_{name}` or `user_uploads/user_{uuid}.png`: user photos
//!
//! File names are single path components; names containing `..` or a path
//! separator are rejected. Name generation is centralized in the `keys` module.

pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use faceswap_core::StorageArea;
pub use local::LocalStorage;
pub use traits::{ByteStream, Storage, StorageError, StorageResult, StoredObject};
