//! Data models for the application
//!
//! Each sub-module represents a specific feature area.

mod storage;
mod swap;
mod template;

pub use storage::*;
pub use swap::*;
pub use template::*;
