pub mod admin;
pub mod functions;
pub mod health;
pub mod options;
pub mod static_files;
pub mod swap;
pub mod templates;
