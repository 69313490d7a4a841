//! Admin authentication for both HTTP surfaces

pub mod middleware;

/// Name of the admin session cookie
pub const SESSION_COOKIE: &str = "faceswap_session";
