//! Configuration module
//!
//! Configuration is read once at startup from the environment (a `.env` file is
//! loaded first when present). Values fall back to defaults unless noted.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_ROOT: &str = "static";
const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-image-preview";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 300;
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_SESSION_TTL_HOURS: u64 = 24;
const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 20;

/// Settings for the remote image generation service
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key; swaps fail with a configuration error when absent
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Admin credentials for the session login and the bearer token used by the function endpoints
#[derive(Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
    pub api_token: String,
    pub session_ttl_hours: u64,
}

impl Debug for AdminConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("api_token", &"<redacted>")
            .field("session_ttl_hours", &self.session_ttl_hours)
            .finish()
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Parent directory of the generated, templates_gallery and user_uploads directories
    pub static_root: PathBuf,
    pub max_upload_size_bytes: usize,
    /// Keep user photos on disk after the pipeline has consumed them
    pub retain_user_uploads: bool,
    /// Emit logs as JSON lines (`LOG_FORMAT=json`)
    pub log_json: bool,
    pub gemini: GeminiConfig,
    pub admin: AdminConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_PORT,
        };

        let max_upload_size_mb = lookup("MAX_UPLOAD_SIZE_MB")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB);
        let max_upload_size_bytes = max_upload_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large"))?;

        let username = lookup("ADMIN_USERNAME")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string());
        let password = lookup("ADMIN_PASSWORD")
            .ok_or_else(|| anyhow::anyhow!("ADMIN_PASSWORD must be set for admin access"))?;
        let api_token = lookup("ADMIN_API_TOKEN")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("{}-{}", username, password));

        let config = Config {
            server_port,
            environment,
            cors_origins,
            static_root: lookup("STATIC_ROOT")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_STATIC_ROOT.to_string())
                .into(),
            max_upload_size_bytes,
            retain_user_uploads: parse_bool(lookup("RETAIN_USER_UPLOADS"), false),
            log_json: lookup("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
            gemini: GeminiConfig {
                api_key: lookup("GEMINI_API_KEY").filter(|s| !s.trim().is_empty()),
                model: lookup("GEMINI_MODEL")
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                api_base: lookup("GEMINI_API_BASE")
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
                timeout_secs: lookup("GEMINI_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_GEMINI_TIMEOUT_SECS),
            },
            admin: AdminConfig {
                username,
                password,
                api_token,
                session_ttl_hours: lookup("SESSION_TTL_HOURS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SESSION_TTL_HOURS),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.admin.password.is_empty() {
            return Err(anyhow::anyhow!("ADMIN_PASSWORD must not be empty"));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini.api_key.as_deref()
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| v.trim().to_lowercase())
        .and_then(|v| match v.as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[("ADMIN_PASSWORD", "secret")])).unwrap();
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.static_root, PathBuf::from("static"));
        assert_eq!(config.gemini.model, "gemini-3-pro-image-preview");
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.max_upload_size_bytes, 20 * 1024 * 1024);
        assert!(!config.retain_user_uploads);
    }

    #[test]
    fn api_token_defaults_to_username_and_password() {
        let config = Config::from_lookup(lookup_from(&[("ADMIN_PASSWORD", "2")])).unwrap();
        assert_eq!(config.admin.api_token, "admin-2");
    }

    #[test]
    fn missing_admin_password_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        let result = Config::from_lookup(lookup_from(&[
            ("ADMIN_PASSWORD", "secret"),
            ("ENVIRONMENT", "production"),
        ]));
        assert!(result.is_err());

        let config = Config::from_lookup(lookup_from(&[
            ("ADMIN_PASSWORD", "secret"),
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://faceswap.example.com"),
        ]))
        .unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("ADMIN_PASSWORD", "secret"),
            ("PORT", "not-a-port"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn blank_api_key_treated_as_missing() {
        let config = Config::from_lookup(lookup_from(&[
            ("ADMIN_PASSWORD", "secret"),
            ("GEMINI_API_KEY", "  "),
        ]))
        .unwrap();
        assert!(config.gemini_api_key().is_none());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = Config::from_lookup(lookup_from(&[
            ("ADMIN_PASSWORD", "hunter2"),
            ("GEMINI_API_KEY", "AIza-very-secret"),
        ]))
        .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("AIza-very-secret"));
    }

    #[test]
    fn retain_user_uploads_parses_flags() {
        let config = Config::from_lookup(lookup_from(&[
            ("ADMIN_PASSWORD", "secret"),
            ("RETAIN_USER_UPLOADS", "TRUE"),
        ]))
        .unwrap();
        assert!(config.retain_user_uploads);
    }

    #[test]
    fn oversized_upload_limit_is_rejected() {
        let too_large = usize::MAX.to_string();
        let result = Config::from_lookup(lookup_from(&[
            ("ADMIN_PASSWORD", "secret"),
            ("MAX_UPLOAD_SIZE_MB", too_large.as_str()),
        ]));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("MAX_UPLOAD_SIZE_MB"));
    }

    #[test]
    fn huge_session_ttl_is_accepted() {
        let huge = u64::MAX.to_string();
        let config = Config::from_lookup(lookup_from(&[
            ("ADMIN_PASSWORD", "secret"),
            ("SESSION_TTL_HOURS", huge.as_str()),
        ]))
        .unwrap();
        assert_eq!(config.admin.session_ttl_hours, u64::MAX);
    }
}
