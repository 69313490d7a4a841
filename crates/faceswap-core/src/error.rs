//! Error taxonomy shared by every crate.
//!
//! Client-visible failures are unified under [`AppError`]: missing input,
//! not found, unauthorized, remote generation failure and internal failure
//! (storage, IO, anything unexpected). How each one is rendered is described
//! by [`ErrorMetadata`].

use std::io;

/// Level an error is logged at when it reaches a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Client mistakes
    Debug,
    Warn,
    /// Server-side failures
    Error,
}

/// Presentation of an error to HTTP clients.
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable code such as `NOT_FOUND`
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same request may succeed
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message shown to the client; may be less specific than `Display`
    fn client_message(&self) -> String;

    /// Hide details and error chain from clients
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Fixed rendering attributes of one error kind
struct Kind {
    status: u16,
    code: &'static str,
    type_name: &'static str,
    recoverable: bool,
    action: Option<&'static str>,
    sensitive: bool,
    level: LogLevel,
}

const RETRY_LATER: Option<&str> = Some("Retry after a short delay");

const INVALID_INPUT: Kind = Kind {
    status: 400,
    code: "INVALID_INPUT",
    type_name: "InvalidInput",
    recoverable: false,
    action: Some("Check request parameters and try again"),
    sensitive: false,
    level: LogLevel::Debug,
};

const NOT_FOUND: Kind = Kind {
    status: 404,
    code: "NOT_FOUND",
    type_name: "NotFound",
    recoverable: false,
    action: Some("Verify the file name exists"),
    sensitive: false,
    level: LogLevel::Debug,
};

const UNAUTHORIZED: Kind = Kind {
    status: 401,
    code: "UNAUTHORIZED",
    type_name: "Unauthorized",
    recoverable: false,
    action: Some("Log in as admin or provide a valid bearer token"),
    sensitive: false,
    level: LogLevel::Debug,
};

const PAYLOAD_TOO_LARGE: Kind = Kind {
    status: 413,
    code: "PAYLOAD_TOO_LARGE",
    type_name: "PayloadTooLarge",
    recoverable: false,
    action: Some("Reduce file size"),
    sensitive: false,
    level: LogLevel::Debug,
};

const GENERATION: Kind = Kind {
    status: 500,
    code: "GENERATION_ERROR",
    type_name: "Generation",
    recoverable: true,
    action: RETRY_LATER,
    sensitive: false,
    level: LogLevel::Error,
};

const NOT_CONFIGURED: Kind = Kind {
    status: 500,
    code: "NOT_CONFIGURED",
    type_name: "NotConfigured",
    recoverable: false,
    action: Some("Contact the site administrator"),
    sensitive: false,
    level: LogLevel::Error,
};

const STORAGE: Kind = Kind {
    status: 500,
    code: "STORAGE_ERROR",
    type_name: "Storage",
    recoverable: true,
    action: RETRY_LATER,
    sensitive: true,
    level: LogLevel::Error,
};

const INTERNAL: Kind = Kind {
    status: 500,
    code: "INTERNAL_ERROR",
    type_name: "Internal",
    recoverable: true,
    action: RETRY_LATER,
    sensitive: true,
    level: LogLevel::Error,
};

impl AppError {
    fn kind(&self) -> &'static Kind {
        match self {
            AppError::InvalidInput(_) => &INVALID_INPUT,
            AppError::NotFound(_) => &NOT_FOUND,
            AppError::Unauthorized(_) => &UNAUTHORIZED,
            AppError::PayloadTooLarge(_) => &PAYLOAD_TOO_LARGE,
            AppError::Generation(_) => &GENERATION,
            AppError::NotConfigured(_) => &NOT_CONFIGURED,
            AppError::Storage(_) => &STORAGE,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => &INTERNAL,
        }
    }

    /// Variant name reported in non-production error bodies
    pub fn error_type(&self) -> &str {
        self.kind().type_name
    }

    /// `Display` text followed by up to five `Caused by:` lines.
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();
        let mut causes = std::iter::successors(self.source(), |err| (*err).source());

        for err in causes.by_ref().take(5) {
            details.push_str(&format!("\n  Caused by: {}", err));
        }
        if causes.next().is_some() {
            details.push_str("\n  ... (truncated)");
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.kind().status
    }

    fn error_code(&self) -> &'static str {
        self.kind().code
    }

    fn is_recoverable(&self) -> bool {
        self.kind().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.kind().action
    }

    fn is_sensitive(&self) -> bool {
        self.kind().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.kind().level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg)
            | AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::Generation(msg)
            | AppError::NotConfigured(msg) => msg.clone(),
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("Template not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Template not found");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_generation_keeps_message() {
        let err = AppError::Generation("API key not valid".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "GENERATION_ERROR");
        assert_eq!(err.client_message(), "API key not valid");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_storage_is_hidden() {
        let err = AppError::Storage("disk full at /var/data".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Failed to access storage");
    }

    #[test]
    fn test_unauthorized_is_401() {
        let err = AppError::Unauthorized("Unauthorized".to_string());
        assert_eq!(err.http_status_code(), 401);
        assert_eq!(err.client_message(), "Unauthorized");
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = AppError::from(anyhow::anyhow!("root cause").context("outer"));
        let details = err.detailed_message();
        assert!(details.contains("Internal error with source"));
        assert!(details.contains("outer"));
    }

    #[test]
    fn test_detailed_message_truncates_long_chains() {
        let mut source = anyhow::anyhow!("root cause");
        for layer in 0..7 {
            source = source.context(format!("layer {}", layer));
        }
        let details = AppError::from(source).detailed_message();
        assert_eq!(details.matches("Caused by:").count(), 5);
        assert!(details.ends_with("... (truncated)"));
    }
}
