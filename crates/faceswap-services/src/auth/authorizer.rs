use faceswap_core::AdminConfig;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use subtle::ConstantTimeEq;

/// Proof presented for a privileged operation
#[derive(Clone, Copy)]
pub enum AdminProof<'a> {
    Credentials { username: &'a str, password: &'a str },
    BearerToken(&'a str),
}

impl Debug for AdminProof<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AdminProof::Credentials { username, .. } => f
                .debug_struct("Credentials")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            AdminProof::BearerToken(_) => f.write_str("BearerToken([REDACTED])"),
        }
    }
}

pub trait AdminAuthorizer: Send + Sync {
    fn authorize(&self, proof: &AdminProof<'_>) -> bool;
}

/// Constant-time string comparison. Length is not hidden.
pub fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Token from an `Authorization: Bearer <token>` header value.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Configured admin username and password
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

impl AdminAuthorizer for StaticCredentials {
    fn authorize(&self, proof: &AdminProof<'_>) -> bool {
        match proof {
            AdminProof::Credentials { username, password } => {
                // Both comparisons always run.
                let user_ok = secure_compare(username, &self.username);
                let pass_ok = secure_compare(password, &self.password);
                user_ok & pass_ok
            }
            AdminProof::BearerToken(_) => false,
        }
    }
}

/// Configured admin API token
pub struct StaticBearerToken {
    token: String,
}

impl StaticBearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.api_token.clone())
    }
}

impl AdminAuthorizer for StaticBearerToken {
    fn authorize(&self, proof: &AdminProof<'_>) -> bool {
        match proof {
            AdminProof::BearerToken(token) => secure_compare(token, &self.token),
            AdminProof::Credentials { .. } => false,
        }
    }
}
