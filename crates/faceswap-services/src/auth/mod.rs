//! Admin authorization
//!
//! Privileged operations accept one of two proofs: username/password (to open
//! a session) or a static bearer token. Both are checked through
//! [`AdminAuthorizer`].

mod authorizer;
mod session;

pub use authorizer::{
    parse_bearer, secure_compare, AdminAuthorizer, AdminProof, StaticBearerToken,
    StaticCredentials,
};
pub use session::SessionStore;
