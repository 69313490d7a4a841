//! Application state and sub-state extractors.
//!
//! Admin middleware extracts only [`AdminState`] via Axum's `FromRef`.

use faceswap_core::Config;
use faceswap_services::{
    AdminAuthorizer, ImageGenerator, SessionStore, StaticBearerToken, StaticCredentials, Storage,
    SwapService, TemplateService,
};
use std::sync::Arc;
use std::time::Duration;

/// Everything needed to check admin proofs
#[derive(Clone)]
pub struct AdminState {
    /// Username/password check used by the login route
    pub credentials: Arc<dyn AdminAuthorizer>,
    /// Bearer token check used by the function routes
    pub api_token: Arc<dyn AdminAuthorizer>,
    pub sessions: SessionStore,
    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,
}

pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub swaps: SwapService,
    pub templates: TemplateService,
    pub admin: AdminState,
    pub is_production: bool,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        generator: Option<Arc<dyn ImageGenerator>>,
    ) -> Self {
        let admin = AdminState {
            credentials: Arc::new(StaticCredentials::from_config(&config.admin)),
            api_token: Arc::new(StaticBearerToken::from_config(&config.admin)),
            sessions: SessionStore::new(Duration::from_secs(
                config.admin.session_ttl_hours.saturating_mul(3600),
            )),
            secure_cookies: config.is_production(),
        };

        Self {
            swaps: SwapService::new(storage.clone(), generator, config.retain_user_uploads),
            templates: TemplateService::new(storage.clone()),
            is_production: config.is_production(),
            storage,
            admin,
            config,
        }
    }
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for AdminState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.admin.clone()
    }
}
