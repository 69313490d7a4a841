//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p faceswap-api`.

#![allow(dead_code)]

pub mod fixtures;
pub use faceswap_services::test_helpers as generator;

use axum_test::TestServer;
use faceswap_api::setup::routes;
use faceswap_api::state::AppState;
use faceswap_core::{Config, StorageArea};
use faceswap_genai::{GenerationChunk, ImageGenerator};
use faceswap_services::create_storage;
use generator::ScriptedGenerator;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_ADMIN_USERNAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "correct-horse";
pub const TEST_API_TOKEN: &str = "test-function-token";

/// Name of the template seeded into every test app
pub const SEEDED_TEMPLATE: &str = "beach.png";

/// Test application: server, scripted generator, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    /// `None` when the app was built without generation configured
    pub generator: Option<Arc<ScriptedGenerator>>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn generator(&self) -> &ScriptedGenerator {
        self.generator
            .as_deref()
            .expect("test app built without a generator")
    }

    pub fn static_root(&self) -> PathBuf {
        self._temp_dir.path().to_path_buf()
    }

    pub fn area_dir(&self, area: StorageArea) -> PathBuf {
        self.static_root().join(area.dir_name())
    }

    /// Filenames currently stored in `area`
    pub fn files_in(&self, area: StorageArea) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.area_dir(area))
            .expect("read area dir")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn seed_template(&self, filename: &str, data: &[u8]) {
        std::fs::write(self.area_dir(StorageArea::Templates).join(filename), data)
            .expect("seed template");
    }
}

/// Options for building a test app
pub struct TestAppOptions {
    /// Chunks replayed by the generator; `None` leaves generation unconfigured
    pub script: Option<Vec<Result<GenerationChunk, String>>>,
    /// Extra environment overrides
    pub env: Vec<(&'static str, String)>,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            script: Some(vec![Ok(generator::image_chunk(
                "image/png",
                &fixtures::create_minimal_png(),
            ))]),
            env: Vec::new(),
        }
    }
}

/// App with one seeded template and a generator returning a single PNG chunk.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestAppOptions::default()).await
}

/// App whose generator replays `script`.
pub async fn setup_test_app_with_script(script: Vec<Result<GenerationChunk, String>>) -> TestApp {
    setup_test_app_with(TestAppOptions {
        script: Some(script),
        ..TestAppOptions::default()
    })
    .await
}

pub async fn setup_test_app_with(options: TestAppOptions) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let mut env: HashMap<&str, String> = HashMap::from([
        ("STATIC_ROOT", temp_dir.path().to_string_lossy().into_owned()),
        ("ADMIN_USERNAME", TEST_ADMIN_USERNAME.to_string()),
        ("ADMIN_PASSWORD", TEST_ADMIN_PASSWORD.to_string()),
        ("ADMIN_API_TOKEN", TEST_API_TOKEN.to_string()),
        ("MAX_UPLOAD_SIZE_MB", "1".to_string()),
    ]);
    for (key, value) in options.env {
        env.insert(key, value);
    }

    let config = create_test_config(&env);
    let storage = create_storage(&config).await.expect("Failed to create storage");

    let generator = options.script.map(ScriptedGenerator::new);
    let dyn_generator = generator
        .clone()
        .map(|g| g as Arc<dyn ImageGenerator>);

    let state = Arc::new(AppState::new(config.clone(), storage, dyn_generator));
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    let test_app = TestApp {
        server,
        generator,
        _temp_dir: temp_dir,
    };
    test_app.seed_template(SEEDED_TEMPLATE, b"template-bytes");
    test_app
}

fn create_test_config(env: &HashMap<&str, String>) -> Config {
    Config::from_lookup(|key| env.get(key).cloned()).expect("valid test config")
}
