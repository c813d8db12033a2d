//! Test helpers: build the intake service and router for integration tests.
//!
//! Storage is an in-memory object store behind the S3 backend, so keys, URLs
//! and object attributes are exercised exactly as in production.

#![allow(dead_code)]

pub mod email;
pub mod fixtures;
pub mod storage;

use axum_test::TestServer;
use intake_api::setup::routes;
use intake_api::{AppState, IntakeService, Notifier};
use intake_core::Config;
use intake_storage::{LocalStorage, S3Storage, Storage, StorageWriter};
use object_store::memory::InMemory;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

pub use email::ScriptedEmailChannel;
pub use storage::{FailingStorage, RecordingStorage};

pub const TEST_API_KEY: &str = "integration-test-key";
pub const TEST_BUCKET: &str = "intake-test";
pub const EMAIL_FROM: &str = "intake@example.com";
pub const EMAIL_TO: &str = "ops@example.com";
pub const EMAIL_SUBJECT: &str = "New Quote Submission Received";
pub const LOCAL_BASE_URL: &str = "http://localhost:4000/files";

/// Test application: service, router and the doubles behind them.
pub struct TestApp {
    pub state: Arc<AppState>,
    pub memory: Arc<InMemory>,
    pub storage: Arc<RecordingStorage>,
    pub email: Arc<ScriptedEmailChannel>,
}

impl TestApp {
    pub fn service(&self) -> &IntakeService {
        &self.state.intake
    }

    pub fn server(&self) -> TestServer {
        self.server_with_limit(self.state.config.max_body_size_bytes())
    }

    pub fn server_with_limit(&self, max_body_size_bytes: usize) -> TestServer {
        server_for(self.state.clone(), max_body_size_bytes)
    }
}

pub fn server_for(state: Arc<AppState>, max_body_size_bytes: usize) -> TestServer {
    let app = routes::build_router(state, max_body_size_bytes);
    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}

pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("API_KEY", TEST_API_KEY),
        ("S3_BUCKET", TEST_BUCKET),
        ("EMAIL_FROM", EMAIL_FROM),
        ("EMAIL_TO", EMAIL_TO),
    ]);
    Config::from_vars(|key| vars.get(key).map(|v| v.to_string())).expect("test config")
}

/// App backed by in-memory S3 storage and a healthy email channel.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with_email(ScriptedEmailChannel::healthy())
}

pub fn setup_test_app_with_email(email: ScriptedEmailChannel) -> TestApp {
    let memory = Arc::new(InMemory::new());
    let s3: Arc<dyn Storage> = Arc::new(S3Storage::with_store(memory.clone(), TEST_BUCKET.to_string()));
    let storage = Arc::new(RecordingStorage::new(s3));
    let email = Arc::new(email);

    let state = build_state(storage.clone(), email.clone());

    TestApp {
        state,
        memory,
        storage,
        email,
    }
}

/// App backed by local filesystem storage in a fresh temporary directory.
/// The directory is removed when the returned `TempDir` drops.
pub async fn setup_local_app() -> (Arc<AppState>, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let local = LocalStorage::new(dir.path(), LOCAL_BASE_URL.to_string())
        .await
        .expect("Failed to create local storage");
    let state = build_state(Arc::new(local), Arc::new(ScriptedEmailChannel::healthy()));
    (state, dir)
}

/// Service whose storage fails every write.
pub fn setup_failing_app() -> (Arc<AppState>, Arc<FailingStorage>, Arc<ScriptedEmailChannel>) {
    let storage = Arc::new(FailingStorage::default());
    let email = Arc::new(ScriptedEmailChannel::healthy());
    (build_state(storage.clone(), email.clone()), storage, email)
}

fn build_state(storage: Arc<dyn Storage>, email: Arc<ScriptedEmailChannel>) -> Arc<AppState> {
    let config = test_config();
    let notifier = Notifier::new(
        email,
        EMAIL_FROM,
        vec![EMAIL_TO.to_string()],
        EMAIL_SUBJECT,
    );
    let intake = IntakeService::new(config.api_key(), StorageWriter::new(storage), notifier);
    AppState::new(config, intake)
}
