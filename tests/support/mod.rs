//! Shared helpers for integration tests.

pub mod socket_guard;

use tms_client::{ClientConfig, TmsClient};
use wiremock::MockServer;

/// Project identifier used by every mock-backed client.
pub const PROJECT: &str = "demo";

/// Project API key used by every mock-backed client.
pub const API_KEY: &str = "test-api-key-0f3a";

/// Installs a test log writer once; honours `RUST_LOG`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Client with a project API key, pointed at `server`.
pub fn key_client(server: &MockServer) -> TmsClient {
    init_tracing();
    let config = ClientConfig::builder()
        .base_url(server.uri())
        .api_key(API_KEY)
        .project_id(PROJECT)
        .build()
        .expect("valid test config");
    TmsClient::new(config).expect("client builds")
}

/// Client with account credentials, pointed at `server`.
#[allow(dead_code)]
pub fn account_client(server: &MockServer) -> TmsClient {
    init_tracing();
    let config = ClientConfig::builder()
        .base_url(server.uri())
        .account("translator", "acct-key-77")
        .project_id(PROJECT)
        .build()
        .expect("valid test config");
    TmsClient::new(config).expect("client builds")
}
