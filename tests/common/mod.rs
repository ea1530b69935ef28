//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use hrms_client::api::ApiClient;
use hrms_client::config::{ApiConfig, Config, SessionTokens};
use hrms_client::slices::{spawn_app_store, AppStore};
use serde_json::{json, Value};
use std::net::TcpListener;
use std::path::PathBuf;
use tempfile::TempDir;

use mock_backend::MockBackend;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Config pointing at `base_url` with short timeouts.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api = ApiConfig {
        base_url: base_url.to_string(),
        client_id: "hrms-test".to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 1,
    };
    config
}

/// Client and application store wired to `backend`.
pub fn connect(backend: &MockBackend, tokens: SessionTokens) -> (ApiClient, AppStore) {
    let config = test_config(&backend.base_url());
    let api = ApiClient::new(&config.api, tokens).expect("client");
    (api, spawn_app_store(&config))
}

pub fn bearer(token: &str) -> SessionTokens {
    SessionTokens::new(Some(token.to_string()), None)
}

pub fn user_json(id: u32) -> Value {
    json!({
        "id": id,
        "name": format!("User {id}"),
        "email": format!("user{id}@example.com"),
        "role": "employee",
    })
}

/// `{data, totalCount}` page of users with the given ids.
pub fn users_page(ids: impl IntoIterator<Item = u32>, total: u64) -> Value {
    let data: Vec<Value> = ids.into_iter().map(user_json).collect();
    json!({ "data": data, "totalCount": total })
}

/// Write `content` to a config file inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
