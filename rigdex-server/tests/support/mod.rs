#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Result, anyhow};
use axum_test::TestServer;
use serde_json::{Value, json};

use rigdex_core::CatalogUnitOfWork;
use rigdex_core::api_routes::utils;
use rigdex_server::{
    AppState, create_app,
    infra::config::{
        Config, ConfigMetadata, CorsConfig, DatabaseConfig, ServerConfig,
    },
};

#[derive(Debug)]
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig::default(),
        cors: CorsConfig::default(),
        dev_mode: true,
        metadata: ConfigMetadata::default(),
    }
}

pub fn build_test_app() -> Result<TestApp> {
    build_test_app_with(CatalogUnitOfWork::in_memory())
}

pub fn build_test_app_with(unit_of_work: CatalogUnitOfWork) -> Result<TestApp> {
    let state =
        AppState::new(Arc::new(unit_of_work), Arc::new(test_config()));
    let server = TestServer::new(create_app(state.clone()))
        .map_err(|err| anyhow!(err.to_string()))?;
    Ok(TestApp { server, state })
}

/// POST `{"name": name}` to a named resource and return the created body.
pub async fn create_named(server: &TestServer, segment: &str, name: &str) -> Value {
    let response = server
        .post(&utils::collection(segment))
        .json(&json!({ "name": name }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

pub fn id_of(body: &Value) -> String {
    body["id"].as_str().unwrap_or_default().to_string()
}
