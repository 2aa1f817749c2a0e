//! Test utilities for integration testing (available with `test-utils` feature).

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use axum_test::TestServer;
use rust_decimal::Decimal;

use crate::config::{Config, StoreConfig};
use crate::db::errors::{DbError, Result};
use crate::db::models::{check_ins::CheckInDBResponse, clients::ClientDBResponse};
use crate::store::{InMemoryStore, Store};
use crate::types::ClientId;

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        store: StoreConfig::Memory,
        ..Default::default()
    }
}

/// A test server over the full router, backed by a fresh in-memory store
pub fn create_test_app() -> TestServer {
    create_test_app_with_store(Arc::new(InMemoryStore::new()))
}

pub fn create_test_app_with_store(store: Arc<dyn Store>) -> TestServer {
    crate::Application::with_store(create_test_config(), store).into_test_server()
}

/// A store whose backend is unreachable: every call fails with an internal error
pub struct FailingStore;

fn unavailable() -> DbError {
    DbError::Other(anyhow!("connection refused"))
}

#[async_trait]
impl Store for FailingStore {
    async fn create_client(&self, _name: &str) -> Result<ClientDBResponse> {
        Err(unavailable())
    }

    async fn list_clients(&self) -> Result<Vec<ClientDBResponse>> {
        Err(unavailable())
    }

    async fn get_client(&self, _id: ClientId) -> Result<Option<ClientDBResponse>> {
        Err(unavailable())
    }

    async fn delete_client(&self, _id: ClientId) -> Result<bool> {
        Err(unavailable())
    }

    async fn create_check_in(&self, _client_id: ClientId, _weight_kg: Decimal, _notes: Option<&str>) -> Result<CheckInDBResponse> {
        Err(unavailable())
    }

    async fn list_check_ins(&self, _client_id: ClientId) -> Result<Vec<CheckInDBResponse>> {
        Err(unavailable())
    }

    async fn health(&self) -> Result<()> {
        Err(unavailable())
    }

    async fn close(&self) {}
}

/// A store whose backend never answers: every call hangs until the request is dropped
pub struct StalledStore;

#[async_trait]
impl Store for StalledStore {
    async fn create_client(&self, _name: &str) -> Result<ClientDBResponse> {
        std::future::pending().await
    }

    async fn list_clients(&self) -> Result<Vec<ClientDBResponse>> {
        std::future::pending().await
    }

    async fn get_client(&self, _id: ClientId) -> Result<Option<ClientDBResponse>> {
        std::future::pending().await
    }

    async fn delete_client(&self, _id: ClientId) -> Result<bool> {
        std::future::pending().await
    }

    async fn create_check_in(&self, _client_id: ClientId, _weight_kg: Decimal, _notes: Option<&str>) -> Result<CheckInDBResponse> {
        std::future::pending().await
    }

    async fn list_check_ins(&self, _client_id: ClientId) -> Result<Vec<CheckInDBResponse>> {
        std::future::pending().await
    }

    async fn health(&self) -> Result<()> {
        std::future::pending().await
    }

    async fn close(&self) {}
}
