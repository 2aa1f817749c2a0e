use axum::{Json, extract::State};

use crate::{AppState, api::models::health::HealthResponse, errors::Result};

/// Plain-text banner served at `/`
pub const BANNER: &str = "CoachTrack API is running.";

pub async fn root() -> &'static str {
    BANNER
}

/// Liveness probe. Fails with a 500 if the store can't be reached.
#[tracing::instrument(skip_all)]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    state.store.health().await?;
    Ok(Json(HealthResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FailingStore, create_test_app, create_test_app_with_store};
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    #[test_log::test(tokio::test)]
    async fn test_root_banner() {
        let server = create_test_app();

        let response = server.get("/").await;

        response.assert_status_ok();
        response.assert_text(BANNER);
    }

    #[test_log::test(tokio::test)]
    async fn test_health_reports_ok() {
        let server = create_test_app();

        let response = server.get("/health").await;

        response.assert_status_ok();
        assert_eq!(response.json::<HealthResponse>(), HealthResponse::ok());
    }

    #[test_log::test(tokio::test)]
    async fn test_health_fails_when_store_is_unreachable() {
        let server = create_test_app_with_store(Arc::new(FailingStore));

        let response = server.get("/health").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({"error": "Internal server error"}));

        // The banner doesn't touch the store
        server.get("/").await.assert_status_ok();
    }
}
