use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
};

use crate::{
    AppState,
    api::{
        extractors::{ApiJson, ClientPath},
        models::clients::{ClientCreate, ClientResponse},
    },
    errors::{Error, Result},
};

#[tracing::instrument(skip_all)]
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<ClientResponse>>> {
    let clients = state.store.list_clients().await?;
    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

#[tracing::instrument(skip_all)]
pub async fn create_client(
    State(state): State<AppState>,
    ApiJson(create): ApiJson<ClientCreate>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<ClientResponse>)> {
    let client = state.store.create_client(create.name.as_deref().unwrap_or_default()).await?;
    let location = format!("/clients/{}", client.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ClientResponse::from(client.with_check_ins(vec![]))),
    ))
}

#[tracing::instrument(skip_all, fields(client_id = %client_id))]
pub async fn get_client(State(state): State<AppState>, ClientPath(client_id): ClientPath) -> Result<Json<ClientResponse>> {
    match state.store.get_client(client_id).await? {
        Some(client) => Ok(Json(ClientResponse::from(client))),
        None => Err(Error::client_not_found(client_id)),
    }
}

#[tracing::instrument(skip_all, fields(client_id = %client_id))]
pub async fn delete_client(State(state): State<AppState>, ClientPath(client_id): ClientPath) -> Result<StatusCode> {
    if state.store.delete_client(client_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::client_not_found(client_id))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        api::models::{check_ins::CheckInResponse, clients::ClientResponse},
        errors::ErrorBody,
        test_utils::*,
    };
    use axum::http::StatusCode;
    use serde_json::json;
    use uuid::Uuid;

    #[test_log::test(tokio::test)]
    async fn test_create_client_returns_location_and_empty_check_ins() {
        let server = create_test_app();

        let response = server.post("/clients").json(&json!({"name": "  Alice  "})).await;

        response.assert_status(StatusCode::CREATED);
        let client: ClientResponse = response.json();
        assert_eq!(client.name, "Alice");
        assert_eq!(client.check_ins, Some(vec![]));
        assert_eq!(response.header("location"), format!("/clients/{}", client.id));
    }

    #[test_log::test(tokio::test)]
    async fn test_create_client_requires_a_name() {
        let server = create_test_app();

        for body in [json!({"name": "   "}), json!({"name": ""}), json!({}), json!({"name": null})] {
            let response = server.post("/clients").json(&body).await;

            response.assert_status(StatusCode::BAD_REQUEST);
            assert_eq!(response.json::<ErrorBody>().error, "Name is required.");
        }

        // Nothing was stored
        let clients: Vec<ClientResponse> = server.get("/clients").await.json();
        assert!(clients.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_create_client_rejects_malformed_json() {
        let server = create_test_app();

        let response = server.post("/clients").text("{not json").content_type("application/json").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(!response.json::<ErrorBody>().error.is_empty());

        // Right shape, wrong content type
        let response = server.post("/clients").text(r#"{"name": "Alice"}"#).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(!response.json::<ErrorBody>().error.is_empty());

        let response = server.post("/clients").json(&json!({"name": 42})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(!response.json::<ErrorBody>().error.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_list_clients_newest_first_without_check_ins() {
        let server = create_test_app();

        let first: ClientResponse = server.post("/clients").json(&json!({"name": "First"})).await.json();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second: ClientResponse = server.post("/clients").json(&json!({"name": "Second"})).await.json();

        let response = server.get("/clients").await;
        response.assert_status_ok();

        let listed: Vec<serde_json::Value> = response.json();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["id"], json!(second.id));
        assert_eq!(listed[1]["id"], json!(first.id));
        assert!(listed.iter().all(|c| c.get("check_ins").is_none()));
    }

    #[test_log::test(tokio::test)]
    async fn test_get_client_includes_check_ins() {
        let server = create_test_app();
        let client: ClientResponse = server.post("/clients").json(&json!({"name": "Alice"})).await.json();
        let check_in: CheckInResponse = server
            .post(&format!("/clients/{}/checkins", client.id))
            .json(&json!({"weight_kg": 70.5}))
            .await
            .json();

        let response = server.get(&format!("/clients/{}", client.id)).await;

        response.assert_status_ok();
        let fetched: ClientResponse = response.json();
        assert_eq!(fetched.id, client.id);
        assert_eq!(fetched.start_date, client.start_date);
        assert_eq!(fetched.check_ins, Some(vec![check_in]));
    }

    #[test_log::test(tokio::test)]
    async fn test_unknown_client_is_not_found() {
        let server = create_test_app();
        let missing = Uuid::new_v4();

        for path in [format!("/clients/{missing}"), "/clients/not-a-uuid".to_string(), "/clients/123".to_string()] {
            let response = server.get(&path).await;
            response.assert_status(StatusCode::NOT_FOUND);
            response.assert_json(&json!({"error": "Client not found."}));

            let response = server.delete(&path).await;
            response.assert_status(StatusCode::NOT_FOUND);
            response.assert_json(&json!({"error": "Client not found."}));
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_client_then_gone() {
        let server = create_test_app();
        let client: ClientResponse = server.post("/clients").json(&json!({"name": "Alice"})).await.json();
        let path = format!("/clients/{}", client.id);

        let response = server.delete(&path).await;
        response.assert_status(StatusCode::NO_CONTENT);
        assert!(response.as_bytes().is_empty());

        server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
        server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
    }

    #[test_log::test(tokio::test)]
    async fn test_store_failure_is_internal_error() {
        let server = create_test_app_with_store(std::sync::Arc::new(FailingStore));

        let response = server.get("/clients").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({"error": "Internal server error"}));
    }
}
