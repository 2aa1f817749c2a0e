use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
};
use rust_decimal::Decimal;

use crate::{
    AppState,
    api::{
        extractors::{ApiJson, ClientPath},
        models::check_ins::{CheckInCreate, CheckInResponse},
    },
    db::errors::DbError,
    errors::{Error, Result},
    types::ClientId,
};

/// Report a store `NotFound` as the client in the path being missing
fn client_not_found(client_id: ClientId) -> impl FnOnce(DbError) -> Error {
    move |err| match err {
        DbError::NotFound => Error::client_not_found(client_id),
        other => Error::Database(other),
    }
}

#[tracing::instrument(skip_all, fields(client_id = %client_id))]
pub async fn create_check_in(
    State(state): State<AppState>,
    ClientPath(client_id): ClientPath,
    ApiJson(create): ApiJson<CheckInCreate>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<CheckInResponse>)> {
    let check_in = state
        .store
        .create_check_in(client_id, create.weight_kg.unwrap_or(Decimal::ZERO), create.notes.as_deref())
        .await
        .map_err(client_not_found(client_id))?;
    let location = format!("/clients/{}/checkins/{}", client_id, check_in.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(CheckInResponse::from(check_in))))
}

#[tracing::instrument(skip_all, fields(client_id = %client_id))]
pub async fn list_check_ins(State(state): State<AppState>, ClientPath(client_id): ClientPath) -> Result<Json<Vec<CheckInResponse>>> {
    let check_ins = state.store.list_check_ins(client_id).await.map_err(client_not_found(client_id))?;
    Ok(Json(check_ins.into_iter().map(CheckInResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use crate::{
        api::models::{check_ins::CheckInResponse, clients::ClientResponse},
        errors::ErrorBody,
        test_utils::*,
    };
    use axum::http::StatusCode;
    use rust_decimal::Decimal;
    use serde_json::json;
    use uuid::Uuid;

    async fn create_client(server: &axum_test::TestServer, name: &str) -> ClientResponse {
        let response = server.post("/clients").json(&json!({ "name": name })).await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    #[test_log::test(tokio::test)]
    async fn test_alice_scenario() {
        let server = create_test_app();

        let response = server.post("/clients").json(&json!({"name": "Alice"})).await;
        response.assert_status(StatusCode::CREATED);
        let alice: ClientResponse = response.json();

        let response = server
            .post(&format!("/clients/{}/checkins", alice.id))
            .json(&json!({"weight_kg": 70.5, "notes": "felt great"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let check_in: CheckInResponse = response.json();
        assert_eq!(
            response.header("location"),
            format!("/clients/{}/checkins/{}", alice.id, check_in.id)
        );

        let response = server.get(&format!("/clients/{}", alice.id)).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["check_ins"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["check_ins"][0]["weight_kg"], json!(70.5));
        assert_eq!(body["check_ins"][0]["notes"], json!("felt great"));

        server
            .delete(&format!("/clients/{}", alice.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let response = server.get(&format!("/clients/{}/checkins", alice.id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({"error": "Client not found."}));
    }

    #[test_log::test(tokio::test)]
    async fn test_check_in_json_shape() {
        let server = create_test_app();
        let alice = create_client(&server, "Alice").await;

        let response = server
            .post(&format!("/clients/{}/checkins", alice.id))
            .json(&json!({"weight_kg": 82}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["client_id", "date", "id", "notes", "weight_kg"]);
        assert_eq!(body["client_id"], json!(alice.id));
        assert_eq!(body["weight_kg"], json!(82.0));
        assert_eq!(body["notes"], json!(null));
    }

    #[test_log::test(tokio::test)]
    async fn test_invalid_weights_are_bad_requests() {
        let server = create_test_app();
        let alice = create_client(&server, "Alice").await;
        let path = format!("/clients/{}/checkins", alice.id);

        for body in [
            json!({"weight_kg": 0}),
            json!({"weight_kg": -3.5}),
            json!({"weight_kg": 0.001}),
            json!({"notes": "forgot to weigh in"}),
        ] {
            let response = server.post(&path).json(&body).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            response.assert_json(&json!({"error": "weight_kg must be > 0."}));
        }

        let response = server.post(&path).json(&json!({"weight_kg": 1000})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"error": "weight_kg must be at most 999.99."}));

        let response = server.post(&path).json(&json!({"weight_kg": "heavy"})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(!response.json::<ErrorBody>().error.is_empty());

        let check_ins: Vec<CheckInResponse> = server.get(&path).await.json();
        assert!(check_ins.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_weight_is_rounded_and_blank_notes_dropped() {
        let server = create_test_app();
        let alice = create_client(&server, "Alice").await;

        let response = server
            .post(&format!("/clients/{}/checkins", alice.id))
            .json(&json!({"weight_kg": 70.125, "notes": "   "}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let check_in: CheckInResponse = response.json();
        assert_eq!(check_in.weight_kg, Decimal::new(7013, 2));
        assert_eq!(check_in.notes, None);
    }

    #[test_log::test(tokio::test)]
    async fn test_check_ins_for_unknown_client() {
        let server = create_test_app();
        let missing = Uuid::new_v4();

        for path in [format!("/clients/{missing}/checkins"), "/clients/not-a-uuid/checkins".to_string()] {
            // Missing client wins over an invalid weight
            let response = server.post(&path).json(&json!({"weight_kg": -1})).await;
            response.assert_status(StatusCode::NOT_FOUND);
            response.assert_json(&json!({"error": "Client not found."}));

            let response = server.get(&path).await;
            response.assert_status(StatusCode::NOT_FOUND);
            response.assert_json(&json!({"error": "Client not found."}));
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_list_check_ins_newest_first() {
        let server = create_test_app();
        let alice = create_client(&server, "Alice").await;
        let path = format!("/clients/{}/checkins", alice.id);

        let mut created = Vec::new();
        for weight in [71.0, 70.5, 70.1] {
            let check_in: CheckInResponse = server.post(&path).json(&json!({ "weight_kg": weight })).await.json();
            created.push(check_in);
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        created.reverse();

        let response = server.get(&path).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<CheckInResponse>>(), created);
    }
}
