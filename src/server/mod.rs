//! HTTP adapter
//!
//! Serves `POST /` with a JSON body of `{"organizationName": ...}`, mapping
//! the provisioning result to the same status codes as the event adapter.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use serde_json::{Value, json};

use crate::client::{DriveApi, DriveClient};
use crate::config::Config;
use crate::provision::create_org_structure;

/// Shared state for the HTTP server.
///
/// Both fields default to `None`, which makes handlers resolve the drive ID
/// and credentials from the environment on every request; tests inject a
/// drive ID and a mock client instead.
#[derive(Clone, Default)]
pub struct AppState {
    /// Destination drive ID override
    pub drive_id: Option<String>,
    /// Drive client override
    pub client: Option<Arc<dyn DriveApi>>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(create_org_handler))
        .with_state(state)
}

/// Run the HTTP server until the process is killed.
pub async fn serve(port: u16) -> crate::error::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(AppState::default())).await?;
    Ok(())
}

/// Handler for `POST /`.
async fn create_org_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let payload = payload.ok().map(|Json(value)| value);
    respond(&state, payload).await
}

/// Request/response mapping, separated from the axum extractors so it can be
/// exercised directly in tests. `None` means the body was not valid JSON.
async fn respond(state: &AppState, payload: Option<Value>) -> (StatusCode, Json<Value>) {
    let drive_id = match &state.drive_id {
        Some(id) => id.clone(),
        None => match Config::from_env() {
            Ok(config) => config.shared_drive_id,
            Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
        },
    };

    let Some(payload) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid JSON payload");
    };

    let Some(org_name) = payload
        .get("organizationName")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
    else {
        return error_response(StatusCode::BAD_REQUEST, "Missing 'organizationName' in payload");
    };

    let client: Arc<dyn DriveApi> = match &state.client {
        Some(client) => Arc::clone(client),
        None => match DriveClient::from_env() {
            Ok(client) => Arc::new(client),
            Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
        },
    };

    match create_org_structure(client.as_ref(), org_name, &drive_id).await {
        Ok(structure) => match serde_json::to_value(&structure) {
            Ok(body) => (StatusCode::OK, Json(body)),
            Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
        },
        Err(e) => {
            log::error!("Provisioning failed for '{}': {}", org_name, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}
