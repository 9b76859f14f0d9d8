//! Event-trigger adapter
//!
//! Lambda-style entry point: takes a raw JSON event, provisions the folder
//! structure, and returns a `{statusCode, body}` envelope where `body` is
//! itself a JSON-encoded string.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::client::{DriveApi, DriveClient};
use crate::config::Config;
use crate::provision::create_org_structure;

/// Response envelope returned to the event source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl EventResponse {
    fn ok(body: &impl Serialize) -> Self {
        Self {
            status_code: 200,
            body: serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string()),
        }
    }

    fn error(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: json!({ "error": message }).to_string(),
        }
    }
}

/// Handle one event end-to-end, resolving configuration and credentials from
/// the environment.
pub async fn handle_event(event: Value) -> EventResponse {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => return EventResponse::error(500, &e.to_string()),
    };

    let Some(org_name) = organization_name(&event) else {
        return EventResponse::error(400, "Missing 'organizationName' in payload");
    };

    let client = match DriveClient::from_env() {
        Ok(client) => client,
        Err(e) => return EventResponse::error(500, &e.to_string()),
    };

    provision_response(&client, &org_name, &config.shared_drive_id).await
}

/// Same event mapping against an injected client and drive ID.
pub async fn handle_event_with(
    client: &dyn DriveApi,
    drive_id: &str,
    event: &Value,
) -> EventResponse {
    let Some(org_name) = organization_name(event) else {
        return EventResponse::error(400, "Missing 'organizationName' in payload");
    };

    provision_response(client, &org_name, drive_id).await
}

async fn provision_response(client: &dyn DriveApi, org_name: &str, drive_id: &str) -> EventResponse {
    match create_org_structure(client, org_name, drive_id).await {
        Ok(structure) => EventResponse::ok(&structure),
        Err(e) => {
            log::error!("Provisioning failed for '{}': {}", org_name, e);
            // Duplicates and remote failures share the same envelope shape
            EventResponse::error(500, &e.to_string())
        }
    }
}

/// Pull `organizationName` out of the event payload.
///
/// API Gateway wraps the caller's JSON under a `body` key, usually as a
/// string; direct invocations pass the payload as the event itself.
fn organization_name(event: &Value) -> Option<String> {
    let payload = match event.get("body") {
        Some(Value::String(raw)) => serde_json::from_str(raw).unwrap_or(Value::Null),
        Some(body) => body.clone(),
        None => event.clone(),
    };

    payload
        .get("organizationName")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
}
