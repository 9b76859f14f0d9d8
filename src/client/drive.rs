//! Google Drive API client implementation
//!
//! Authenticates with a service account via the OAuth JWT-bearer flow and
//! caches the resulting access token until shortly before expiry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::models::{AccessToken, Folder};
use super::DriveApi;
use crate::config::ServiceAccountKey;
use crate::error::{ApiError, ConfigError, Result};

/// Drive API base URL
const API_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// OAuth scope requested for folder provisioning
const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// MIME type marking a Drive file as a folder
const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Google Drive API client
pub struct DriveClient {
    http: HttpClient,
    base_url: String,
    key: ServiceAccountKey,
    token: Arc<RwLock<Option<AccessToken>>>,
}

/// JWT claims for the service-account assertion
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Escape a value for interpolation into a Drive `q` search expression.
///
/// Backslashes must be escaped before quotes or the quote escape itself
/// would be re-escaped.
fn escape_query(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

impl DriveClient {
    /// Create a client from a service account key.
    pub fn new(key: ServiceAccountKey) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
            key,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Create a client from `GOOGLE_SERVICE_ACCOUNT_JSON`.
    pub fn from_env() -> Result<Self> {
        Self::new(ServiceAccountKey::from_env()?)
    }

    /// Override the API base URL (for tests against a local mock server).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Seed the token cache, bypassing the token exchange.
    #[allow(dead_code)]
    pub async fn set_token(&self, token: AccessToken) {
        *self.token.write().await = Some(token);
    }

    /// Exchange a signed assertion for an access token.
    async fn authenticate(&self) -> Result<AccessToken> {
        let now = Utc::now();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: DRIVE_SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(1)).timestamp(),
        };

        let signing_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| ConfigError::InvalidCredentials(e.to_string()))?;
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
            .map_err(|e| ConfigError::InvalidCredentials(e.to_string()))?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized.into());
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Token exchange failed: {}", status));
            return Err(ApiError::ServerError(body).into());
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse token response: {}", e))
        })?;

        Ok(AccessToken {
            token: token.access_token,
            expires_at: now + chrono::Duration::seconds(token.expires_in),
        })
    }

    /// Get a cached access token, refreshing if expired or missing.
    async fn get_valid_token(&self) -> Result<String> {
        {
            let token = self.token.read().await;
            if let Some(t) = token.as_ref() {
                if !t.is_expired() {
                    return Ok(t.token.clone());
                }
            }
        }

        let fresh = self.authenticate().await?;
        let value = fresh.token.clone();
        *self.token.write().await = Some(fresh);
        Ok(value)
    }

    /// Send an authenticated request, re-authenticating once on a 401.
    async fn execute<T, F>(&self, build: F) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
        F: Fn(&HttpClient, &str, &str) -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let token = self.get_valid_token().await?;
            let response = build(&self.http, &self.base_url, &token)
                .send()
                .await
                .map_err(ApiError::from)?;

            if response.status() == StatusCode::UNAUTHORIZED && attempt == 0 {
                // Token may have been revoked; drop it and retry once
                *self.token.write().await = None;
                attempt += 1;
                continue;
            }

            return handle_response(response).await;
        }
    }
}

/// Map a Drive API response to a typed result or an [`ApiError`].
async fn handle_response<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    match status {
        StatusCode::OK => {
            let data = response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
            Ok(data)
        }
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
        StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
        StatusCode::NOT_FOUND => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Resource not found".to_string());
            Err(ApiError::NotFound(error_msg).into())
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Bad request".to_string());
            Err(ApiError::BadRequest(error_msg).into())
        }
        status if status.is_server_error() => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Server error: {}", status));
            Err(ApiError::ServerError(error_msg).into())
        }
        _ => {
            let error_msg = format!("Unexpected status code: {}", status);
            Err(ApiError::InvalidResponse(error_msg).into())
        }
    }
}

#[async_trait]
impl DriveApi for DriveClient {
    async fn folder_exists(&self, name: &str, parent_id: &str) -> Result<bool> {
        #[derive(Deserialize)]
        struct FileList {
            #[serde(default)]
            files: Vec<Folder>,
        }

        let query = format!(
            "name = '{}' and '{}' in parents and mimeType = '{}' and trashed = false",
            escape_query(name),
            escape_query(parent_id),
            FOLDER_MIME_TYPE
        );

        log::debug!("Checking for existing folder '{}' under {}", name, parent_id);

        let list: FileList = self
            .execute(|http, base, token| {
                http.get(format!("{}/files", base))
                    .bearer_auth(token)
                    .query(&[
                        ("q", query.as_str()),
                        ("corpora", "allDrives"),
                        ("includeItemsFromAllDrives", "true"),
                        ("supportsAllDrives", "true"),
                        ("fields", "files(id)"),
                        ("pageSize", "1"),
                    ])
            })
            .await?;

        Ok(!list.files.is_empty())
    }

    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<Folder> {
        let mut metadata = serde_json::json!({
            "name": name,
            "mimeType": FOLDER_MIME_TYPE,
        });
        if let Some(parent) = parent_id {
            metadata["parents"] = serde_json::json!([parent]);
        }

        let folder: Folder = self
            .execute(|http, base, token| {
                http.post(format!("{}/files", base))
                    .bearer_auth(token)
                    .query(&[
                        ("fields", "id,webViewLink"),
                        ("supportsAllDrives", "true"),
                    ])
                    .json(&metadata)
            })
            .await?;

        log::debug!("Created folder '{}' with ID: {}", name, folder.id);
        Ok(folder)
    }
}
