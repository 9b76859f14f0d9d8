//! Drive API data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A folder returned by a create or lookup call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Opaque Drive file ID
    pub id: String,

    /// User-facing link to the folder (not returned by every endpoint)
    #[serde(rename = "webViewLink", skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
}

/// OAuth access token obtained via the JWT-bearer flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The bearer token string
    pub token: String,

    /// Token expiration time
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// True when the token is expired or expires within the next 5 minutes.
    pub fn is_expired(&self) -> bool {
        let buffer = chrono::Duration::minutes(5);
        self.expires_at - buffer < Utc::now()
    }
}
