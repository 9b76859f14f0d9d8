//! Mock Drive API client for testing
//!
//! Implements [`DriveApi`] without any network access. Expected responses
//! and failures are configured with builder methods; calls are recorded for
//! assertion.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::models::Folder;
use super::DriveApi;
use crate::error::{ApiError, Result};

/// Mock Drive client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockDriveClient::new().with_existing("Acme").await;
/// assert!(mock.folder_exists("Acme", "drive123").await?);
/// ```
pub struct MockDriveClient {
    /// Folder names reported as already existing by folder_exists
    existing: Arc<Mutex<Vec<String>>>,
    /// Folders created so far, in call order
    created: Arc<Mutex<Vec<CreatedFolder>>>,
    /// One-shot error returned by the next call
    error: Arc<Mutex<Option<ApiError>>>,
    /// Fail the Nth create_folder call (1-based)
    fail_create_at: Arc<Mutex<Option<usize>>>,
    /// Call counters for verification
    call_count: Arc<Mutex<CallCounts>>,
}

/// A create_folder call captured by the mock
#[derive(Debug, Clone)]
pub struct CreatedFolder {
    pub name: String,
    pub parent_id: Option<String>,
    /// ID the mock assigned to the new folder
    pub id: String,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub folder_exists: usize,
    pub create_folder: usize,
}

impl Default for MockDriveClient {
    fn default() -> Self {
        Self {
            existing: Arc::new(Mutex::new(Vec::new())),
            created: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
            fail_create_at: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
        }
    }
}

impl MockDriveClient {
    /// Create a new mock with no existing folders and no failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a folder name as already present under any parent.
    pub async fn with_existing(self, name: &str) -> Self {
        self.existing.lock().await.push(name.to_string());
        self
    }

    /// Configure an error to return on the next API call (consumed on use).
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Fail the Nth create_folder call (1-based) with a server error.
    pub async fn fail_create_at(self, nth: usize) -> Self {
        *self.fail_create_at.lock().await = Some(nth);
        self
    }

    /// Get call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get the folders created so far, in call order.
    pub async fn created(&self) -> Vec<CreatedFolder> {
        self.created.lock().await.clone()
    }

    /// Consume the pending one-shot error if present.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl DriveApi for MockDriveClient {
    async fn folder_exists(&self, name: &str, _parent_id: &str) -> Result<bool> {
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.folder_exists += 1;
        drop(counts);

        Ok(self.existing.lock().await.iter().any(|n| n == name))
    }

    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<Folder> {
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.create_folder += 1;
        let call_number = counts.create_folder;
        drop(counts);

        if let Some(nth) = *self.fail_create_at.lock().await {
            if call_number == nth {
                return Err(ApiError::ServerError(format!(
                    "Simulated failure creating '{}'",
                    name
                ))
                .into());
            }
        }

        let mut created = self.created.lock().await;
        let id = format!("mock-folder-{}", created.len() + 1);
        created.push(CreatedFolder {
            name: name.to_string(),
            parent_id: parent_id.map(|s| s.to_string()),
            id: id.clone(),
        });

        Ok(Folder {
            id: id.clone(),
            web_view_link: Some(format!("https://drive.google.com/drive/folders/{}", id)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_has_no_folders() {
        let mock = MockDriveClient::new();
        assert!(!mock.folder_exists("Acme", "drive123").await.unwrap());
        assert!(mock.created().await.is_empty());
    }

    #[tokio::test]
    async fn test_mock_with_existing() {
        let mock = MockDriveClient::new().with_existing("Acme").await;
        assert!(mock.folder_exists("Acme", "drive123").await.unwrap());
        assert!(!mock.folder_exists("Other", "drive123").await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_create_assigns_sequential_ids() {
        let mock = MockDriveClient::new();

        let first = mock.create_folder("A", None).await.unwrap();
        let second = mock.create_folder("B", Some(&first.id)).await.unwrap();

        assert_eq!(first.id, "mock-folder-1");
        assert_eq!(second.id, "mock-folder-2");

        let created = mock.created().await;
        assert_eq!(created.len(), 2);
        assert_eq!(created[1].parent_id.as_deref(), Some("mock-folder-1"));
    }

    #[tokio::test]
    async fn test_mock_one_shot_error() {
        let mock = MockDriveClient::new()
            .with_error(ApiError::Unauthorized)
            .await;

        assert!(mock.folder_exists("Acme", "d").await.is_err());
        // Error is consumed, next call succeeds
        assert!(mock.folder_exists("Acme", "d").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_fail_create_at() {
        let mock = MockDriveClient::new().fail_create_at(2).await;

        assert!(mock.create_folder("A", None).await.is_ok());
        assert!(mock.create_folder("B", None).await.is_err());
        // Later calls succeed again
        assert!(mock.create_folder("C", None).await.is_ok());

        let counts = mock.call_counts().await;
        assert_eq!(counts.create_folder, 3);
        // The failed call left nothing behind
        assert_eq!(mock.created().await.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_call_counts() {
        let mock = MockDriveClient::new();

        mock.folder_exists("A", "d").await.unwrap();
        mock.folder_exists("B", "d").await.unwrap();
        mock.create_folder("A", None).await.unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.folder_exists, 2);
        assert_eq!(counts.create_folder, 1);
    }
}
