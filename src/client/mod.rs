//! Google Drive API client
//!
//! The orchestrator only needs two Drive capabilities, so the seam is a small
//! trait implemented by the real [`DriveClient`] and, under test, by
//! [`MockDriveClient`].

use async_trait::async_trait;

use crate::error::Result;

pub mod drive;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use drive::DriveClient;
#[cfg(test)]
pub use mock::MockDriveClient;
#[allow(unused_imports)]
pub use models::{AccessToken, Folder};

/// Drive operations consumed by the provisioning pipeline
#[async_trait]
pub trait DriveApi: Send + Sync {
    /// Check whether a non-trashed folder with exactly this name exists
    /// directly under the given parent, searching across all shared drives.
    async fn folder_exists(&self, name: &str, parent_id: &str) -> Result<bool>;

    /// Create a folder, optionally parented. Returns the new folder's ID and
    /// user-facing link. Not idempotent: two calls create two folders.
    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<Folder>;
}
