//! Organization folder provisioning
//!
//! The one pipeline this service exists for: sanitize the organization name,
//! refuse duplicates, create the top-level folder, then lay down the fixed
//! subfolder set beneath it.

use serde::Serialize;

use crate::client::DriveApi;
use crate::error::{Error, Result};
use crate::sanitize::sanitize;

/// Fixed subfolders created under every organization folder, in order.
///
/// "Sales/Pre-sales" is one literal folder name, not a nested path; only the
/// organization name gets sanitized.
pub const SUBFOLDERS: [&str; 4] = [
    "Sales/Pre-sales",
    "Onboarding",
    "Post Onboarding",
    "Legal Notices",
];

/// The top-level folder's identity, returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct OrgStructure {
    /// Drive file ID of the organization folder
    pub id: String,

    /// User-facing link to the organization folder
    pub url: Option<String>,
}

/// Create the folder structure for an organization under the given shared
/// drive.
///
/// Fails with [`Error::DuplicateOrganization`] when a folder with the
/// sanitized name already exists under the parent, before any folder is
/// created. A failure partway through subfolder creation propagates as-is
/// and leaves the partial structure in place; there is no rollback.
pub async fn create_org_structure(
    client: &dyn DriveApi,
    org_name: &str,
    parent_drive_id: &str,
) -> Result<OrgStructure> {
    let clean_name = sanitize(org_name);

    if client.folder_exists(&clean_name, parent_drive_id).await? {
        log::warn!(
            "Organization folder '{}' already exists under {}",
            clean_name,
            parent_drive_id
        );
        return Err(Error::DuplicateOrganization(clean_name));
    }

    log::info!("Creating top-level folder for organization: {}", clean_name);
    let org_folder = client
        .create_folder(&clean_name, Some(parent_drive_id))
        .await?;

    for folder_name in SUBFOLDERS {
        log::info!("Creating subfolder '{}' under {}", folder_name, org_folder.id);
        client.create_folder(folder_name, Some(&org_folder.id)).await?;
    }

    Ok(OrgStructure {
        id: org_folder.id,
        url: org_folder.web_view_link,
    })
}
