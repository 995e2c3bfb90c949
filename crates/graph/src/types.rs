use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ledgerlink_core::ReceiptFile;

/// The `{"value": [...]}` envelope Graph wraps every listing in.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drive {
    pub id: String,
    pub name: Option<String>,
    pub drive_type: Option<String>,
}

/// A file or folder entry from a drive children listing. Only the fields the
/// portal surfaces are kept; everything else in the payload is dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    pub id: String,
    pub name: String,
    pub size: Option<u64>,
    pub created_date_time: Option<DateTime<Utc>>,
    pub last_modified_date_time: Option<DateTime<Utc>>,
    pub web_url: Option<String>,
    #[serde(rename = "@microsoft.graph.downloadUrl")]
    pub download_url: Option<String>,
    pub file: Option<FileFacet>,
    pub folder: Option<FolderFacet>,
    pub parent_reference: Option<ParentReference>,
    pub created_by: Option<IdentitySet>,
    pub last_modified_by: Option<IdentitySet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFacet {
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderFacet {
    pub child_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    pub drive_id: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySet {
    pub user: Option<Identity>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

impl DriveItem {
    /// Items carrying the `file` facet are files; everything else (folders,
    /// packages) is skipped by the receipts listing.
    pub fn is_file(&self) -> bool {
        self.file.is_some()
    }

    /// Full path of the item within its drive, derived from the parent
    /// reference the way the receipts table displays it: the text after the
    /// `root:` marker, joined with the item name. Graph spells the prefix
    /// `/drive/root:` or `/drives/{id}/root:` depending on how the drive was
    /// addressed.
    pub fn full_path(&self) -> Option<String> {
        let parent = self
            .parent_reference
            .as_ref()
            .and_then(|p| p.path.as_deref())?;
        let folder = match parent.split_once("root:") {
            Some((_, tail)) => tail,
            None => parent,
        };
        if folder.is_empty() {
            Some(self.name.clone())
        } else {
            Some(format!("{folder}/{}", self.name))
        }
    }

    pub fn into_receipt_file(self) -> ReceiptFile {
        let path = self.full_path();
        let mime_type = self.file.and_then(|f| f.mime_type);
        let created_by = self
            .created_by
            .and_then(|set| set.user)
            .and_then(|u| u.display_name);
        let last_modified_by = self
            .last_modified_by
            .and_then(|set| set.user)
            .and_then(|u| u.display_name);

        ReceiptFile {
            id: self.id,
            name: self.name,
            path,
            size: self.size,
            created_date_time: self.created_date_time,
            last_modified_date_time: self.last_modified_date_time,
            web_url: self.web_url,
            download_url: self.download_url,
            mime_type,
            created_by,
            last_modified_by,
        }
    }
}
