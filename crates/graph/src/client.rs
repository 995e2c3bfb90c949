use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use ledgerlink_core::ReceiptFile;

use crate::types::{Collection, Drive, DriveItem};

pub const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Fields requested for the receipts listing, matching what the receipts
/// table renders and nothing more.
const RECEIPT_SELECT: &str = "id,name,size,createdDateTime,lastModifiedDateTime,webUrl,file,createdBy,lastModifiedBy,parentReference,@microsoft.graph.downloadUrl";

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("transport error calling Microsoft Graph: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Microsoft Graph returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl GraphError {
    /// True when the access token was rejected. The caller should clear its
    /// session and ask the user to sign in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            GraphError::Api {
                status: StatusCode::UNAUTHORIZED,
                ..
            }
        )
    }
}

/// Client for the Microsoft Graph drive endpoints. Tokens are acquired
/// elsewhere and passed per call, so one client serves every user.
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    base_url: String,
}

impl GraphClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        GraphClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        access_token: &str,
        path_and_query: &str,
    ) -> Result<T, GraphError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        tracing::debug!(%url, "graph request");

        let response = self.http.get(&url).bearer_auth(access_token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "graph request failed");
            return Err(GraphError::Api { status, message });
        }
        Ok(response.json().await?)
    }

    /// Drives available to the signed-in user.
    pub async fn list_drives(&self, access_token: &str) -> Result<Vec<Drive>, GraphError> {
        let drives: Collection<Drive> = self.get_json(access_token, "/me/drives").await?;
        Ok(drives.value)
    }

    /// Raw children listing of a folder addressed by drive and item id.
    pub async fn folder_children_by_id(
        &self,
        access_token: &str,
        drive_id: &str,
        item_id: &str,
    ) -> Result<Vec<DriveItem>, GraphError> {
        let path = format!("/drives/{drive_id}/items/{item_id}/children");
        let items: Collection<DriveItem> = self.get_json(access_token, &path).await?;
        Ok(items.value)
    }

    /// List the expense-receipts folder and shape each file for the portal:
    /// subfolders are dropped, identities and facets are flattened, and the
    /// path is rebuilt from the parent reference.
    pub async fn list_expense_receipts(
        &self,
        access_token: &str,
        drive_id: &str,
        folder_id: &str,
    ) -> Result<Vec<ReceiptFile>, GraphError> {
        let path =
            format!("/drives/{drive_id}/items/{folder_id}/children?$select={RECEIPT_SELECT}");
        let items: Collection<DriveItem> = self.get_json(access_token, &path).await?;

        Ok(items
            .value
            .into_iter()
            .filter(DriveItem::is_file)
            .map(DriveItem::into_receipt_file)
            .collect())
    }
}

impl Default for GraphClient {
    fn default() -> Self {
        Self::new()
    }
}
