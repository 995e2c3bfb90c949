use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single file discovered in the expense-receipts cloud folder.
///
/// Built fresh on every listing request and never persisted; the field names
/// follow the drive API's camelCase wire shape so the listing payload round
/// trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptFile {
    pub id: String,
    pub name: String,
    /// Full path within the drive, e.g. `/Documents/Receipts/foo.pdf`.
    pub path: Option<String>,
    pub size: Option<u64>,
    pub created_date_time: Option<DateTime<Utc>>,
    pub last_modified_date_time: Option<DateTime<Utc>>,
    pub web_url: Option<String>,
    pub download_url: Option<String>,
    pub mime_type: Option<String>,
    /// Display name of the user who uploaded the file.
    pub created_by: Option<String>,
    pub last_modified_by: Option<String>,
}
