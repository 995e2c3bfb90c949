use ledgerlink_quickbooks::Environment;

/// Runtime configuration, read once at startup from the environment. The
/// defaults point at the company's receipts folder and the QuickBooks
/// sandbox, so a development instance needs no configuration beyond tokens.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub graph_base_url: String,
    pub quickbooks_base_url: String,
    /// Drive holding the expense-receipts folder.
    pub receipts_drive_id: String,
    /// Item id of the expense-receipts folder within that drive.
    pub receipts_folder_id: String,
    /// How many recent purchases to pull into the matching pool.
    pub max_purchases: u32,
}

const DEFAULT_RECEIPTS_DRIVE_ID: &str =
    "b!0F05pe1C2kK-wpKqi5Zc48axM_lpIdFNjnrGDD3PSm5M87XCUZy6TIbJKPIgDtH7";
const DEFAULT_RECEIPTS_FOLDER_ID: &str = "01FUFIEDFYM6C7J3SLSBDZCH3NDO7KCVRK";

impl Config {
    pub fn from_env() -> Self {
        let quickbooks_base_url = std::env::var("QUICKBOOKS_BASE_URL").unwrap_or_else(|_| {
            let environment = Environment::from_str_lossy(
                &std::env::var("QUICKBOOKS_ENVIRONMENT").unwrap_or_default(),
            );
            environment.base_url().to_string()
        });

        Config {
            bind_addr: env_or("LEDGERLINK_ADDR", "127.0.0.1:8000"),
            graph_base_url: env_or("GRAPH_BASE_URL", ledgerlink_graph::DEFAULT_BASE_URL),
            quickbooks_base_url,
            receipts_drive_id: env_or("RECEIPTS_DRIVE_ID", DEFAULT_RECEIPTS_DRIVE_ID),
            receipts_folder_id: env_or("RECEIPTS_FOLDER_ID", DEFAULT_RECEIPTS_FOLDER_ID),
            max_purchases: std::env::var("QUICKBOOKS_MAX_RESULTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
