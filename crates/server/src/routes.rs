use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use ledgerlink_core::PurchaseTransaction;
use ledgerlink_graph::Drive;
use ledgerlink_reconcile::{annotate, AnnotatedReceipt};

use crate::error::ApiError;
use crate::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/receipts/expense", get(expense_receipts))
        .route("/api/quickbooks/expenses", get(quickbooks_expenses))
        .route("/api/graph/drives", get(graph_drives))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Credential extraction ─────────────────────────────────────────────────────

/// Graph access token from the standard `Authorization: Bearer` header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
}

/// QuickBooks session, carried as a header pair since this service keeps no
/// session store of its own.
fn qb_session(headers: &HeaderMap) -> Option<(String, String)> {
    let token = headers.get("x-qb-access-token")?.to_str().ok()?.to_string();
    let realm_id = headers.get("x-qb-realm-id")?.to_str().ok()?.to_string();
    Some((token, realm_id))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Default, Deserialize)]
struct ReceiptsQuery {
    drive_id: Option<String>,
    folder_id: Option<String>,
    max_results: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptListing {
    value: Vec<AnnotatedReceipt>,
    total_files: usize,
    folder_info: FolderInfo,
    /// Whether the purchase pool was actually fetched. When false, every
    /// receipt below is unmatched because matching was unavailable.
    qb_connected: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FolderInfo {
    drive_id: String,
    folder_id: String,
}

/// The reconciliation endpoint: list the receipts folder, parse an amount
/// out of each file name, and classify each receipt against recent
/// QuickBooks purchases.
async fn expense_receipts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReceiptsQuery>,
    headers: HeaderMap,
) -> Result<Json<ReceiptListing>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::GraphAuthMissing)?;
    let drive_id = params
        .drive_id
        .unwrap_or_else(|| state.config.receipts_drive_id.clone());
    let folder_id = params
        .folder_id
        .unwrap_or_else(|| state.config.receipts_folder_id.clone());

    // Primary listing; failures here are the caller's to see.
    let receipts = state
        .graph
        .list_expense_receipts(&token, &drive_id, &folder_id)
        .await?;

    // Secondary enrichment, attempted only with a QuickBooks session and
    // never allowed to fail the listing. On any error the receipts go out
    // unmatched.
    let max_results = params.max_results.unwrap_or(state.config.max_purchases);
    let purchases: Option<Vec<PurchaseTransaction>> = match qb_session(&headers) {
        Some((qb_token, realm_id)) => {
            match state
                .quickbooks
                .list_purchases(&qb_token, &realm_id, max_results)
                .await
            {
                Ok(pool) => Some(pool),
                Err(err) => {
                    tracing::warn!("purchase fetch failed, returning unmatched listing: {err}");
                    None
                }
            }
        }
        None => None,
    };

    let qb_connected = purchases.is_some();
    let value = annotate(receipts, purchases.as_deref());
    Ok(Json(ReceiptListing {
        total_files: value.len(),
        folder_info: FolderInfo {
            drive_id,
            folder_id,
        },
        qb_connected,
        value,
    }))
}

#[derive(Debug, Default, Deserialize)]
struct ExpensesQuery {
    max_results: Option<u32>,
}

/// Raw purchase listing passthrough, shaped exactly as QuickBooks returns it.
async fn quickbooks_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExpensesQuery>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (token, realm_id) = qb_session(&headers).ok_or(ApiError::QuickBooksAuthMissing)?;
    let max_results = params.max_results.unwrap_or(state.config.max_purchases);
    let query = format!(
        "SELECT * FROM Purchase WHERE PaymentType = 'Cash' \
         ORDERBY TxnDate DESC MAXRESULTS {max_results}"
    );
    let response = state.quickbooks.query(&token, &realm_id, &query).await?;
    Ok(Json(response))
}

async fn graph_drives(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Drive>>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::GraphAuthMissing)?;
    let drives = state.graph.list_drives(&token).await?;
    Ok(Json(drives))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
