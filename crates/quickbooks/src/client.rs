use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use ledgerlink_core::PurchaseTransaction;

use crate::types::{purchase_pool, QueryEnvelope};

pub const SANDBOX_BASE_URL: &str = "https://sandbox-quickbooks.api.intuit.com/v3";
pub const PRODUCTION_BASE_URL: &str = "https://quickbooks.api.intuit.com/v3";

/// Which QuickBooks company file host to talk to. Sandbox is the default,
/// matching the development posture of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Sandbox,
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

#[derive(Debug, Error)]
pub enum QuickBooksError {
    #[error("transport error calling QuickBooks: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("QuickBooks returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl QuickBooksError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            QuickBooksError::Api {
                status: StatusCode::UNAUTHORIZED,
                ..
            }
        )
    }
}

/// Client for the QuickBooks Online accounting API. Access token and realm
/// (company) id are held by the caller and passed per call.
#[derive(Debug, Clone)]
pub struct QuickBooksClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuickBooksClient {
    pub fn new(environment: Environment) -> Self {
        Self::with_base_url(environment.base_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        QuickBooksClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        access_token: &str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, QuickBooksError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "quickbooks request");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(params)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "quickbooks request failed");
            return Err(QuickBooksError::Api { status, message });
        }
        Ok(response.json().await?)
    }

    /// Run a raw QuickBooks query and return the response untouched.
    pub async fn query(
        &self,
        access_token: &str,
        realm_id: &str,
        query: &str,
    ) -> Result<Value, QuickBooksError> {
        self.get_json(
            access_token,
            &format!("company/{realm_id}/query"),
            &[("query", query)],
        )
        .await
    }

    /// Company information, used as a connection check.
    pub async fn company_info(
        &self,
        access_token: &str,
        realm_id: &str,
    ) -> Result<Value, QuickBooksError> {
        self.get_json(
            access_token,
            &format!("company/{realm_id}/companyinfo/{realm_id}"),
            &[],
        )
        .await
    }

    /// Most recent cash purchases, already reduced to the matching pool:
    /// records with a missing, malformed, or non-positive `TotalAmt` are
    /// dropped here rather than surfaced as errors.
    pub async fn list_purchases(
        &self,
        access_token: &str,
        realm_id: &str,
        max_results: u32,
    ) -> Result<Vec<PurchaseTransaction>, QuickBooksError> {
        let query = format!(
            "SELECT * FROM Purchase WHERE PaymentType = 'Cash' \
             ORDERBY TxnDate DESC MAXRESULTS {max_results}"
        );
        let envelope: QueryEnvelope = self
            .get_json(
                access_token,
                &format!("company/{realm_id}/query"),
                &[("query", query.as_str())],
            )
            .await?;
        Ok(purchase_pool(envelope.query_response.purchases))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_loosely() {
        assert_eq!(Environment::from_str_lossy("production"), Environment::Production);
        assert_eq!(Environment::from_str_lossy("PROD"), Environment::Production);
        assert_eq!(Environment::from_str_lossy("sandbox"), Environment::Sandbox);
        assert_eq!(Environment::from_str_lossy("anything"), Environment::Sandbox);
    }

    #[test]
    fn environment_selects_base_url() {
        assert_eq!(
            QuickBooksClient::new(Environment::Sandbox).base_url,
            SANDBOX_BASE_URL
        );
        assert_eq!(
            QuickBooksClient::new(Environment::Production).base_url,
            PRODUCTION_BASE_URL
        );
    }

    #[test]
    fn unauthorized_is_detectable() {
        let err = QuickBooksError::Api {
            status: StatusCode::UNAUTHORIZED,
            message: String::new(),
        };
        assert!(err.is_unauthorized());
    }
}
