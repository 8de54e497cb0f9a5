//! HTTP client for the HR workflow API.
//!
//! Records are decoded from the server's `{success, data, ...}` envelope.
//! Authentication is handled by pluggable [`TokenSource`] implementations.
//!
//! # Usage
//!
//! ```ignore
//! use hrms_client::{RecordFilter, ResourceClient, StaticToken};
//!
//! let client = ResourceClient::<serde_json::Value>::new(
//!     "http://localhost:8080",
//!     "payroll",
//!     Arc::new(StaticToken::new(jwt)),
//! );
//! let page = client.list(&[("status", "Paid"), ("limit", "20")]).await?;
//! let visible = client
//!     .list_filtered(&[], &RecordFilter::search("ann", &["employee_name"]))
//!     .await?;
//! ```

pub mod filter;

use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub use filter::RecordFilter;

// ── Error ───────────────────────────────────────────────────────────

/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status} {code}: {message}")]
    Server {
        status: u16,
        code: String,
        message: String,
    },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("auth: {0}")]
    Auth(String),

    #[error("decode: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status for server-side errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── TokenSource ─────────────────────────────────────────────────────

/// Pluggable token provider. Called before every API request.
///
/// Returns `Ok(None)` to skip the Authorization header (anonymous).
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn token(&self) -> Result<Option<String>, ApiError>;
}

/// No authentication: anonymous requests.
pub struct NoAuth;

#[async_trait::async_trait]
impl TokenSource for NoAuth {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }
}

/// Static bearer token (already obtained externally).
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        if self.0.is_empty() {
            return Err(ApiError::Auth("empty token".into()));
        }
        Ok(Some(self.0.clone()))
    }
}

// ── Wire types ──────────────────────────────────────────────────────

/// Pagination metadata returned with paged lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// A decoded list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    /// Absent for resources that return every row at once.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    message: Option<String>,
    total: Option<u64>,
    pagination: Option<Pagination>,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    error: String,
}

/// Map a non-2xx response body to `ApiError::Server`.
fn server_error(status: u16, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = if parsed.error.is_empty() {
        body.to_string()
    } else {
        parsed.error
    };
    ApiError::Server {
        status,
        code: parsed.code,
        message,
    }
}

// ── ResourceClient ──────────────────────────────────────────────────

/// CRUD client for a single resource at `{base_url}/api/{resource}`.
///
/// `T` defaults to raw JSON records; any serde type matching the
/// resource's columns works too.
pub struct ResourceClient<T = serde_json::Value> {
    http: reqwest::Client,
    base_url: String,
    resource: String,
    token_source: Arc<dyn TokenSource>,
    _phantom: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> ResourceClient<T> {
    pub fn new(
        base_url: impl Into<String>,
        resource: impl Into<String>,
        token_source: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            resource: resource.into(),
            token_source,
            _phantom: PhantomData,
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}/api/{}", self.base_url, self.resource)
    }

    pub fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    async fn authed(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, ApiError> {
        match self.token_source.token().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    async fn send<R: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<Envelope<R>, ApiError> {
        let resp = self.authed(builder).await?.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(server_error(status.as_u16(), &body));
        }
        resp.json::<Envelope<R>>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }

    fn data<R>(envelope: Envelope<R>) -> Result<R, ApiError> {
        envelope
            .data
            .ok_or_else(|| ApiError::Decode("response has no data".into()))
    }

    /// List records. `query` carries filters and `limit`/`offset`/`page`.
    pub async fn list(&self, query: &[(&str, &str)]) -> Result<ListResponse<T>, ApiError> {
        let env = self
            .send::<Vec<T>>(self.http.get(self.collection_url()).query(query))
            .await?;
        let total = env.total;
        let pagination = env.pagination;
        let data = Self::data(env)?;
        Ok(ListResponse {
            total: total.unwrap_or(data.len() as u64),
            data,
            pagination,
        })
    }

    /// Fetch a list and narrow it locally. Server-side paging still
    /// applies; the filter only sees the fetched rows.
    pub async fn list_filtered(
        &self,
        query: &[(&str, &str)],
        filter: &RecordFilter,
    ) -> Result<Vec<T>, ApiError> {
        let page = self.list(query).await?;
        Ok(filter.apply(page.data))
    }

    pub async fn get(&self, id: &str) -> Result<T, ApiError> {
        let env = self.send(self.http.get(self.item_url(id))).await?;
        Self::data(env)
    }

    pub async fn create(&self, item: &T) -> Result<T, ApiError> {
        let env = self.send(self.http.post(self.collection_url()).json(item)).await?;
        Self::data(env)
    }

    pub async fn update(&self, id: &str, item: &T) -> Result<T, ApiError> {
        let env = self.send(self.http.put(self.item_url(id)).json(item)).await?;
        Self::data(env)
    }

    /// Delete a record, returning the server's confirmation message.
    pub async fn delete(&self, id: &str) -> Result<String, ApiError> {
        let env = self
            .send::<serde_json::Value>(self.http.delete(self.item_url(id)))
            .await?;
        Ok(env.message.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_auth_returns_none() {
        let ts = NoAuth;
        assert!(ts.token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn static_token_returns_value() {
        let ts = StaticToken::new("my-jwt-token");
        assert_eq!(ts.token().await.unwrap(), Some("my-jwt-token".to_string()));
        assert!(matches!(StaticToken::new("").token().await, Err(ApiError::Auth(_))));
    }

    #[test]
    fn urls() {
        let client = ResourceClient::<serde_json::Value>::new("http://h:1/", "payroll", Arc::new(NoAuth));
        assert_eq!(client.collection_url(), "http://h:1/api/payroll");
        assert_eq!(client.item_url("7"), "http://h:1/api/payroll/7");
    }

    #[test]
    fn server_errors_decode_envelope() {
        let err = server_error(
            404,
            r#"{"success": false, "code": "NOT_FOUND", "error": "Payroll record not found"}"#,
        );
        match err {
            ApiError::Server { status, code, message } => {
                assert_eq!(status, 404);
                assert_eq!(code, "NOT_FOUND");
                assert_eq!(message, "Payroll record not found");
            }
            other => panic!("unexpected {:?}", other),
        }

        let err = server_error(502, "bad gateway");
        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().contains("bad gateway"));
    }

    #[test]
    fn list_response_without_pagination() {
        let env: Envelope<Vec<serde_json::Value>> =
            serde_json::from_str(r#"{"success": true, "data": [{"id": 1}], "total": 1}"#).unwrap();
        assert!(env.pagination.is_none());
        assert_eq!(env.total, Some(1));
    }

    #[derive(Debug, Deserialize)]
    struct Payslip {
        id: i64,
        employee_name: String,
    }

    #[test]
    fn envelope_decodes_records_without_default() {
        let env: Envelope<Vec<Payslip>> = serde_json::from_str(
            r#"{"success": true, "data": [{"id": 3, "employee_name": "Ann Lee"}], "total": 1,
                "pagination": {"page": 1, "limit": 50, "total": 1, "totalPages": 1}}"#,
        )
        .unwrap();
        let rows = env.data.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 3);
        assert_eq!(rows[0].employee_name, "Ann Lee");
        assert_eq!(env.pagination.unwrap().total_pages, 1);

        let env: Envelope<Payslip> =
            serde_json::from_str(r#"{"success": true, "message": "Payroll record deleted successfully"}"#).unwrap();
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("Payroll record deleted successfully"));
    }
}
