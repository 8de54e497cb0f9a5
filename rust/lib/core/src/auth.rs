//! Authentication trait for the HR workflows.
//!
//! Resource handlers do NOT depend on any specific token format.
//! They only know this trait. The concrete implementation is injected
//! at startup time.

use axum::http::HeaderMap;

use crate::ServiceError;

/// The identity behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable user id, recorded in the audit trail.
    pub user_id: String,
    /// Display name.
    pub name: String,
}

impl Principal {
    pub const ANONYMOUS: &'static str = "anonymous";

    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(Self::ANONYMOUS, "Anonymous")
    }
}

/// Pluggable authenticator. Called for every request to a protected
/// resource before the store is touched.
pub trait Authenticator: Send + Sync + 'static {
    /// Identify the caller from the request headers.
    ///
    /// Returns `Err(ServiceError::Unauthorized)` when the request carries
    /// no usable credentials.
    fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, ServiceError>;
}

/// A no-op authenticator that lets every request through as anonymous.
/// Used for tests and local development.
pub struct AllowAll;

impl Authenticator for AllowAll {
    fn authenticate(&self, _headers: &HeaderMap) -> Result<Principal, ServiceError> {
        Ok(Principal::anonymous())
    }
}

/// An authenticator that rejects everything. Used for testing.
pub struct DenyAll;

impl Authenticator for DenyAll {
    fn authenticate(&self, _headers: &HeaderMap) -> Result<Principal, ServiceError> {
        Err(ServiceError::Unauthorized("authentication required".into()))
    }
}

/// Extract the Bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
