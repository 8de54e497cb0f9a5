use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// Upper bound for any `limit` a caller may request.
pub const MAX_LIMIT: usize = 500;

/// Largest row offset SQLite accepts as a positive `OFFSET`.
pub const MAX_OFFSET: usize = i64::MAX as usize;

/// Pagination parameters for list operations.
///
/// Built from the raw query string: `limit` plus either `offset` or a
/// 1-based `page`. When both are present `page` wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub limit: usize,
    pub offset: usize,
}

impl ListParams {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset,
        }
    }

    /// Parse pagination from query parameters. Empty values count as absent.
    pub fn from_query(
        query: &HashMap<String, String>,
        default_limit: usize,
    ) -> Result<Self, ServiceError> {
        let limit = parse_usize(query, "limit")?.unwrap_or(default_limit);
        let limit = if limit == 0 { default_limit } else { limit };
        let limit = limit.clamp(1, MAX_LIMIT);

        let (key, offset) = match parse_usize(query, "page")? {
            Some(page) => ("page", page.max(1).saturating_sub(1).checked_mul(limit)),
            None => ("offset", Some(parse_usize(query, "offset")?.unwrap_or(0))),
        };
        let offset = offset
            .filter(|o| *o <= MAX_OFFSET)
            .ok_or_else(|| out_of_range(key))?;

        Ok(Self { limit, offset })
    }

    /// 1-based page number containing `offset`.
    pub fn page(&self) -> usize {
        self.offset / self.limit + 1
    }

    /// Pagination metadata for a result set of `total` rows.
    pub fn pagination(&self, total: u64) -> Pagination {
        let limit = self.limit as u64;
        Pagination {
            page: self.page() as u64,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        }
    }
}

fn out_of_range(key: &str) -> ServiceError {
    ServiceError::Validation(format!("'{}' is out of range", key))
}

fn parse_usize(query: &HashMap<String, String>, key: &str) -> Result<Option<usize>, ServiceError> {
    match query.get(key).map(|v| v.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ServiceError::Validation(format!("'{}' must be a non-negative integer", key))),
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Uniform success envelope returned by every endpoint.
///
/// ```json
/// {"success": true, "data": [...], "total": 15, "pagination": {...}}
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            total: None,
            pagination: None,
        }
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            total: None,
            pagination: None,
        }
    }
}

/// Current time as an RFC 3339 UTC string with millisecond precision.
///
/// The fixed width makes timestamps compare correctly as plain strings.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
