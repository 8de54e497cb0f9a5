//! Audit trail for mutations on sensitive resources.
//!
//! Writes are best-effort: a failing sink is logged and swallowed, never
//! surfaced to the client whose mutation already succeeded.

use std::collections::HashMap;
use std::sync::Arc;

use hrms_core::ServiceError;
use hrms_sql::SQLStore;
use serde::Serialize;
use serde_json::Value as Json;
use tracing::warn;

use crate::column::ColumnType;
use crate::ops::{ListPage, Record, ResourceOps};
use crate::resource::{Operations, Order, ResourceDef, CREATED_AT};

/// Kind of mutation being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
        }
    }
}

/// One audit record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    /// Resource name, e.g. `payroll`.
    pub workflow_name: String,
    pub record_id: String,
    pub action: AuditAction,
    pub user_id: String,
    pub changes: Json,
}

/// Destination for audit entries.
pub trait AuditSink: Send + Sync + 'static {
    fn write(&self, entry: &AuditEntry) -> Result<(), ServiceError>;
}

/// Drops every entry. Used when auditing is disabled.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn write(&self, _entry: &AuditEntry) -> Result<(), ServiceError> {
        Ok(())
    }
}

/// Deliver an entry, logging instead of failing when the sink errors.
pub fn record(sink: &dyn AuditSink, entry: &AuditEntry) {
    if let Err(e) = sink.write(entry) {
        warn!(
            workflow = %entry.workflow_name,
            record_id = %entry.record_id,
            action = entry.action.as_str(),
            "audit write failed: {}",
            e
        );
    }
}

/// Definition of the `audit-logs` resource. Read-only over HTTP; rows are
/// only ever written by [`SqlAuditSink`].
pub fn audit_log_resource() -> ResourceDef {
    ResourceDef::new("audit-logs", "audit_logs", "Audit log entry")
        .column("workflow_name", ColumnType::Text)
        .column("record_id", ColumnType::Text)
        .column("action", ColumnType::Text)
        .column("user_id", ColumnType::Text)
        .column("changes", ColumnType::Json)
        .required(&["workflow_name", "record_id", "action", "user_id"])
        .filters(&["workflow_name", "record_id", "action", "user_id"])
        .order_by(CREATED_AT, Order::Desc)
        .default_limit(50)
        .operations(Operations::READ_ONLY)
        .protected()
}

/// Audit sink that appends to the `audit_logs` table.
#[derive(Clone)]
pub struct SqlAuditSink {
    ops: ResourceOps,
}

impl SqlAuditSink {
    pub fn new(sql: Arc<dyn SQLStore>) -> Self {
        Self {
            ops: ResourceOps::new(sql, audit_log_resource()),
        }
    }

    pub fn ensure_table(&self) -> Result<(), ServiceError> {
        self.ops.ensure_table()
    }

    /// The read side, for mounting `/api/audit-logs`.
    pub fn ops(&self) -> &ResourceOps {
        &self.ops
    }

    /// Entries for one record of one workflow, newest first.
    pub fn history(&self, workflow_name: &str, record_id: &str) -> Result<Vec<Record>, ServiceError> {
        let query: HashMap<String, String> = [
            ("workflow_name".to_string(), workflow_name.to_string()),
            ("record_id".to_string(), record_id.to_string()),
            ("limit".to_string(), hrms_core::MAX_LIMIT.to_string()),
        ]
        .into_iter()
        .collect();
        let ListPage { items, .. } = self.ops.list(&query)?;
        Ok(items)
    }
}

impl AuditSink for SqlAuditSink {
    fn write(&self, entry: &AuditEntry) -> Result<(), ServiceError> {
        let body = serde_json::to_value(entry)
            .map_err(|e| ServiceError::Internal(format!("serialize audit entry: {}", e)))?;
        self.ops.create(&body).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrms_sql::SqliteStore;
    use serde_json::json;

    fn sink() -> SqlAuditSink {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let sink = SqlAuditSink::new(sql);
        sink.ensure_table().unwrap();
        sink
    }

    fn entry(record_id: &str, action: AuditAction) -> AuditEntry {
        AuditEntry {
            workflow_name: "payroll".into(),
            record_id: record_id.into(),
            action,
            user_id: "u-1".into(),
            changes: json!({"net_pay": 4200}),
        }
    }

    #[test]
    fn entries_are_stored_and_queryable() {
        let sink = sink();
        sink.write(&entry("1", AuditAction::Create)).unwrap();
        sink.write(&entry("1", AuditAction::Update)).unwrap();
        sink.write(&entry("2", AuditAction::Create)).unwrap();

        let history = sink.history("payroll", "1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["action"], "update");
        assert_eq!(history[1]["action"], "create");
        assert_eq!(history[0]["changes"], json!({"net_pay": 4200}));
        assert_eq!(history[0]["user_id"], "u-1");
    }

    #[test]
    fn audit_resource_is_read_only_and_protected() {
        let def = audit_log_resource();
        def.check().unwrap();
        assert_eq!(def.operations, Operations::READ_ONLY);
        assert!(def.protected);
        assert!(!def.audited);
    }

    struct Failing;

    impl AuditSink for Failing {
        fn write(&self, _entry: &AuditEntry) -> Result<(), ServiceError> {
            Err(ServiceError::Storage("disk full".into()))
        }
    }

    #[test]
    fn record_swallows_sink_errors() {
        record(&Failing, &entry("1", AuditAction::Delete));
        record(&NoopAuditSink, &entry("1", AuditAction::Delete));
    }

    #[test]
    fn action_serializes_lowercase() {
        assert_eq!(serde_json::to_value(AuditAction::Delete).unwrap(), json!("delete"));
    }
}
