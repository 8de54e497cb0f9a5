pub mod resources;

use std::sync::Arc;

use axum::Router;
use hrms_core::{Authenticator, Module, ServiceError};
use hrms_sql::SQLStore;
use hrms_store::{resource_router, AuditSink, NoopAuditSink, ResourceOps, SqlAuditSink};
use tracing::info;

/// HR Module: the sixteen workflow resources plus the audit trail.
pub struct HrModule {
    resources: Vec<ResourceOps>,
    audit_log: ResourceOps,
    auth: Arc<dyn Authenticator>,
    audit: Arc<dyn AuditSink>,
}

impl HrModule {
    /// Create every table and index, then wire the module.
    ///
    /// With `audit_enabled = false` mutations are not recorded, but the
    /// audit trail stays readable.
    pub fn new(
        sql: Arc<dyn SQLStore>,
        auth: Arc<dyn Authenticator>,
        audit_enabled: bool,
    ) -> Result<Self, ServiceError> {
        let sink = SqlAuditSink::new(sql.clone());
        sink.ensure_table()?;
        let audit_log = sink.ops().clone();
        let audit: Arc<dyn AuditSink> = if audit_enabled {
            Arc::new(sink)
        } else {
            Arc::new(NoopAuditSink)
        };

        let mut ops = Vec::new();
        for def in resources::all() {
            let resource = ResourceOps::new(sql.clone(), def);
            resource.ensure_table()?;
            ops.push(resource);
        }
        info!(resources = ops.len(), audit_enabled, "HR resources ready");

        Ok(Self {
            resources: ops,
            audit_log,
            auth,
            audit,
        })
    }

    /// Replace the audit destination.
    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Look up a resource by its URL name.
    pub fn resource(&self, name: &str) -> Option<&ResourceOps> {
        self.resources.iter().find(|r| r.def().name == name)
    }

    pub fn resources(&self) -> &[ResourceOps] {
        &self.resources
    }
}

impl Module for HrModule {
    fn name(&self) -> &str {
        "hr"
    }

    fn routes(&self) -> Router {
        let mut router = Router::new();
        for ops in &self.resources {
            router = router.merge(resource_router(
                ops.clone(),
                self.auth.clone(),
                self.audit.clone(),
            ));
        }
        router.merge(resource_router(
            self.audit_log.clone(),
            self.auth.clone(),
            Arc::new(NoopAuditSink),
        ))
    }
}

#[cfg(test)]
mod tests {
    use hrms_core::AllowAll;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use hrms_sql::SqliteStore;
    use tower::ServiceExt;

    use super::*;

    fn module(audit_enabled: bool) -> HrModule {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        HrModule::new(sql, Arc::new(AllowAll), audit_enabled).unwrap()
    }

    #[test]
    fn creates_all_tables() {
        let m = module(true);
        assert_eq!(m.resources().len(), 16);
        for ops in m.resources() {
            ops.list(&Default::default()).unwrap();
        }
        assert!(m.resource("payroll").unwrap().def().protected);
        assert!(m.resource("audit-logs").is_none());
    }

    #[test]
    fn startup_is_repeatable() {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        HrModule::new(sql.clone(), Arc::new(AllowAll), true).unwrap();
        HrModule::new(sql, Arc::new(AllowAll), false).unwrap();
    }

    async fn call(router: &axum::Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn routes_serve_resources_and_audit_logs() {
        let m = module(false);
        assert_eq!(m.name(), "hr");
        let router = m.routes();

        for def in resources::all() {
            let (status, json) = call(&router, "GET", &format!("/api/{}", def.name)).await;
            assert_eq!(status, StatusCode::OK, "{}", def.name);
            assert_eq!(json["success"], true);
            assert_eq!(json["total"], 0);
        }

        let (status, json) = call(&router, "GET", "/api/audit-logs").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"], serde_json::json!([]));

        let (status, _) = call(&router, "DELETE", "/api/audit-logs/1").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
