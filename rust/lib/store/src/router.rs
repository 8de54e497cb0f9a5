//! Resource router: turns a `ResourceOps` into `/api/{resource}` CRUD routes.
//!
//! Routes (each only when the resource enables the operation):
//!   GET    /api/{resource}        list (filters + pagination)
//!   POST   /api/{resource}        create, 201
//!   GET    /api/{resource}/{id}   get by id
//!   PUT    /api/{resource}/{id}   update
//!   DELETE /api/{resource}/{id}   delete
//!
//! Protected resources authenticate before touching the store. Audited
//! resources report every successful mutation to the audit sink.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::MethodRouter;
use axum::{Json, Router};
use hrms_core::{Authenticator, Envelope, Principal, ServiceError};
use serde_json::Value;

use crate::audit::{self, AuditAction, AuditEntry, AuditSink};
use crate::ops::{Record, ResourceOps};
use crate::resource::ID;

/// Shared state for one resource's handlers.
struct ResourceState {
    ops: ResourceOps,
    auth: Arc<dyn Authenticator>,
    audit: Arc<dyn AuditSink>,
}

impl ResourceState {
    /// Identify the caller. Public resources fall back to anonymous.
    fn principal(&self, headers: &HeaderMap) -> Result<Principal, ServiceError> {
        if self.ops.def().protected {
            self.auth.authenticate(headers)
        } else {
            Ok(self
                .auth
                .authenticate(headers)
                .unwrap_or_else(|_| Principal::anonymous()))
        }
    }

    fn audit(&self, record: &Record, action: AuditAction, principal: &Principal, changes: Record) {
        if !self.ops.def().audited {
            return;
        }
        let record_id = match record.get(ID) {
            Some(Value::String(s)) => s.clone(),
            Some(v) => v.to_string(),
            None => String::new(),
        };
        let entry = AuditEntry {
            workflow_name: self.ops.def().name.to_string(),
            record_id,
            action,
            user_id: principal.user_id.clone(),
            changes: Value::Object(changes),
        };
        audit::record(self.audit.as_ref(), &entry);
    }
}

/// Build the router for one resource.
pub fn resource_router(
    ops: ResourceOps,
    auth: Arc<dyn Authenticator>,
    audit: Arc<dyn AuditSink>,
) -> Router {
    let def = ops.def();
    let enabled = def.operations;
    let collection_path = format!("/api/{}", def.name);
    let item_path = format!("/api/{}/{{id}}", def.name);

    let mut collection: MethodRouter<Arc<ResourceState>> = MethodRouter::new();
    if enabled.list {
        collection = collection.get(list_handler);
    }
    if enabled.create {
        collection = collection.post(create_handler);
    }

    let mut item: MethodRouter<Arc<ResourceState>> = MethodRouter::new();
    if enabled.get {
        item = item.get(get_handler);
    }
    if enabled.update {
        item = item.put(update_handler);
    }
    if enabled.delete {
        item = item.delete(delete_handler);
    }

    let mut router = Router::new();
    if enabled.list || enabled.create {
        router = router.route(&collection_path, collection);
    }
    if enabled.get || enabled.update || enabled.delete {
        router = router.route(&item_path, item);
    }

    router.with_state(Arc::new(ResourceState { ops, auth, audit }))
}

fn parse_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ServiceError> {
    body.map(|Json(v)| v)
        .map_err(|e| ServiceError::Validation(format!("invalid JSON body: {}", e.body_text())))
}

async fn list_handler(
    State(state): State<Arc<ResourceState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Envelope<Vec<Record>>>, ServiceError> {
    state.principal(&headers)?;
    let page = state.ops.list(&query)?;
    let mut envelope = Envelope::data(page.items).with_total(page.total);
    if let Some(params) = page.params {
        envelope = envelope.with_pagination(params.pagination(page.total));
    }
    Ok(Json(envelope))
}

async fn get_handler(
    State(state): State<Arc<ResourceState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Envelope<Record>>, ServiceError> {
    state.principal(&headers)?;
    let record = state.ops.get(&id)?;
    Ok(Json(Envelope::data(record)))
}

async fn create_handler(
    State(state): State<Arc<ResourceState>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Record>>), ServiceError> {
    let principal = state.principal(&headers)?;
    let body = parse_body(body)?;
    let created = state.ops.create(&body)?;
    state.audit(&created, AuditAction::Create, &principal, created.clone());
    Ok((StatusCode::CREATED, Json(Envelope::data(created))))
}

async fn update_handler(
    State(state): State<Arc<ResourceState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Record>>, ServiceError> {
    let principal = state.principal(&headers)?;
    let body = parse_body(body)?;
    let updated = state.ops.update(&id, &body)?;
    state.audit(&updated, AuditAction::Update, &principal, state.ops.changes(&body));
    Ok(Json(Envelope::data(updated)))
}

async fn delete_handler(
    State(state): State<Arc<ResourceState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Envelope<()>>, ServiceError> {
    let principal = state.principal(&headers)?;
    let deleted = state.ops.delete(&id)?;
    state.audit(&deleted, AuditAction::Delete, &principal, deleted.clone());
    Ok(Json(Envelope::message(format!(
        "{} deleted successfully",
        state.ops.def().label
    ))))
}
