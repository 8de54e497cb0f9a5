//! Generic record store and HTTP surface for HR resources.
//!
//! A resource is described once as a [`ResourceDef`]; [`ResourceOps`]
//! executes CRUD against the SQL store and [`resource_router`] exposes it
//! under `/api/{resource}`. Mutations on audited resources flow to an
//! [`AuditSink`].

pub mod audit;
pub mod column;
pub mod ops;
pub mod query;
pub mod resource;
pub mod router;
pub mod validate;

pub use audit::{
    audit_log_resource, AuditAction, AuditEntry, AuditSink, NoopAuditSink, SqlAuditSink,
};
pub use column::{Column, ColumnType};
pub use ops::{ListPage, Record, ResourceOps};
pub use query::{SelectQuery, Statement};
pub use resource::{ListMode, Operations, Order, ResourceDef, UpdateMode, CREATED_AT, ID, UPDATED_AT};
pub use router::resource_router;
