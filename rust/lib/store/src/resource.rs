//! Resource definitions: one per HR workflow.
//!
//! A `ResourceDef` is plain configuration data: table, columns, the
//! required-field set, the filterable columns, ordering, page size and
//! mutation behaviour. The generic ops and router in this crate turn it
//! into a full endpoint family.

use hrms_core::ServiceError;

use crate::column::{Column, ColumnType};

/// Identifier column present on every table.
pub const ID: &str = "id";
/// Insert timestamp column present on every table.
pub const CREATED_AT: &str = "created_at";
/// Update timestamp column present on every table.
pub const UPDATED_AT: &str = "updated_at";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_sql(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

/// How `PUT` treats fields missing from the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// `col = COALESCE(?, col)`: absent or null keeps the stored value.
    Coalesce,
    /// `col = ?`: absent fields are cleared.
    Overwrite,
}

/// Whether `GET /api/<resource>` pages its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Paginated,
    /// Every matching row in one response, no pagination metadata.
    All,
}

/// The endpoints a resource exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operations {
    pub list: bool,
    pub get: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl Operations {
    pub const ALL: Operations = Operations {
        list: true,
        get: true,
        create: true,
        update: true,
        delete: true,
    };

    pub const READ_ONLY: Operations = Operations {
        list: true,
        get: true,
        create: false,
        update: false,
        delete: false,
    };
}

/// Configuration for one resource endpoint family.
#[derive(Debug, Clone)]
pub struct ResourceDef {
    /// URL segment and audit workflow name, e.g. `employee-rewards`.
    pub name: &'static str,
    /// SQL table name, e.g. `employee_rewards`.
    pub table: &'static str,
    /// Human-readable singular, used in messages ("Payroll record not found").
    pub label: &'static str,
    pub columns: Vec<Column>,
    pub required: Vec<&'static str>,
    pub filters: Vec<&'static str>,
    pub order_by: (&'static str, Order),
    pub default_limit: usize,
    pub list_mode: ListMode,
    pub update_mode: UpdateMode,
    pub operations: Operations,
    /// Mutations are reported to the audit sink.
    pub audited: bool,
    /// Every request must authenticate.
    pub protected: bool,
}

impl ResourceDef {
    pub fn new(name: &'static str, table: &'static str, label: &'static str) -> Self {
        Self {
            name,
            table,
            label,
            columns: Vec::new(),
            required: Vec::new(),
            filters: Vec::new(),
            order_by: (CREATED_AT, Order::Desc),
            default_limit: 50,
            list_mode: ListMode::Paginated,
            update_mode: UpdateMode::Coalesce,
            operations: Operations::ALL,
            audited: false,
            protected: false,
        }
    }

    pub fn column(mut self, name: &'static str, ty: ColumnType) -> Self {
        self.columns.push(Column::new(name, ty));
        self
    }

    pub fn required(mut self, fields: &[&'static str]) -> Self {
        self.required = fields.to_vec();
        self
    }

    pub fn filters(mut self, columns: &[&'static str]) -> Self {
        self.filters = columns.to_vec();
        self
    }

    pub fn order_by(mut self, column: &'static str, order: Order) -> Self {
        self.order_by = (column, order);
        self
    }

    pub fn default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn list_mode(mut self, mode: ListMode) -> Self {
        self.list_mode = mode;
        self
    }

    pub fn update_mode(mut self, mode: UpdateMode) -> Self {
        self.update_mode = mode;
        self
    }

    pub fn operations(mut self, operations: Operations) -> Self {
        self.operations = operations;
        self
    }

    pub fn audited(mut self) -> Self {
        self.audited = true;
        self
    }

    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }

    /// Type of any column on the table, including the system columns.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        match name {
            ID => Some(ColumnType::Integer),
            CREATED_AT | UPDATED_AT => Some(ColumnType::Timestamp),
            _ => self.columns.iter().find(|c| c.name == name).map(|c| c.ty),
        }
    }

    pub fn not_found(&self) -> ServiceError {
        ServiceError::NotFound(format!("{} not found", self.label))
    }

    /// Check that every name the definition refers to is a real column.
    /// Run once at startup.
    pub fn check(&self) -> Result<(), ServiceError> {
        let invalid = |what: &str, name: &str| {
            ServiceError::Internal(format!(
                "resource '{}': {} '{}' is not a column",
                self.name, what, name
            ))
        };
        for c in &self.columns {
            if matches!(c.name, ID | CREATED_AT | UPDATED_AT) {
                return Err(ServiceError::Internal(format!(
                    "resource '{}': '{}' is a reserved column",
                    self.name, c.name
                )));
            }
        }
        for &name in &self.required {
            if !self.columns.iter().any(|c| c.name == name) {
                return Err(invalid("required field", name));
            }
        }
        for &name in &self.filters {
            if self.column_type(name).is_none() {
                return Err(invalid("filter", name));
            }
        }
        if self.column_type(self.order_by.0).is_none() {
            return Err(invalid("order column", self.order_by.0));
        }
        if self.default_limit == 0 {
            return Err(ServiceError::Internal(format!(
                "resource '{}': default limit must be positive",
                self.name
            )));
        }
        Ok(())
    }
}
