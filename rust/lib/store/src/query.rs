//! Filtered list query builder.
//!
//! Produces the page-selecting statement and the matching count statement
//! from one description, so both always carry the same predicates and the
//! placeholder numbering can never drift between them.
//!
//! ```ignore
//! let q = SelectQuery::new("payroll")
//!     .filter("status", Some(Value::from("Paid")))
//!     .filter("department", None) // absent: no predicate
//!     .order_by("pay_date", Order::Desc)
//!     .paginate(10, 20);
//! let page = q.build();        // SELECT * ... WHERE 1=1 AND "status" = ?1 ... LIMIT ?2 OFFSET ?3
//! let count = q.build_count(); // SELECT COUNT(*) AS total ... WHERE 1=1 AND "status" = ?1
//! ```

use hrms_sql::Value;

use crate::resource::Order;

/// A SQL string with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Builder for `SELECT * FROM <table> WHERE 1=1 [AND ...] [ORDER BY ...] [LIMIT/OFFSET]`.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: String,
    predicates: Vec<(String, Value)>,
    order: Vec<(String, Order)>,
    page: Option<(usize, usize)>,
}

impl SelectQuery {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            predicates: Vec::new(),
            order: Vec::new(),
            page: None,
        }
    }

    /// Add `AND "<column>" = ?` when `value` is present.
    pub fn filter(mut self, column: &str, value: Option<Value>) -> Self {
        if let Some(value) = value {
            self.predicates.push((column.to_string(), value));
        }
        self
    }

    /// Append an ordering term. Terms apply in call order.
    pub fn order_by(mut self, column: &str, order: Order) -> Self {
        self.order.push((column.to_string(), order));
        self
    }

    pub fn paginate(mut self, limit: usize, offset: usize) -> Self {
        self.page = Some((limit, offset));
        self
    }

    /// Number of filter predicates that made it into the query.
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    fn where_clause(&self, params: &mut Vec<Value>) -> String {
        let mut sql = String::from(" WHERE 1=1");
        for (column, value) in &self.predicates {
            params.push(value.clone());
            sql.push_str(&format!(" AND {} = ?{}", quote_ident(column), params.len()));
        }
        sql
    }

    /// The row-selecting statement.
    pub fn build(&self) -> Statement {
        let mut params = Vec::with_capacity(self.predicates.len() + 2);
        let mut sql = format!("SELECT * FROM {}", quote_ident(&self.table));
        sql.push_str(&self.where_clause(&mut params));

        if !self.order.is_empty() {
            let terms: Vec<String> = self
                .order
                .iter()
                .map(|(column, order)| format!("{} {}", quote_ident(column), order.as_sql()))
                .collect();
            sql.push_str(&format!(" ORDER BY {}", terms.join(", ")));
        }

        if let Some((limit, offset)) = self.page {
            // Saturate: a negative OFFSET would make SQLite restart at row 0.
            params.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
            let limit_idx = params.len();
            params.push(Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));
            let offset_idx = params.len();
            sql.push_str(&format!(" LIMIT ?{} OFFSET ?{}", limit_idx, offset_idx));
        }

        Statement { sql, params }
    }

    /// The total-row statement: same predicates, no ordering or paging.
    pub fn build_count(&self) -> Statement {
        let mut params = Vec::with_capacity(self.predicates.len());
        let mut sql = format!("SELECT COUNT(*) AS total FROM {}", quote_ident(&self.table));
        sql.push_str(&self.where_clause(&mut params));
        Statement { sql, params }
    }
}

/// Double-quote an SQL identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
