//! ResourceOps: generic CRUD over one resource table.
//!
//! Records travel as JSON objects. Each operation is a single statement
//! (plus a count query for paginated lists); `INSERT`, `UPDATE` and
//! `DELETE` use `RETURNING *` so the affected row comes back in the same
//! round trip.

use std::collections::HashMap;
use std::sync::Arc;

use hrms_core::{now_rfc3339, ListParams, ServiceError};
use hrms_sql::{Row, SQLStore, Value};
use serde_json::{Map, Value as Json};

use crate::column::natural_json;
use crate::query::{quote_ident, SelectQuery, Statement};
use crate::resource::{ListMode, ResourceDef, UpdateMode, CREATED_AT, ID, UPDATED_AT};
use crate::validate;

/// A record as returned to clients.
pub type Record = Map<String, Json>;

/// One page (or the whole set) of a list query.
#[derive(Debug, Clone)]
pub struct ListPage {
    pub items: Vec<Record>,
    /// Rows matching the filters, ignoring limit/offset.
    pub total: u64,
    /// Present when the resource pages its results.
    pub params: Option<ListParams>,
}

/// CRUD operations for one `ResourceDef`.
#[derive(Clone)]
pub struct ResourceOps {
    sql: Arc<dyn SQLStore>,
    def: Arc<ResourceDef>,
}

impl ResourceOps {
    pub fn new(sql: Arc<dyn SQLStore>, def: ResourceDef) -> Self {
        Self {
            sql,
            def: Arc::new(def),
        }
    }

    pub fn def(&self) -> &ResourceDef {
        &self.def
    }

    fn sql_err(e: hrms_sql::SQLError) -> ServiceError {
        ServiceError::Storage(e.to_string())
    }

    fn run(&self, stmt: &Statement) -> Result<Vec<Row>, ServiceError> {
        self.sql.query(&stmt.sql, &stmt.params).map_err(Self::sql_err)
    }

    /// Ensure the table and its filter indexes exist. Call once at startup.
    pub fn ensure_table(&self) -> Result<(), ServiceError> {
        let def = &self.def;
        def.check()?;
        let table = quote_ident(def.table);

        let mut cols = vec![format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", quote_ident(ID))];
        for c in &def.columns {
            cols.push(format!("{} {}", quote_ident(c.name), c.ty.sql_type()));
        }
        cols.push(format!("{} TEXT NOT NULL", quote_ident(CREATED_AT)));
        cols.push(format!("{} TEXT NOT NULL", quote_ident(UPDATED_AT)));

        let create_sql = format!("CREATE TABLE IF NOT EXISTS {} ({})", table, cols.join(", "));
        self.sql.exec(&create_sql, &[]).map_err(Self::sql_err)?;

        for col in def.filters.iter().filter(|c| **c != ID) {
            let idx_sql = format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                quote_ident(&format!("idx_{}_{}", def.table, col)),
                table,
                quote_ident(col)
            );
            self.sql.exec(&idx_sql, &[]).map_err(Self::sql_err)?;
        }

        Ok(())
    }

    /// Build the filtered list query from request query parameters.
    ///
    /// Only the resource's declared filter columns are honoured; a missing
    /// or empty parameter adds no predicate.
    pub fn list_query(&self, query: &HashMap<String, String>) -> Result<SelectQuery, ServiceError> {
        let def = &self.def;
        let mut q = SelectQuery::new(def.table);
        for &column in &def.filters {
            let value = match query.get(column).filter(|raw| !raw.is_empty()) {
                Some(raw) => {
                    let ty = def
                        .column_type(column)
                        .ok_or_else(|| ServiceError::Internal(format!("unknown filter column {}", column)))?;
                    Some(ty.parse_param(column, raw)?)
                }
                None => None,
            };
            q = q.filter(column, value);
        }

        let (order_col, order) = def.order_by;
        q = q.order_by(order_col, order);
        if order_col != ID {
            q = q.order_by(ID, order);
        }
        Ok(q)
    }

    /// List records matching the query's filters.
    pub fn list(&self, query: &HashMap<String, String>) -> Result<ListPage, ServiceError> {
        let q = self.list_query(query)?;
        match self.def.list_mode {
            ListMode::Paginated => {
                let params = ListParams::from_query(query, self.def.default_limit)?;
                let q = q.paginate(params.limit, params.offset);
                let items = self.to_records(self.run(&q.build())?);
                let total = self
                    .run(&q.build_count())?
                    .first()
                    .and_then(|r| r.get_i64("total"))
                    .unwrap_or(0) as u64;
                Ok(ListPage {
                    items,
                    total,
                    params: Some(params),
                })
            }
            ListMode::All => {
                let items = self.to_records(self.run(&q.build())?);
                let total = items.len() as u64;
                Ok(ListPage {
                    items,
                    total,
                    params: None,
                })
            }
        }
    }

    /// Get a record by id or return NotFound.
    pub fn get(&self, id: &str) -> Result<Record, ServiceError> {
        let id = self.parse_id(id)?;
        let stmt = Statement {
            sql: format!(
                "SELECT * FROM {} WHERE {} = ?1",
                quote_ident(self.def.table),
                quote_ident(ID)
            ),
            params: vec![Value::Integer(id)],
        };
        self.single(self.run(&stmt)?)
    }

    /// Insert a new record after the required-field check.
    pub fn create(&self, body: &Json) -> Result<Record, ServiceError> {
        let def = &self.def;
        let obj = validate::as_object(body)?;
        validate::check_required(obj, &def.required)?;

        let now = now_rfc3339();
        let mut col_names = Vec::with_capacity(def.columns.len() + 2);
        let mut placeholders = Vec::with_capacity(def.columns.len() + 2);
        let mut params = Vec::with_capacity(def.columns.len() + 2);

        for c in &def.columns {
            params.push(c.ty.to_sql(c.name, obj.get(c.name).unwrap_or(&Json::Null))?);
            col_names.push(quote_ident(c.name));
            placeholders.push(format!("?{}", params.len()));
        }
        for col in [CREATED_AT, UPDATED_AT] {
            params.push(Value::Text(now.clone()));
            col_names.push(quote_ident(col));
            placeholders.push(format!("?{}", params.len()));
        }

        let stmt = Statement {
            sql: format!(
                "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
                quote_ident(def.table),
                col_names.join(", "),
                placeholders.join(", ")
            ),
            params,
        };
        self.run(&stmt)?
            .first()
            .map(|row| self.to_record(row))
            .ok_or_else(|| ServiceError::Internal(format!("insert into {} returned no row", def.table)))
    }

    /// Update a record by id. Absent fields follow the resource's update mode.
    pub fn update(&self, id: &str, body: &Json) -> Result<Record, ServiceError> {
        let def = &self.def;
        let id = self.parse_id(id)?;
        let obj = validate::as_object(body)?;

        let mut sets = Vec::with_capacity(def.columns.len() + 1);
        let mut params = Vec::with_capacity(def.columns.len() + 2);

        for c in &def.columns {
            params.push(c.ty.to_sql(c.name, obj.get(c.name).unwrap_or(&Json::Null))?);
            let col = quote_ident(c.name);
            sets.push(match def.update_mode {
                UpdateMode::Coalesce => format!("{} = COALESCE(?{}, {})", col, params.len(), col),
                UpdateMode::Overwrite => format!("{} = ?{}", col, params.len()),
            });
        }
        params.push(Value::Text(now_rfc3339()));
        sets.push(format!("{} = ?{}", quote_ident(UPDATED_AT), params.len()));
        params.push(Value::Integer(id));

        let stmt = Statement {
            sql: format!(
                "UPDATE {} SET {} WHERE {} = ?{} RETURNING *",
                quote_ident(def.table),
                sets.join(", "),
                quote_ident(ID),
                params.len()
            ),
            params,
        };
        self.single(self.run(&stmt)?)
    }

    /// Delete a record by id, returning the removed row.
    pub fn delete(&self, id: &str) -> Result<Record, ServiceError> {
        let id = self.parse_id(id)?;
        let stmt = Statement {
            sql: format!(
                "DELETE FROM {} WHERE {} = ?1 RETURNING *",
                quote_ident(self.def.table),
                quote_ident(ID)
            ),
            params: vec![Value::Integer(id)],
        };
        self.single(self.run(&stmt)?)
    }

    /// The part of a request body that a write actually applies.
    pub fn changes(&self, body: &Json) -> Record {
        let mut out = Record::new();
        if let Some(obj) = body.as_object() {
            for c in &self.def.columns {
                if let Some(v) = obj.get(c.name) {
                    out.insert(c.name.to_string(), v.clone());
                }
            }
        }
        out
    }

    // Ids are store-assigned integers, so anything else cannot match a row.
    fn parse_id(&self, id: &str) -> Result<i64, ServiceError> {
        id.trim().parse::<i64>().map_err(|_| self.def.not_found())
    }

    fn single(&self, rows: Vec<Row>) -> Result<Record, ServiceError> {
        rows.first()
            .map(|row| self.to_record(row))
            .ok_or_else(|| self.def.not_found())
    }

    fn to_records(&self, rows: Vec<Row>) -> Vec<Record> {
        rows.iter().map(|row| self.to_record(row)).collect()
    }

    fn to_record(&self, row: &Row) -> Record {
        row.columns
            .iter()
            .map(|(name, value)| {
                let json = match self.def.column_type(name) {
                    Some(ty) => ty.to_json(value),
                    None => natural_json(value),
                };
                (name.clone(), json)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;
    use crate::resource::Order;
    use hrms_sql::SqliteStore;
    use serde_json::json;

    fn leave_def() -> ResourceDef {
        ResourceDef::new("leaves-attendance", "leaves_attendance", "Leave record")
            .column("employee_id", ColumnType::Text)
            .column("department", ColumnType::Text)
            .column("status", ColumnType::Text)
            .column("days", ColumnType::Number)
            .column("paid", ColumnType::Boolean)
            .column("start_date", ColumnType::Date)
            .required(&["employee_id", "start_date"])
            .filters(&["employee_id", "department", "status"])
            .order_by("start_date", Order::Desc)
            .default_limit(10)
    }

    fn make_ops(def: ResourceDef) -> ResourceOps {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let ops = ResourceOps::new(sql, def);
        ops.ensure_table().unwrap();
        ops
    }

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn id_of(record: &Record) -> String {
        record["id"].as_i64().unwrap().to_string()
    }

    #[test]
    fn ensure_table_is_idempotent() {
        let ops = make_ops(leave_def());
        ops.ensure_table().unwrap();
    }

    #[test]
    fn crud_lifecycle() {
        let ops = make_ops(leave_def());
        let created = ops
            .create(&json!({
                "employee_id": "E1",
                "department": "Engineering",
                "days": 2.5,
                "paid": true,
                "start_date": "2024-03-01",
                "ignored": "x"
            }))
            .unwrap();
        assert!(created["id"].as_i64().unwrap() > 0);
        assert_eq!(created["days"], json!(2.5));
        assert_eq!(created["paid"], json!(true));
        assert_eq!(created["status"], json!(null));
        assert!(!created.contains_key("ignored"));
        assert_eq!(created["created_at"], created["updated_at"]);

        let id = id_of(&created);
        let fetched = ops.get(&id).unwrap();
        assert_eq!(fetched, created);

        let updated = ops.update(&id, &json!({"status": "Approved"})).unwrap();
        assert_eq!(updated["status"], "Approved");
        assert_eq!(updated["employee_id"], "E1");
        assert_eq!(updated["created_at"], created["created_at"]);
        assert!(updated["updated_at"].as_str().unwrap() >= created["updated_at"].as_str().unwrap());

        let deleted = ops.delete(&id).unwrap();
        assert_eq!(deleted["status"], "Approved");
        assert!(matches!(ops.get(&id), Err(ServiceError::NotFound(_))));
        assert!(matches!(ops.delete(&id), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn whole_numbers_read_back_as_integers() {
        let ops = make_ops(leave_def());
        let whole = ops
            .create(&json!({"employee_id": "E1", "days": 3.0, "start_date": "2024-03-01"}))
            .unwrap();
        assert_eq!(whole["days"], json!(3));
        assert_ne!(whole["days"], json!(3.0));
        let fractional = ops
            .create(&json!({"employee_id": "E2", "days": 0.5, "start_date": "2024-03-01"}))
            .unwrap();
        assert_eq!(fractional["days"], json!(0.5));
    }

    #[test]
    fn out_of_range_integers_are_rejected() {
        let def = ResourceDef::new("headcount", "headcount", "Headcount")
            .column("team", ColumnType::Text)
            .column("size", ColumnType::Integer)
            .required(&["team"])
            .order_by("team", Order::Asc);
        let ops = make_ops(def);
        let err = ops.create(&json!({"team": "Core", "size": 1e20})).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m.contains("size")));
        assert_eq!(ops.list(&HashMap::new()).unwrap().total, 0);

        let created = ops.create(&json!({"team": "Core", "size": 12.0})).unwrap();
        assert_eq!(created["size"], json!(12));
    }

    #[test]
    fn create_requires_fields() {
        let ops = make_ops(leave_def());
        let err = ops.create(&json!({"employee_id": "E1"})).unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: start_date");
        let err = ops.create(&json!(["E1"])).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn coalesce_keeps_absent_and_null_fields() {
        let ops = make_ops(leave_def());
        let rec = ops
            .create(&json!({"employee_id": "E1", "start_date": "2024-01-01", "status": "Pending"}))
            .unwrap();
        let id = id_of(&rec);
        let updated = ops.update(&id, &json!({"status": null, "days": 3})).unwrap();
        assert_eq!(updated["status"], "Pending");
        assert_eq!(updated["days"], 3);
    }

    #[test]
    fn overwrite_clears_absent_fields() {
        let ops = make_ops(leave_def().update_mode(UpdateMode::Overwrite));
        let rec = ops
            .create(&json!({"employee_id": "E1", "start_date": "2024-01-01", "status": "Pending"}))
            .unwrap();
        let id = id_of(&rec);
        let updated = ops.update(&id, &json!({"employee_id": "E2"})).unwrap();
        assert_eq!(updated["employee_id"], "E2");
        assert_eq!(updated["status"], json!(null));
        assert_eq!(updated["start_date"], json!(null));
    }

    #[test]
    fn update_missing_id_creates_nothing() {
        let ops = make_ops(leave_def());
        assert!(matches!(
            ops.update("999", &json!({"status": "x"})),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            ops.update("abc", &json!({"status": "x"})),
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(ops.list(&query(&[])).unwrap().total, 0);
    }

    #[test]
    fn pagination_pages_are_disjoint() {
        let ops = make_ops(leave_def());
        for i in 0..15 {
            ops.create(&json!({"employee_id": format!("E{}", i), "start_date": "2024-01-01"}))
                .unwrap();
        }
        let first = ops.list(&query(&[("limit", "10"), ("offset", "0")])).unwrap();
        let second = ops.list(&query(&[("limit", "10"), ("offset", "10")])).unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(second.items.len(), 5);
        assert_eq!(first.total, 15);
        assert_eq!(first.params.unwrap().pagination(first.total).total_pages, 2);

        let mut ids: Vec<i64> = first
            .items
            .iter()
            .chain(second.items.iter())
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids, (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn filters_compose() {
        let ops = make_ops(leave_def());
        for (dept, status) in [
            ("Engineering", "Active"),
            ("Engineering", "Closed"),
            ("Sales", "Active"),
            ("Engineering", "Active"),
        ] {
            ops.create(&json!({
                "employee_id": "E", "start_date": "2024-01-01",
                "department": dept, "status": status
            }))
            .unwrap();
        }
        let both = ops
            .list(&query(&[("status", "Active"), ("department", "Engineering")]))
            .unwrap();
        assert_eq!(both.total, 2);
        assert!(both
            .items
            .iter()
            .all(|r| r["status"] == "Active" && r["department"] == "Engineering"));

        let none = ops.list(&query(&[("status", ""), ("unknown", "x")])).unwrap();
        assert_eq!(none.total, 4);
    }

    #[test]
    fn unpaginated_list_returns_everything() {
        let ops = make_ops(leave_def().list_mode(ListMode::All).default_limit(1));
        for _ in 0..3 {
            ops.create(&json!({"employee_id": "E", "start_date": "2024-01-01"})).unwrap();
        }
        let page = ops.list(&query(&[("limit", "1")])).unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 3);
        assert!(page.params.is_none());
    }

    #[test]
    fn list_orders_by_resource_column() {
        let ops = make_ops(leave_def());
        for date in ["2024-01-01", "2024-03-01", "2024-02-01"] {
            ops.create(&json!({"employee_id": "E", "start_date": date})).unwrap();
        }
        let page = ops.list(&query(&[])).unwrap();
        let dates: Vec<&str> = page.items.iter().map(|r| r["start_date"].as_str().unwrap()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);
    }

    #[test]
    fn bad_filter_value_is_validation_error() {
        let def = leave_def().filters(&["paid"]);
        let ops = make_ops(def);
        assert!(matches!(
            ops.list(&query(&[("paid", "maybe")])),
            Err(ServiceError::Validation(_))
        ));
        ops.create(&json!({"employee_id": "E", "start_date": "2024-01-01", "paid": false}))
            .unwrap();
        assert_eq!(ops.list(&query(&[("paid", "false")])).unwrap().total, 1);
        assert_eq!(ops.list(&query(&[("paid", "true")])).unwrap().total, 0);
    }

    #[test]
    fn storage_failures_map_to_storage_error() {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let ops = ResourceOps::new(sql, leave_def());
        // Table never created.
        assert!(matches!(ops.get("1"), Err(ServiceError::Storage(_))));
    }

    #[test]
    fn changes_keep_declared_columns_only() {
        let ops = make_ops(leave_def());
        let changes = ops.changes(&json!({"status": "Approved", "id": 9, "created_at": "x"}));
        assert_eq!(Json::Object(changes), json!({"status": "Approved"}));
    }
}
