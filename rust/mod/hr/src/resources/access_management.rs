use hrms_store::{ColumnType::*, Order, ResourceDef};

/// System access grants. Protected and audited.
pub fn resource() -> ResourceDef {
    ResourceDef::new("access-management", "access_management", "Access record")
        .column("employee_id", Text)
        .column("employee_name", Text)
        .column("department", Text)
        .column("system_name", Text)
        .column("access_level", Text)
        .column("status", Text)
        .column("date_granted", Date)
        .column("expiry_date", Date)
        .column("approved_by", Text)
        .column("notes", Text)
        .required(&["employee_name", "system_name", "access_level"])
        .filters(&["status", "department", "employee_id", "access_level"])
        .order_by("date_granted", Order::Desc)
        .audited()
        .protected()
}
