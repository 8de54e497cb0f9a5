use hrms_store::{ColumnType::*, Order, ResourceDef};

/// Leave requests.
pub fn resource() -> ResourceDef {
    ResourceDef::new("leaves-attendance", "leaves_attendance", "Leave record")
        .column("employee_id", Text)
        .column("employee_name", Text)
        .column("department", Text)
        .column("leave_type", Text)
        .column("start_date", Date)
        .column("end_date", Date)
        .column("days", Number)
        .column("reason", Text)
        .column("status", Text)
        .column("approved_by", Text)
        .required(&["employee_id", "leave_type", "start_date", "end_date"])
        .filters(&["employee_id", "leave_type", "status", "department"])
        .order_by("start_date", Order::Desc)
        .audited()
}
