use hrms_store::{ColumnType::*, Order, ResourceDef};

/// Open positions and headcount requests.
pub fn resource() -> ResourceDef {
    ResourceDef::new("employee-staffing", "employee_staffing", "Staffing request")
        .column("position_title", Text)
        .column("department", Text)
        .column("location", Text)
        .column("headcount", Integer)
        .column("filled", Integer)
        .column("employment_type", Text)
        .column("hiring_manager", Text)
        .column("budget", Number)
        .column("status", Text)
        .column("requested_date", Date)
        .required(&["position_title", "department"])
        .filters(&["department", "status", "employment_type", "location"])
        .order_by("requested_date", Order::Desc)
}
