use hrms_store::{ColumnType::*, Order, ResourceDef};

pub fn resource() -> ResourceDef {
    ResourceDef::new("employee-onboarding", "employee_onboarding", "Onboarding record")
        .column("employee_id", Text)
        .column("employee_name", Text)
        .column("position", Text)
        .column("department", Text)
        .column("start_date", Date)
        .column("manager", Text)
        .column("buddy", Text)
        .column("checklist_completed", Boolean)
        .column("orientation_date", Date)
        .column("status", Text)
        .required(&["employee_name", "position", "department", "start_date"])
        .filters(&["status", "department"])
        .order_by("start_date", Order::Desc)
        .audited()
}
