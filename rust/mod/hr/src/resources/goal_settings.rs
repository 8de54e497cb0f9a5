use hrms_store::{ColumnType::*, Order, ResourceDef};

pub fn resource() -> ResourceDef {
    ResourceDef::new("goal-settings", "goal_settings", "Goal")
        .column("employee_id", Text)
        .column("employee_name", Text)
        .column("department", Text)
        .column("goal_title", Text)
        .column("description", Text)
        .column("category", Text)
        .column("target_date", Date)
        .column("progress", Integer)
        .column("weight", Number)
        .column("status", Text)
        .required(&["employee_id", "goal_title"])
        .filters(&["employee_id", "status", "category", "department"])
        .order_by("target_date", Order::Desc)
        .audited()
}
