use hrms_store::{ColumnType::*, Order, ResourceDef, UpdateMode};

pub fn resource() -> ResourceDef {
    ResourceDef::new("compensation-planning", "compensation_planning", "Compensation plan")
        .column("employee_id", Text)
        .column("employee_name", Text)
        .column("department", Text)
        .column("current_salary", Number)
        .column("proposed_salary", Number)
        .column("increase_percentage", Number)
        .column("effective_date", Date)
        .column("review_cycle", Text)
        .column("status", Text)
        .column("approved_by", Text)
        .column("comments", Text)
        .required(&["employee_id", "employee_name", "current_salary", "proposed_salary"])
        .filters(&["status", "department", "review_cycle"])
        .order_by("effective_date", Order::Desc)
        .update_mode(UpdateMode::Overwrite)
        .audited()
}
