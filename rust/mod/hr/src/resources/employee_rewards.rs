use hrms_store::{ColumnType::*, Order, ResourceDef, UpdateMode};

/// Benefit plans and their cost split.
pub fn resource() -> ResourceDef {
    ResourceDef::new("employee-rewards", "employee_rewards", "Benefit")
        .column("benefit_type", Text)
        .column("plan_name", Text)
        .column("date", Date)
        .column("coverage", Text)
        .column("employee_pays", Number)
        .column("company_pays", Number)
        .column("frequency", Text)
        .required(&["benefit_type", "plan_name", "date"])
        .filters(&["benefit_type", "coverage", "frequency"])
        .order_by("date", Order::Desc)
        .default_limit(100)
        .update_mode(UpdateMode::Overwrite)
}
