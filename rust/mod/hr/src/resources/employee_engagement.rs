use hrms_store::{ColumnType::*, Order, ResourceDef, UpdateMode};

pub fn resource() -> ResourceDef {
    ResourceDef::new("employee-engagement", "employee_engagement", "Engagement survey")
        .column("employee_id", Text)
        .column("employee_name", Text)
        .column("department", Text)
        .column("survey_name", Text)
        .column("engagement_score", Number)
        .column("feedback", Text)
        .column("survey_date", Date)
        .column("anonymous", Boolean)
        .column("status", Text)
        .required(&["employee_name", "survey_name"])
        .filters(&["department", "status", "survey_name"])
        .order_by("survey_date", Order::Desc)
        .update_mode(UpdateMode::Overwrite)
}
