use hrms_store::{ColumnType::*, Order, ResourceDef};

pub fn resource() -> ResourceDef {
    ResourceDef::new("pre-hire-management", "pre_hire_management", "Pre-hire record")
        .column("candidate_name", Text)
        .column("email", Text)
        .column("position", Text)
        .column("department", Text)
        .column("offer_date", Date)
        .column("start_date", Date)
        .column("background_check", Text)
        .column("documents_submitted", Boolean)
        .column("status", Text)
        .required(&["candidate_name", "position"])
        .filters(&["status", "department", "background_check"])
        .order_by("offer_date", Order::Desc)
}
