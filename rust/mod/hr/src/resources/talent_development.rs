use hrms_store::{ColumnType::*, Order, ResourceDef, UpdateMode};

pub fn resource() -> ResourceDef {
    ResourceDef::new("talent-development", "talent_development", "Training record")
        .column("employee_id", Text)
        .column("employee_name", Text)
        .column("department", Text)
        .column("program_name", Text)
        .column("provider", Text)
        .column("start_date", Date)
        .column("end_date", Date)
        .column("cost", Number)
        .column("completion_percentage", Integer)
        .column("status", Text)
        .required(&["employee_id", "program_name"])
        .filters(&["department", "status", "program_name"])
        .order_by("start_date", Order::Desc)
        .update_mode(UpdateMode::Overwrite)
}
