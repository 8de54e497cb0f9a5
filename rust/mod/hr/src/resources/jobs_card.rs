use hrms_store::{ColumnType::*, ListMode, Order, ResourceDef, UpdateMode, CREATED_AT};

/// Job catalogue. Listed in full, no paging.
pub fn resource() -> ResourceDef {
    ResourceDef::new("jobs-card", "jobs_card", "Job card")
        .column("job_code", Text)
        .column("job_title", Text)
        .column("department", Text)
        .column("grade", Text)
        .column("description", Text)
        .column("responsibilities", Text)
        .column("requirements", Text)
        .column("min_salary", Number)
        .column("max_salary", Number)
        .column("status", Text)
        .required(&["job_code", "job_title"])
        .filters(&["department", "grade", "status"])
        .order_by(CREATED_AT, Order::Desc)
        .default_limit(100)
        .list_mode(ListMode::All)
        .update_mode(UpdateMode::Overwrite)
}
