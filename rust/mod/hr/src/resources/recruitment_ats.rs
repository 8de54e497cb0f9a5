use hrms_store::{ColumnType::*, Order, ResourceDef};

/// Applicant tracking.
pub fn resource() -> ResourceDef {
    ResourceDef::new("recruitment-ats", "recruitment_ats", "Candidate")
        .column("candidate_name", Text)
        .column("email", Text)
        .column("phone", Text)
        .column("position", Text)
        .column("department", Text)
        .column("source", Text)
        .column("stage", Text)
        .column("applied_date", Date)
        .column("rating", Integer)
        .column("resume_url", Text)
        .column("status", Text)
        .required(&["candidate_name", "email", "position"])
        .filters(&["position", "department", "stage", "status", "source"])
        .order_by("applied_date", Order::Desc)
        .default_limit(100)
        .audited()
}
