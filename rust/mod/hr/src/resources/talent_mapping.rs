use hrms_store::{ColumnType::*, Order, ResourceDef};

/// Nine-box talent assessments.
pub fn resource() -> ResourceDef {
    ResourceDef::new("talent-mapping", "talent_mapping", "Talent assessment")
        .column("employee_id", Text)
        .column("employee_name", Text)
        .column("department", Text)
        .column("performance_rating", Integer)
        .column("potential_rating", Integer)
        .column("nine_box_position", Text)
        .column("flight_risk", Text)
        .column("successor_for", Text)
        .column("assessment_date", Date)
        .column("notes", Text)
        .required(&["employee_id", "employee_name"])
        .filters(&["department", "nine_box_position", "flight_risk"])
        .order_by("assessment_date", Order::Desc)
        .audited()
}
