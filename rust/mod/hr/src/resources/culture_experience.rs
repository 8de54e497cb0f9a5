use hrms_store::{ColumnType::*, ListMode, Order, ResourceDef};

/// Culture events and initiatives. Listed in full, no paging.
pub fn resource() -> ResourceDef {
    ResourceDef::new("culture-experience", "culture_experience", "Culture initiative")
        .column("title", Text)
        .column("category", Text)
        .column("description", Text)
        .column("event_date", Date)
        .column("organizer", Text)
        .column("participants", Integer)
        .column("satisfaction_score", Number)
        .column("status", Text)
        .required(&["title", "category"])
        .filters(&["category", "status"])
        .order_by("event_date", Order::Desc)
        .default_limit(100)
        .list_mode(ListMode::All)
}
