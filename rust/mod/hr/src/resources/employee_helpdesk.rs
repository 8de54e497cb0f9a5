use hrms_store::{ColumnType::*, Order, ResourceDef, CREATED_AT};

/// Helpdesk tickets raised by employees.
pub fn resource() -> ResourceDef {
    ResourceDef::new("employee-helpdesk", "employee_helpdesk", "Ticket")
        .column("ticket_number", Text)
        .column("employee_id", Text)
        .column("employee_name", Text)
        .column("category", Text)
        .column("subject", Text)
        .column("description", Text)
        .column("priority", Text)
        .column("status", Text)
        .column("assigned_to", Text)
        .column("resolution", Text)
        .column("resolved_at", Timestamp)
        .required(&["employee_name", "subject", "category"])
        .filters(&["status", "priority", "category", "assigned_to"])
        .order_by(CREATED_AT, Order::Desc)
        .audited()
}
