use hrms_store::{ColumnType::*, Order, ResourceDef, UpdateMode};

/// Pay runs per employee and period. Protected and audited; updates replace
/// the whole record.
pub fn resource() -> ResourceDef {
    ResourceDef::new("payroll", "payroll", "Payroll record")
        .column("employee_id", Text)
        .column("employee_name", Text)
        .column("department", Text)
        .column("pay_period", Text)
        .column("pay_date", Date)
        .column("basic_salary", Number)
        .column("allowances", Number)
        .column("deductions", Number)
        .column("net_pay", Number)
        .column("payment_method", Text)
        .column("status", Text)
        .required(&["employee_id", "employee_name", "pay_period", "basic_salary"])
        .filters(&["employee_id", "department", "status", "pay_period"])
        .order_by("pay_date", Order::Desc)
        .update_mode(UpdateMode::Overwrite)
        .audited()
        .protected()
}
