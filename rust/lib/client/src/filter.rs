//! Post-fetch filtering over an already-loaded record set.
//!
//! Pure and synchronous: the visible set is re-derived from the full fetched
//! set every time, so applying the same filter twice changes nothing.

use serde::Serialize;
use serde_json::Value;

/// Search text plus exact-match pairs, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    search: String,
    search_fields: Vec<String>,
    exact: Vec<(String, String)>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring search over `fields`.
    pub fn search(text: impl Into<String>, fields: &[&str]) -> Self {
        Self::new().with_search(text, fields)
    }

    pub fn with_search(mut self, text: impl Into<String>, fields: &[&str]) -> Self {
        self.search = text.into();
        self.search_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Require `field` to equal `value`. An empty value disables the pair.
    pub fn with_exact(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.exact.push((field.into(), value.into()));
        self
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.exact.iter().all(|(_, v)| v.is_empty())
    }

    pub fn matches(&self, record: &Value) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = self.search_fields.iter().any(|field| {
                field_text(record, field).is_some_and(|text| text.to_lowercase().contains(&needle))
            });
            if !hit {
                return false;
            }
        }
        self.exact
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .all(|(field, value)| field_text(record, field).as_deref() == Some(value.as_str()))
    }

    /// Keep the matching items, preserving order.
    pub fn apply<T: Serialize>(&self, items: Vec<T>) -> Vec<T> {
        if self.is_empty() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| {
                serde_json::to_value(item)
                    .map(|v| self.matches(&v))
                    .unwrap_or(false)
            })
            .collect()
    }
}

/// Textual form of a scalar field. Null, missing and nested values have none.
fn field_text(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn employees() -> Vec<Value> {
        vec![
            json!({"id": 1, "employee_name": "Ann Lee", "department": "Engineering", "status": "Active"}),
            json!({"id": 2, "employee_name": "Bob Ng", "department": "Sales", "status": "Active"}),
            json!({"id": 3, "employee_name": null, "department": "Engineering", "status": "Closed"}),
        ]
    }

    #[test]
    fn search_is_case_insensitive() {
        let out = RecordFilter::search("an", &["employee_name"]).apply(employees());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["employee_name"], "Ann Lee");

        let out = RecordFilter::search("LEE", &["employee_name"]).apply(employees());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn search_any_field() {
        let out = RecordFilter::search("sales", &["employee_name", "department"]).apply(employees());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["id"], 2);
    }

    #[test]
    fn numbers_match_textually() {
        let out = RecordFilter::search("3", &["id"]).apply(employees());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["id"], 3);
    }

    #[test]
    fn exact_and_search_combine() {
        let f = RecordFilter::search("e", &["employee_name"]).with_exact("department", "Engineering");
        let out = f.apply(employees());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["id"], 1);
    }

    #[test]
    fn empty_values_disable_predicates() {
        let f = RecordFilter::search("", &["employee_name"]).with_exact("status", "");
        assert!(f.is_empty());
        assert_eq!(f.apply(employees()).len(), 3);
    }

    #[test]
    fn exact_requires_equality() {
        let out = RecordFilter::new().with_exact("status", "Active").apply(employees());
        let ids: Vec<i64> = out.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(RecordFilter::new().with_exact("status", "active").apply(employees()).is_empty());
    }

    #[test]
    fn applying_twice_is_stable() {
        let f = RecordFilter::search("n", &["employee_name"]).with_exact("status", "Active");
        let once = f.apply(employees());
        let twice = f.apply(once.clone());
        assert_eq!(once, twice);
    }

    #[derive(Serialize, Debug, PartialEq)]
    struct Reward {
        plan_name: String,
        coverage: String,
    }

    #[test]
    fn typed_records() {
        let rewards = vec![
            Reward { plan_name: "Gold Health".into(), coverage: "Family".into() },
            Reward { plan_name: "Basic Dental".into(), coverage: "Employee".into() },
        ];
        let out = RecordFilter::search("gold", &["plan_name"]).apply(rewards);
        assert_eq!(out, vec![Reward { plan_name: "Gold Health".into(), coverage: "Family".into() }]);
    }
}
