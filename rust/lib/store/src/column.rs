//! Column types and the JSON ⇄ SQL value boundary.
//!
//! Request bodies and query strings carry loosely typed data. Each column
//! declares how its values are coerced on the way in and rendered on the
//! way out, so a record reads back with the JSON types it was written with
//! (whole `Number` values excepted, see [`ColumnType::Number`]).

use hrms_core::ServiceError;
use hrms_sql::Value;
use serde_json::Value as Json;

/// Storage type of a business column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    /// Integer or decimal amount, stored with NUMERIC affinity.
    ///
    /// Whole floats come back as integers: `50.0` is read back as `50`.
    Number,
    Boolean,
    /// Calendar date as `YYYY-MM-DD` text.
    Date,
    /// RFC 3339 timestamp text.
    Timestamp,
    /// Arbitrary JSON, stored serialized.
    Json,
}

impl ColumnType {
    /// SQLite column type used in `CREATE TABLE`.
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Text | ColumnType::Date | ColumnType::Timestamp | ColumnType::Json => "TEXT",
            ColumnType::Integer | ColumnType::Boolean => "INTEGER",
            ColumnType::Number => "NUMERIC",
        }
    }

    /// Coerce a JSON body value into a bound SQL parameter.
    pub fn to_sql(self, column: &str, value: &Json) -> Result<Value, ServiceError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        match self {
            ColumnType::Text | ColumnType::Date | ColumnType::Timestamp => match value {
                Json::String(s) => Ok(Value::Text(s.clone())),
                Json::Number(n) => Ok(Value::Text(n.to_string())),
                Json::Bool(b) => Ok(Value::Text(b.to_string())),
                _ => Err(type_error(column, "a string")),
            },
            ColumnType::Integer => match value {
                Json::Number(n) => n
                    .as_i64()
                    .or_else(|| {
                        n.as_f64()
                            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                            .map(|f| f as i64)
                    })
                    .map(Value::Integer)
                    .ok_or_else(|| type_error(column, "an integer")),
                Json::String(s) => self.parse_param(column, s),
                Json::Bool(b) => Ok(Value::Integer(*b as i64)),
                _ => Err(type_error(column, "an integer")),
            },
            ColumnType::Number => match value {
                Json::Number(n) => match n.as_i64() {
                    Some(i) => Ok(Value::Integer(i)),
                    None => n
                        .as_f64()
                        .map(Value::Real)
                        .ok_or_else(|| type_error(column, "a number")),
                },
                Json::String(s) => self.parse_param(column, s),
                _ => Err(type_error(column, "a number")),
            },
            ColumnType::Boolean => match value {
                Json::Bool(b) => Ok(Value::Integer(*b as i64)),
                Json::Number(n) if n.as_i64() == Some(0) || n.as_i64() == Some(1) => {
                    Ok(Value::Integer(n.as_i64().unwrap_or_default()))
                }
                Json::String(s) => self.parse_param(column, s),
                _ => Err(type_error(column, "a boolean")),
            },
            ColumnType::Json => serde_json::to_string(value)
                .map(Value::Text)
                .map_err(|e| ServiceError::Internal(format!("serialize {}: {}", column, e))),
        }
    }

    /// Coerce a raw query-string value (filters) into a bound SQL parameter.
    pub fn parse_param(self, column: &str, raw: &str) -> Result<Value, ServiceError> {
        let trimmed = raw.trim();
        match self {
            ColumnType::Text | ColumnType::Date | ColumnType::Timestamp | ColumnType::Json => {
                Ok(Value::Text(raw.to_string()))
            }
            ColumnType::Integer => trimmed
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| type_error(column, "an integer")),
            ColumnType::Number => {
                if let Ok(i) = trimmed.parse::<i64>() {
                    return Ok(Value::Integer(i));
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(Value::Real)
                    .ok_or_else(|| type_error(column, "a number"))
            }
            ColumnType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(Value::Integer(1)),
                "false" | "0" => Ok(Value::Integer(0)),
                _ => Err(type_error(column, "a boolean")),
            },
        }
    }

    /// Render a stored value back to JSON.
    pub fn to_json(self, value: &Value) -> Json {
        match (self, value) {
            (ColumnType::Boolean, Value::Integer(i)) => Json::Bool(*i != 0),
            (ColumnType::Json, Value::Text(s)) => {
                serde_json::from_str(s).unwrap_or_else(|_| Json::String(s.clone()))
            }
            _ => natural_json(value),
        }
    }
}

/// Render a SQL value without any column knowledge.
pub fn natural_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Integer(i) => Json::from(*i),
        Value::Real(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .unwrap_or(Json::Null),
        Value::Text(s) => Json::String(s.clone()),
        Value::Blob(b) => Json::String(String::from_utf8_lossy(b).into_owned()),
    }
}

fn type_error(column: &str, expected: &str) -> ServiceError {
    ServiceError::Validation(format!("field '{}' must be {}", column, expected))
}

/// A declared business column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

impl Column {
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        Self { name, ty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_coercion() {
        let ty = ColumnType::Integer;
        assert_eq!(ty.to_sql("n", &json!(5)).unwrap(), Value::Integer(5));
        assert_eq!(ty.to_sql("n", &json!(5.0)).unwrap(), Value::Integer(5));
        assert_eq!(ty.to_sql("n", &json!(" 42 ")).unwrap(), Value::Integer(42));
        assert_eq!(ty.to_sql("n", &json!(null)).unwrap(), Value::Null);
        assert!(matches!(ty.to_sql("n", &json!(5.5)), Err(ServiceError::Validation(_))));
        assert!(matches!(ty.to_sql("n", &json!("five")), Err(ServiceError::Validation(_))));
        assert!(matches!(ty.to_sql("n", &json!([1])), Err(ServiceError::Validation(_))));
        assert!(matches!(ty.to_sql("n", &json!(1e20)), Err(ServiceError::Validation(_))));
        assert!(matches!(ty.to_sql("n", &json!(-1e20)), Err(ServiceError::Validation(_))));
        assert!(matches!(ty.to_sql("n", &json!(u64::MAX)), Err(ServiceError::Validation(_))));
        assert_eq!(ty.to_sql("n", &json!(i64::MIN)).unwrap(), Value::Integer(i64::MIN));
        assert_eq!(ty.to_sql("n", &json!(1e15)).unwrap(), Value::Integer(1_000_000_000_000_000));
    }

    #[test]
    fn number_keeps_whole_values_integral() {
        let ty = ColumnType::Number;
        assert_eq!(ty.to_sql("pay", &json!(50)).unwrap(), Value::Integer(50));
        assert_eq!(ty.to_sql("pay", &json!(12.75)).unwrap(), Value::Real(12.75));
        assert_eq!(ty.to_sql("pay", &json!("12.75")).unwrap(), Value::Real(12.75));
        assert_eq!(ty.to_json(&Value::Integer(50)), json!(50));
        assert_eq!(ty.to_json(&Value::Real(12.75)), json!(12.75));
        assert!(ty.parse_param("pay", "NaN").is_err());
    }

    #[test]
    fn boolean_round_trip() {
        let ty = ColumnType::Boolean;
        assert_eq!(ty.to_sql("b", &json!(true)).unwrap(), Value::Integer(1));
        assert_eq!(ty.to_sql("b", &json!("FALSE")).unwrap(), Value::Integer(0));
        assert_eq!(ty.to_sql("b", &json!(1)).unwrap(), Value::Integer(1));
        assert!(ty.to_sql("b", &json!(2)).is_err());
        assert_eq!(ty.to_json(&Value::Integer(1)), json!(true));
        assert_eq!(ty.to_json(&Value::Integer(0)), json!(false));
        assert_eq!(ty.to_json(&Value::Null), json!(null));
    }

    #[test]
    fn text_and_json() {
        assert_eq!(
            ColumnType::Text.to_sql("s", &json!("Ann")).unwrap(),
            Value::Text("Ann".into())
        );
        assert!(ColumnType::Date.to_sql("d", &json!({"y": 1})).is_err());

        let stored = ColumnType::Json.to_sql("c", &json!({"a": [1, 2]})).unwrap();
        assert_eq!(ColumnType::Json.to_json(&stored), json!({"a": [1, 2]}));
    }

    #[test]
    fn filter_params() {
        assert_eq!(
            ColumnType::Text.parse_param("status", "Active").unwrap(),
            Value::Text("Active".into())
        );
        assert_eq!(ColumnType::Boolean.parse_param("b", "true").unwrap(), Value::Integer(1));
        assert!(ColumnType::Integer.parse_param("n", "abc").is_err());
    }
}
