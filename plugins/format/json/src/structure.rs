//! Table → JSON document conversion.
//!
//! Column names are paths: `a.b` places the value under `{"a": {"b": …}}`.
//! A back-quoted segment is taken literally, so `` `a.b` `` is a single key.

use serde_json::{Map, Number, Value as JsonValue};

use flatq_api::{EncodeError, Value, convert_field_contents};

/// Split a column name into object keys.
pub fn parse_path(name: &str) -> Result<Vec<String>, EncodeError> {
    let mut keys = Vec::new();
    let mut key = String::new();
    let mut quoted = false;
    let mut chars = name.chars();

    while let Some(c) = chars.next() {
        match c {
            '`' => quoted = !quoted,
            '\\' if quoted => match chars.next() {
                Some(next) => key.push(next),
                None => key.push('\\'),
            },
            '.' if !quoted => {
                if key.is_empty() {
                    return Err(EncodeError::structure(format!("invalid path {name:?}")));
                }
                keys.push(std::mem::take(&mut key));
            }
            other => key.push(other),
        }
    }
    if quoted || key.is_empty() {
        return Err(EncodeError::structure(format!("invalid path {name:?}")));
    }
    keys.push(key);
    Ok(keys)
}

/// Reject header layouts where one path is a prefix of another, or two
/// paths are the same: the key would have to be both a value and an object.
fn check_paths(paths: &[Vec<String>]) -> Result<(), EncodeError> {
    for (i, a) in paths.iter().enumerate() {
        for b in &paths[i + 1..] {
            let n = a.len().min(b.len());
            if a[..n] == b[..n] {
                let key = a[..n].join(".");
                return Err(EncodeError::structure(if a.len() == b.len() {
                    format!("key {key:?} is duplicated")
                } else {
                    format!("key {key:?} is used both as a value and as an object")
                }));
            }
        }
    }
    Ok(())
}

fn json_value(value: &Value) -> Result<JsonValue, EncodeError> {
    let contents = convert_field_contents(value, false);
    if contents.is_absent() {
        return Ok(JsonValue::Null);
    }
    let json = match value {
        Value::Integer(i) => JsonValue::Number((*i).into()),
        Value::Float(f) => Number::from_f64(*f)
            .map(JsonValue::Number)
            .ok_or_else(|| EncodeError::structure(format!("{} is not a valid JSON number", contents.text)))?,
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Ternary(t) => t.to_bool().map_or(JsonValue::Null, JsonValue::Bool),
        Value::String(_) | Value::Datetime(_) => JsonValue::String(contents.text),
        Value::Null => JsonValue::Null,
    };
    Ok(json)
}

fn insert(object: &mut Map<String, JsonValue>, path: &[String], value: JsonValue) {
    match path {
        [] => {}
        [last] => {
            object.insert(last.clone(), value);
        }
        [first, rest @ ..] => {
            let child = object
                .entry(first.clone())
                .or_insert_with(|| JsonValue::Object(Map::new()));
            if let JsonValue::Object(child) = child {
                insert(child, rest, value);
            }
        }
    }
}

/// Array of one object per record.
pub fn table_to_json(header: &[String], records: &[Vec<Value>]) -> Result<JsonValue, EncodeError> {
    let paths = header
        .iter()
        .map(|h| parse_path(h))
        .collect::<Result<Vec<_>, _>>()?;
    check_paths(&paths)?;

    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let mut object = Map::new();
        for (path, value) in paths.iter().zip(record) {
            insert(&mut object, path, json_value(value)?);
        }
        rows.push(JsonValue::Object(object));
    }
    Ok(JsonValue::Array(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatq_api::Ternary;
    use serde_json::json;

    fn names(h: &[&str]) -> Vec<String> {
        h.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn paths() {
        assert_eq!(parse_path("a").unwrap(), vec!["a"]);
        assert_eq!(parse_path("a.b").unwrap(), vec!["a", "b"]);
        assert_eq!(parse_path("`a.b`.c").unwrap(), vec!["a.b", "c"]);
        assert_eq!(parse_path("count(*)").unwrap(), vec!["count(*)"]);
        assert!(parse_path("a..b").is_err());
        assert!(parse_path("a.").is_err());
        assert!(parse_path("`a").is_err());
    }

    #[test]
    fn flat_and_nested_objects() {
        let doc = table_to_json(
            &names(&["id", "item.name", "item.price"]),
            &[vec![Value::Integer(1), Value::string("pen"), Value::Float(1.5)]],
        )
        .unwrap();
        assert_eq!(doc, json!([{"id": 1, "item": {"name": "pen", "price": 1.5}}]));
    }

    #[test]
    fn absent_values_become_null() {
        let doc = table_to_json(
            &names(&["a", "b", "c"]),
            &[vec![Value::Null, Value::Ternary(Ternary::Unknown), Value::Ternary(Ternary::False)]],
        )
        .unwrap();
        assert_eq!(doc, json!([{"a": null, "b": null, "c": false}]));
    }

    #[test]
    fn conflicting_paths() {
        let err = table_to_json(&names(&["a", "a.b"]), &[]).unwrap_err();
        assert_eq!(err.to_string(), "key \"a\" is used both as a value and as an object");

        let err = table_to_json(&names(&["a", "a"]), &[]).unwrap_err();
        assert_eq!(err.to_string(), "key \"a\" is duplicated");
    }

    #[test]
    fn non_finite_float() {
        let err = table_to_json(&names(&["f"]), &[vec![Value::Float(f64::NAN)]]).unwrap_err();
        assert_eq!(err.to_string(), "NaN is not a valid JSON number");
    }
}
