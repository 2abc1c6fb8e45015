//! Content normalization for incoming room records
//!
//! Room records arrive from spreadsheets and admin forms, so numbers come in
//! as strings and flags as free-form words. Everything here is pure.
//!
//! Flag truth table (after rendering to a string, lowercasing, trimming):
//!
//! | input                            | result  |
//! |----------------------------------|---------|
//! | `"no"`, `" NO "`, `["no"]`       | `false` |
//! | absent, `null`                   | `true`  |
//! | `"si"`, `"yes"`, `""`, `"false"` | `true`  |
//! | `false`, `0`, any other value    | `true`  |

use serde_json::{Number, Value};

use crate::store::Document;

/// Fields coerced to numbers; unparseable input becomes `0`
pub const NUMERIC_FIELDS: [&str; 4] = ["precio_noche", "camas", "banos", "capacidad"];

/// Fields coerced to booleans; only `"no"` is `false`
pub const FLAG_FIELDS: [&str; 3] = ["wifi", "destacada", "disponible"];

/// Normalize a free-form flag value
pub fn normalize_flag(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(v) => string_form(v).to_lowercase().trim() != "no",
    }
}

/// Normalize a loosely-typed number; not-a-number and non-finite become `0`
pub fn normalize_number(value: Option<&Value>) -> Value {
    let n = coerce_number(value)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0);
    number_value(n)
}

/// Shallow copy of `record` with numeric and flag fields normalized
pub fn normalize_room(record: &Document) -> Document {
    let mut normalized = record.clone();

    for field in NUMERIC_FIELDS {
        normalized.insert(field.to_string(), normalize_number(record.get(field)));
    }
    for field in FLAG_FIELDS {
        normalized.insert(field.to_string(), Value::Bool(normalize_flag(record.get(field))));
    }

    normalized
}

/// The document key a record is written under.
///
/// Absent or falsy ids (`null`, `""`, `false`, `0`) yield `None` and the
/// record is skipped. Arrays and objects are not usable keys either.
pub fn document_key(record: &Document) -> Option<String> {
    match record.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().map_or(false, |f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Loose truthiness of a stored value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn string_form(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => string_form(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [Value::Null] => Some(0.0),
            [single] => parse_numeric(&string_form(single)),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

fn parse_numeric(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    let head = s.get(..2).map(str::to_ascii_lowercase);
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if head.as_deref() == Some(prefix) {
            let digits = &s[2..];
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    // Rust accepts "inf"/"nan" spellings; those end up as 0 via the finite check.
    s.parse::<f64>().ok()
}

fn number_value(n: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or_else(|| Value::from(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_flag_truth_table() {
        let cases = [
            (json!("no"), false),
            (json!("No"), false),
            (json!("  NO  "), false),
            (json!(["no"]), false),
            (json!("si"), true),
            (json!("yes"), true),
            (json!("true"), true),
            (json!("false"), true),
            (json!(""), true),
            (json!("nope"), true),
            (json!(false), true),
            (json!(true), true),
            (json!(0), true),
            (json!({"no": "no"}), true),
            (json!(null), true),
        ];

        for (input, expected) in cases {
            assert_eq!(normalize_flag(Some(&input)), expected, "input: {}", input);
        }
        assert!(normalize_flag(None));
    }

    #[test]
    fn test_number_from_strings() {
        assert_eq!(normalize_number(Some(&json!("120"))), json!(120));
        assert_eq!(normalize_number(Some(&json!(" 99.5 "))), json!(99.5));
        assert_eq!(normalize_number(Some(&json!("1e3"))), json!(1000));
        assert_eq!(normalize_number(Some(&json!("0x10"))), json!(16));
        assert_eq!(normalize_number(Some(&json!("0b101"))), json!(5));
        assert_eq!(normalize_number(Some(&json!(""))), json!(0));
    }

    #[test]
    fn test_non_numeric_becomes_zero() {
        for input in [
            json!("abc"),
            json!("12abc"),
            json!("0x"),
            json!("-0x10"),
            json!("inf"),
            json!("NaN"),
            json!({"precio": 1}),
            json!([1, 2]),
        ] {
            assert_eq!(normalize_number(Some(&input)), json!(0), "input: {}", input);
        }
        assert_eq!(normalize_number(None), json!(0));
    }

    #[test]
    fn test_number_from_other_json_types() {
        assert_eq!(normalize_number(Some(&json!(3))), json!(3));
        assert_eq!(normalize_number(Some(&json!(2.0))), json!(2));
        assert_eq!(normalize_number(Some(&json!(-4))), json!(-4));
        assert_eq!(normalize_number(Some(&json!(true))), json!(1));
        assert_eq!(normalize_number(Some(&json!(null))), json!(0));
        assert_eq!(normalize_number(Some(&json!(["7"]))), json!(7));
        assert_eq!(normalize_number(Some(&json!([]))), json!(0));
    }

    #[test]
    fn test_normalize_room_passes_other_fields_through() {
        let input = record(json!({
            "id": "r1",
            "nombre": "Suite Jardín",
            "precio_noche": "120",
            "camas": "2",
            "wifi": "No",
            "galeria": {"cama": "a.jpg", "bano": "b.jpg", "closet": "c.jpg", "otras": ["d.jpg"]},
            "amenidades": ["TV", "Minibar"],
            "extra": 42
        }));

        let normalized = normalize_room(&input);

        assert_eq!(normalized["id"], json!("r1"));
        assert_eq!(normalized["nombre"], json!("Suite Jardín"));
        assert_eq!(normalized["precio_noche"], json!(120));
        assert_eq!(normalized["camas"], json!(2));
        assert_eq!(normalized["banos"], json!(0));
        assert_eq!(normalized["capacidad"], json!(0));
        assert_eq!(normalized["wifi"], json!(false));
        assert_eq!(normalized["destacada"], json!(true));
        assert_eq!(normalized["disponible"], json!(true));
        assert_eq!(normalized["galeria"], input["galeria"]);
        assert_eq!(normalized["amenidades"], json!(["TV", "Minibar"]));
        assert_eq!(normalized["extra"], json!(42));
    }

    #[test]
    fn test_document_key() {
        assert_eq!(document_key(&record(json!({"id": "hab_001"}))), Some("hab_001".into()));
        assert_eq!(document_key(&record(json!({"id": 7}))), Some("7".into()));
        assert_eq!(document_key(&record(json!({"id": ""}))), None);
        assert_eq!(document_key(&record(json!({"id": 0}))), None);
        assert_eq!(document_key(&record(json!({"id": null}))), None);
        assert_eq!(document_key(&record(json!({"id": false}))), None);
        assert_eq!(document_key(&record(json!({"id": ["a"]}))), None);
        assert_eq!(document_key(&record(json!({"nombre": "Suite"}))), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!("no")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!([])));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
    }
}
