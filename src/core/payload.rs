//! Body parsing and presence checks shared by every endpoint.
//!
//! Presence follows the loose rules clients of the gateway have always relied
//! on: `null`, `false`, `0`, `""`, `[]` and `{}` all count as "not given".

use crate::utils::error::{GatewayError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parses a request body into `T`.
///
/// Returns `Ok(None)` when there is no usable payload (empty body, `null`,
/// `{}` or another falsy JSON value).
pub fn parse_payload<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>> {
    match read_json(body)? {
        Some(value) if is_truthy(&value) => decode_object(value).map(Some),
        _ => Ok(None),
    }
}

/// Parses a request body that must be a JSON object, empty or not.
///
/// Only an empty body or `null` yield `Ok(None)`; `{}` decodes to a `T`
/// with every field absent.
pub fn parse_object<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>> {
    match read_json(body)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => decode_object(value).map(Some),
    }
}

fn read_json(body: &[u8]) -> Result<Option<Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(body)?))
}

fn decode_object<T: DeserializeOwned>(value: Value) -> Result<T> {
    if !value.is_object() {
        return Err(GatewayError::InvalidPayload {
            message: format!("expected a JSON object, got {}", kind_of(&value)),
        });
    }

    serde_json::from_value(value).map_err(|e| GatewayError::InvalidPayload {
        message: e.to_string(),
    })
}

pub fn truthy(value: Option<Value>) -> Option<Value> {
    value.filter(is_truthy)
}

/// Reads a float that may arrive as a JSON number or a numeric string.
pub fn float_or_default(field: &str, raw: Option<&Value>, default: f64) -> Result<f64> {
    let invalid = |reason: String| GatewayError::InvalidField {
        field: field.to_string(),
        reason,
    };

    match raw {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| invalid(format!("{} is out of range", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(format!("could not convert '{}' to float: {}", s, e))),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(other) => Err(invalid(format!("expected a number, got {}", kind_of(other)))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ImageRequest, StatsRequest};
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(-1), json!("x"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn test_parse_payload_treats_blank_bodies_as_absent() {
        assert!(parse_payload::<ImageRequest>(b"").unwrap().is_none());
        assert!(parse_payload::<ImageRequest>(b"  \n").unwrap().is_none());
        assert!(parse_payload::<ImageRequest>(b"null").unwrap().is_none());
        assert!(parse_payload::<ImageRequest>(b"{}").unwrap().is_none());
    }

    #[test]
    fn test_parse_payload_rejects_garbage() {
        assert!(matches!(
            parse_payload::<ImageRequest>(b"{not json"),
            Err(GatewayError::MalformedBody(_))
        ));
        assert!(matches!(
            parse_payload::<ImageRequest>(b"[1, 2]"),
            Err(GatewayError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_parse_payload_keeps_field_values_untyped() {
        let req = parse_payload::<ImageRequest>(br#"{"imageName": 7, "other": 1}"#)
            .unwrap()
            .unwrap();
        assert_eq!(req.image_name, Some(json!(7)));
        assert!(req.vis_params.is_none());

        let req = parse_payload::<ImageRequest>(br#"{"imageName": false}"#)
            .unwrap()
            .unwrap();
        assert_eq!(req.image_name, Some(json!(false)));
    }

    #[test]
    fn test_parse_object_keeps_empty_objects() {
        let req = parse_object::<StatsRequest>(b"{}").unwrap().unwrap();
        assert!(req.param_type.is_none());
        assert!(req.param_value.is_none());

        assert!(parse_object::<StatsRequest>(b"").unwrap().is_none());
        assert!(parse_object::<StatsRequest>(b"null").unwrap().is_none());
        assert!(matches!(
            parse_object::<StatsRequest>(b"false"),
            Err(GatewayError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_float_or_default() {
        assert_eq!(float_or_default("scale", None, 30.0).unwrap(), 30.0);
        assert_eq!(float_or_default("scale", Some(&json!(null)), 30.0).unwrap(), 30.0);
        assert_eq!(float_or_default("scale", Some(&json!(250)), 30.0).unwrap(), 250.0);
        assert_eq!(float_or_default("scale", Some(&json!(" 10.5 ")), 30.0).unwrap(), 10.5);
        assert!(float_or_default("scale", Some(&json!("wide")), 30.0).is_err());
        assert!(float_or_default("scale", Some(&json!([30])), 30.0).is_err());
    }

    #[test]
    fn test_truthy_filter() {
        assert_eq!(truthy(Some(json!(""))), None);
        assert_eq!(truthy(Some(json!(0))), None);
        assert_eq!(truthy(Some(json!([]))), None);
        assert_eq!(truthy(Some(json!([1, 2]))), Some(json!([1, 2])));
    }
}
