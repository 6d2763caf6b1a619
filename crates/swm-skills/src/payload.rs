//! Field extraction for skill payloads.

use swm_core::SkillError;
use serde_json::Value;

pub(crate) fn require<'a>(payload: Option<&'a Value>, skill: &str) -> Result<&'a Value, SkillError> {
    payload.ok_or_else(|| format!("{} requires payload: {{ operation: string, ... }}", skill).into())
}

pub(crate) fn operation(payload: &Value) -> Result<&str, SkillError> {
    str_field(payload, "operation")
}

pub(crate) fn str_field<'a>(payload: &'a Value, name: &str) -> Result<&'a str, SkillError> {
    opt_str(payload, name).ok_or_else(|| format!("{} required", name).into())
}

/// Missing, null and non-string fields all read as `None`.
pub(crate) fn opt_str<'a>(payload: &'a Value, name: &str) -> Option<&'a str> {
    payload.get(name).and_then(Value::as_str)
}

pub(crate) fn opt_bool(payload: &Value, name: &str) -> Option<bool> {
    payload.get(name).and_then(Value::as_bool)
}

pub(crate) fn opt_f64(payload: &Value, name: &str) -> Option<f64> {
    payload.get(name).and_then(Value::as_f64)
}

/// Lenient parse: unrecognised values behave as if the field were absent.
pub(crate) fn opt_parse<T: std::str::FromStr>(payload: &Value, name: &str) -> Option<T> {
    opt_str(payload, name).and_then(|s| s.parse().ok())
}

pub(crate) fn unknown_operation(skill: &str, op: &str) -> SkillError {
    format!("{}: unknown operation '{}'", skill, op).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fields_read_leniently() {
        let p = json!({ "operation": "search", "n": 2.5, "flag": true, "bad": 1 });
        assert_eq!(operation(&p).unwrap(), "search");
        assert_eq!(opt_f64(&p, "n"), Some(2.5));
        assert_eq!(opt_bool(&p, "flag"), Some(true));
        assert!(opt_str(&p, "bad").is_none());
        assert!(str_field(&p, "missing").is_err());
        assert!(require(None, "X").is_err());
    }
}
