//! Endpoint-specific payload validation.

pub mod categories;
pub mod expenses;

use serde_json::{Map, Value};
use tracing::warn;

use crate::types::{IngestError, IngestMode, IngestReport, Rejected};

type Object = Map<String, Value>;

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Walk a JSON array, converting each object with `parse`.
fn ingest_array<T>(
    payload: &Value,
    mode: IngestMode,
    what: &'static str,
    parse: impl Fn(&Object) -> Result<T, String>,
) -> Result<IngestReport<T>, IngestError> {
    let items = payload.as_array().ok_or(IngestError::NotAnArray {
        found: json_kind(payload),
    })?;

    let mut report = IngestReport {
        accepted: Vec::with_capacity(items.len()),
        rejected: Vec::new(),
    };

    for (index, item) in items.iter().enumerate() {
        let parsed = match item.as_object() {
            Some(obj) => parse(obj),
            None => Err(format!("expected an object, got {}", json_kind(item))),
        };
        match parsed {
            Ok(record) => report.accepted.push(record),
            Err(reason) => {
                if mode == IngestMode::Strict {
                    return Err(IngestError::InvalidRecord { index, reason });
                }
                warn!(what, index, reason = %reason, "skipping malformed record");
                report.rejected.push(Rejected { index, reason });
            }
        }
    }

    Ok(report)
}

/// First present key among `keys`, which must hold a non-empty string.
/// Numeric ids are accepted and stringified.
fn string_field(obj: &Object, keys: &[&str]) -> Result<String, String> {
    let (key, value) = lookup(obj, keys)?;
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        Value::String(_) => Err(format!("field `{key}` is empty")),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("field `{key}` must be a string, got {}", json_kind(other))),
    }
}

/// First present key among `keys`, which must hold a finite number.
fn number_field(obj: &Object, keys: &[&str]) -> Result<f64, String> {
    let (key, value) = lookup(obj, keys)?;
    match value.as_f64() {
        Some(n) if n.is_finite() => Ok(n),
        Some(_) => Err(format!("field `{key}` is not finite")),
        None => Err(format!("field `{key}` must be a number, got {}", json_kind(value))),
    }
}

fn lookup<'a, 'k>(obj: &'a Object, keys: &[&'k str]) -> Result<(&'k str, &'a Value), String> {
    keys.iter()
        .find_map(|k| obj.get(*k).filter(|v| !v.is_null()).map(|v| (*k, v)))
        .ok_or_else(|| format!("missing field `{}`", keys.join("` / `")))
}
