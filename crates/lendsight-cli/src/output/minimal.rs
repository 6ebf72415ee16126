use serde_json::Value;
use std::io::{self, Write};

use super::cell;

/// Key fields, as JSON pointers into the result, tried in order.
const PRIORITY_KEYS: [&str; 2] = ["/portfolio_overview/active_loan_balance/value", "/directory"];

/// Just the headline value of a result.
///
/// Tries [`PRIORITY_KEYS`], then falls back to the first field of an object result.
/// List results print their row count.
pub fn write_minimal<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let line = match result {
        Value::Object(map) => PRIORITY_KEYS
            .iter()
            .filter_map(|key| result.pointer(key))
            .find(|val| !val.is_null())
            .map(|val| cell(val, "null"))
            .or_else(|| {
                map.iter()
                    .next()
                    .map(|(key, val)| format!("{}: {}", key, cell(val, "null")))
            })
            .unwrap_or_default(),
        Value::Array(rows) => format!("{} rows", rows.len()),
        other => cell(other, "null"),
    };

    writeln!(out, "{}", line)?;
    out.flush()
}
