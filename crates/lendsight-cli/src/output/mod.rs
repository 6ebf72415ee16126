pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;
use std::io;

/// Render a command's envelope to stdout in the format picked by `--output`.
pub fn format_output(format: &OutputFormat, value: &Value) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => json::write_json(&mut out, value),
        OutputFormat::Table => table::write_table(&mut out, value),
        OutputFormat::Csv => csv_out::write_csv(&mut out, value),
        OutputFormat::Minimal => minimal::write_minimal(&mut out, value),
    }
}

/// Scalar cell text. Nested values are inlined as compact JSON.
pub(crate) fn cell(value: &Value, null: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => null.to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Header row for a list of objects, in the first row's key order.
pub(crate) fn headers(rows: &[Value]) -> Option<Vec<String>> {
    match rows.first() {
        Some(Value::Object(first)) => Some(first.keys().cloned().collect()),
        _ => None,
    }
}
