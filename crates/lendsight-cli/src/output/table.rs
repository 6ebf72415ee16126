use serde_json::{Map, Value};
use std::io::{self, Write};
use tabled::{builder::Builder, Table};

use super::{cell, headers};

/// Table rendering of an envelope.
///
/// Scalar result fields share one `Field | Value` table. Nested lists and objects
/// (the sections of the analytics bundle) each get their own titled table, and a
/// list result (client records, schedules) is one row per item.
pub fn write_table<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    match value {
        Value::Object(envelope) => match envelope.get("result") {
            Some(result) => {
                write_result(out, result)?;
                write_footer(out, envelope)
            }
            None => write_fields(out, envelope),
        },
        Value::Array(rows) => write_rows(out, rows),
        other => writeln!(out, "{}", cell(other, "null")),
    }
}

fn write_result<W: Write>(out: &mut W, result: &Value) -> io::Result<()> {
    let fields = match result {
        Value::Object(fields) => fields,
        Value::Array(rows) => return write_rows(out, rows),
        other => return writeln!(out, "{}", cell(other, "null")),
    };

    let scalars: Map<String, Value> = fields
        .iter()
        .filter(|(_, v)| !is_nested(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if !scalars.is_empty() {
        write_fields(out, &scalars)?;
    }

    for (key, section) in fields.iter().filter(|(_, v)| is_nested(v)) {
        writeln!(out, "\n{}", key)?;
        match section {
            Value::Array(rows) => write_rows(out, rows)?,
            Value::Object(inner) => write_fields(out, inner)?,
            _ => {}
        }
    }
    Ok(())
}

fn is_nested(value: &Value) -> bool {
    matches!(value, Value::Object(_))
        || matches!(value, Value::Array(items) if items.iter().any(Value::is_object))
}

fn write_fields<W: Write>(out: &mut W, fields: &Map<String, Value>) -> io::Result<()> {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.as_str(), &cell(val, "null")]);
    }
    writeln!(out, "{}", Table::from(builder))
}

fn write_rows<W: Write>(out: &mut W, rows: &[Value]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "(empty)");
    }

    let Some(columns) = headers(rows) else {
        for item in rows {
            writeln!(out, "{}", cell(item, "null"))?;
        }
        return Ok(());
    };

    let mut builder = Builder::default();
    builder.push_record(&columns);
    for item in rows {
        if let Value::Object(map) = item {
            builder.push_record(
                columns
                    .iter()
                    .map(|c| map.get(c).map(|v| cell(v, "null")).unwrap_or_default()),
            );
        }
    }
    writeln!(out, "{}", Table::from(builder))
}

fn write_footer<W: Write>(out: &mut W, envelope: &Map<String, Value>) -> io::Result<()> {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            writeln!(out, "\nWarnings:")?;
            for w in warnings.iter().filter_map(Value::as_str) {
                writeln!(out, "  - {}", w)?;
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        writeln!(out, "\nMethodology: {}", meth)?;
    }

    // Runs are reproducible from their seed
    if let Some(seed) = envelope.get("metadata").and_then(|m| m.get("seed")) {
        writeln!(out, "Seed: {}", seed)?;
    }
    out.flush()
}
