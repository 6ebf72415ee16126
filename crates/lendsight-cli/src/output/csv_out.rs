use serde_json::Value;
use std::io::{self, Write};

use super::{cell, headers};

/// CSV rendering of an envelope.
///
/// A list result (client records, schedules) becomes one row per item with the
/// record's own column order; an object result becomes `field,value` pairs.
pub fn write_csv<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    let result = value.as_object().and_then(|m| m.get("result"));
    match (value, result) {
        (_, Some(Value::Array(rows))) | (Value::Array(rows), None) => write_rows(&mut wtr, rows)?,
        (_, Some(Value::Object(fields))) => write_pairs(&mut wtr, fields)?,
        (Value::Object(fields), None) => write_pairs(&mut wtr, fields)?,
        (_, Some(other)) | (other, None) => wtr.write_record([cell(other, "")]).map_err(into_io)?,
    }

    wtr.flush()
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> io::Result<()> {
    let Some(columns) = headers(rows) else {
        for item in rows {
            wtr.write_record([cell(item, "")]).map_err(into_io)?;
        }
        return Ok(());
    };

    wtr.write_record(&columns).map_err(into_io)?;
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = columns
                .iter()
                .map(|c| map.get(c).map(|v| cell(v, "")).unwrap_or_default())
                .collect();
            wtr.write_record(&row).map_err(into_io)?;
        }
    }
    Ok(())
}

fn write_pairs<W: Write>(
    wtr: &mut csv::Writer<W>,
    fields: &serde_json::Map<String, Value>,
) -> io::Result<()> {
    wtr.write_record(["field", "value"]).map_err(into_io)?;
    for (key, val) in fields {
        wtr.write_record([key.as_str(), &cell(val, "")]).map_err(into_io)?;
    }
    Ok(())
}

/// Keep the underlying I/O error so a closed pipe stays recognisable.
fn into_io(e: csv::Error) -> io::Error {
    let message = e.to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(inner) => inner,
        _ => io::Error::new(io::ErrorKind::InvalidData, message),
    }
}
