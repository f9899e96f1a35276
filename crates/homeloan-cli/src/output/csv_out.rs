use serde_json::Value;
use std::io::{self, Write};

use super::format_scalar;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value, decimals: u32) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, value, decimals) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_csv<W: Write>(
    wtr: &mut csv::Writer<W>,
    value: &Value,
    decimals: u32,
) -> csv::Result<()> {
    match value {
        Value::Object(map) => {
            let fields = map
                .get("result")
                .and_then(Value::as_object)
                .unwrap_or(map);
            match fields.get("schedule") {
                // A schedule is the interesting part of a result that carries one
                Some(Value::Array(rows)) => write_rows(wtr, rows, decimals)?,
                _ => {
                    wtr.write_record(["field", "value"])?;
                    for (key, val) in fields {
                        match val {
                            Value::Object(inner) => {
                                for (k, v) in inner {
                                    wtr.write_record([
                                        format!("{key}.{k}"),
                                        format_scalar(v, decimals),
                                    ])?;
                                }
                            }
                            Value::Array(_) => {}
                            _ => wtr.write_record([key.clone(), format_scalar(val, decimals)])?,
                        }
                    }
                }
            }
        }
        Value::Array(rows) => write_rows(wtr, rows, decimals)?,
        _ => wtr.write_record([format_scalar(value, decimals)])?,
    }
    wtr.flush()?;
    Ok(())
}

fn write_rows<W: Write>(
    wtr: &mut csv::Writer<W>,
    rows: &[Value],
    decimals: u32,
) -> csv::Result<()> {
    let headers: Vec<String> = match rows.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => {
            for item in rows {
                wtr.write_record([format_scalar(item, decimals)])?;
            }
            return Ok(());
        }
    };
    wtr.write_record(&headers)?;

    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| {
                    map.get(h.as_str())
                        .map(|v| format_scalar(v, decimals))
                        .unwrap_or_default()
                })
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}
