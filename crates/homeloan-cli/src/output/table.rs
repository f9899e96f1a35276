use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::format_scalar;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value, decimals: u32) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_result_table(result, map, decimals),
            None => println!("{}", field_table(map, decimals)),
        },
        Value::Array(arr) => print_array_table(arr, decimals),
        _ => println!("{}", format_scalar(value, decimals)),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>, decimals: u32) {
    if let Value::Object(res_map) = result {
        println!("{}", field_table(res_map, decimals));

        // Nested arrays (e.g. the amortization schedule) get their own table
        for (key, val) in res_map {
            if let Value::Array(rows) = val {
                println!("\n{key}:");
                print_array_table(rows, decimals);
            }
        }
    } else {
        println!("{}", format_scalar(result, decimals));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Two-column Field/Value table. Nested objects are flattened with dotted
/// keys; arrays are skipped.
fn field_table(map: &Map<String, Value>, decimals: u32) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    push_fields(&mut builder, "", map, decimals);
    builder.build()
}

fn push_fields(builder: &mut Builder, prefix: &str, map: &Map<String, Value>, decimals: u32) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => push_fields(builder, &name, inner, decimals),
            Value::Array(_) => {}
            _ => builder.push_record([name, format_scalar(val, decimals)]),
        }
    }
}

fn print_array_table(arr: &[Value], decimals: u32) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(headers.clone());

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| format_scalar(v, decimals))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", builder.build());
    } else {
        for item in arr {
            println!("{}", format_scalar(item, decimals));
        }
    }
}
