pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;
pub mod yaml;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value, decimals: u32) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value, decimals),
        OutputFormat::Csv => csv_out::print_csv(value, decimals),
        OutputFormat::Minimal => minimal::print_minimal(value, decimals),
        OutputFormat::Yaml => yaml::print_yaml(value, decimals),
    }
}

/// Render a scalar for humans. Decimal amounts arrive as strings and are
/// rounded to `decimals` places; everything else passes through.
pub fn format_scalar(value: &Value, decimals: u32) -> String {
    match value {
        Value::String(s) => match s.parse::<Decimal>() {
            Ok(d) => d.round_dp(decimals).to_string(),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Round every decimal string in a JSON tree.
pub fn round_tree(value: &Value, decimals: u32) -> Value {
    match value {
        Value::String(_) => Value::String(format_scalar(value, decimals)),
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| round_tree(v, decimals)).collect())
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), round_tree(v, decimals)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_scalar_rounds_decimal_strings() {
        assert_eq!(format_scalar(&json!("34712.929334621"), 2), "34712.93");
        assert_eq!(format_scalar(&json!("Good"), 2), "Good");
        assert_eq!(format_scalar(&json!(20), 2), "20");
    }

    #[test]
    fn test_round_tree_nested() {
        let v = json!({"a": {"b": "1.23456"}, "c": ["2.5551", "x"]});
        let r = round_tree(&v, 2);
        assert_eq!(r["a"]["b"], "1.23");
        assert_eq!(r["c"][0], "2.56");
        assert_eq!(r["c"][1], "x");
    }
}
