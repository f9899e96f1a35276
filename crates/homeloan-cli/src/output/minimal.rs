use serde_json::Value;

use super::format_scalar;

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in priority order, then falls back to
/// the first field of the result object.
pub fn print_minimal(value: &Value, decimals: u32) {
    println!("{}", minimal_line(value, decimals));
}

fn minimal_line(value: &Value, decimals: u32) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["monthly_installment", "tier", "emi_to_income_ratio_percent"];

    match result_obj {
        Value::Object(map) => {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        return format_scalar(val, decimals);
                    }
                }
            }
            match map.iter().next() {
                Some((key, val)) => format!("{}: {}", key, format_scalar(val, decimals)),
                None => String::new(),
            }
        }
        // Comparison rows and schedules: one line per entry
        Value::Array(rows) => rows
            .iter()
            .map(|row| match row {
                Value::Object(map) => {
                    let label = map
                        .get("lender")
                        .or_else(|| map.get("year"))
                        .map(|v| format_scalar(v, decimals))
                        .unwrap_or_default();
                    let figure = map
                        .get("monthly_installment")
                        .or_else(|| map.get("closing_balance"))
                        .map(|v| format_scalar(v, decimals))
                        .unwrap_or_default();
                    format!("{label}\t{figure}")
                }
                other => format_scalar(other, decimals),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => format_scalar(other, decimals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_monthly_installment() {
        let v = json!({"result": {"loan_amount": "4000000", "monthly_installment": "34712.9293"}});
        assert_eq!(minimal_line(&v, 0), "34713");
    }

    #[test]
    fn test_rows() {
        let v = json!([{"lender": "A", "monthly_installment": "100.456"}]);
        assert_eq!(minimal_line(&v, 2), "A\t100.46");
    }
}
