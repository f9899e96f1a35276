use serde_json::Value;

use super::round_tree;

pub fn print_yaml(value: &Value, decimals: u32) {
    match serde_yaml::to_string(&round_tree(value, decimals)) {
        Ok(s) => print!("{}", s),
        Err(e) => eprintln!("YAML serialization error: {}", e),
    }
}
