use serde_json::Value;

use super::{cell, unwrap_result};

/// Fields that best answer "what did that come to", most telling first.
const HEADLINE_FIELDS: [&str; 5] = [
    "answer",
    "interest_saved",
    "months_saved",
    "monthly_payment",
    "status",
];

/// Print just the headline value.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result = unwrap_result(value);
    match result {
        Value::Object(map) => HEADLINE_FIELDS
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !v.is_null()))
            .map(cell)
            .or_else(|| map.iter().next().map(|(k, v)| format!("{k}: {}", cell(v))))
            .unwrap_or_default(),
        // Schedules and charts: the last row says where the loan ends up.
        Value::Array(rows) => rows
            .last()
            .map(|row| serde_json::to_string(row).unwrap_or_default())
            .unwrap_or_default(),
        other => cell(other),
    }
}
