use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cell, unwrap_result};

/// Render a scenario envelope as a field/value table, or an array of
/// records (schedule, chart) as one row per record.
pub fn print_table(value: &Value) {
    match unwrap_result(value) {
        Value::Array(rows) => print_rows(rows),
        Value::Object(fields) => {
            print_fields(fields);
            if let Some(envelope) = value.as_object() {
                print_notes(envelope);
            }
        }
        other => println!("{}", cell(other)),
    }
}

fn print_fields(fields: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.as_str(), &cell(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        let lines: Vec<&str> = warnings.iter().filter_map(Value::as_str).collect();
        if !lines.is_empty() {
            println!("\nWarnings:");
            for line in lines {
                println!("  - {line}");
            }
        }
    }
    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {methodology}");
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        if rows.is_empty() {
            println!("(no payments)");
        }
        for row in rows {
            println!("{}", cell(row));
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut builder = Builder::default();
    builder.push_record(headers.iter().copied());
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(*h).map(cell).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}
