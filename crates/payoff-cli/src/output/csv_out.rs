use serde_json::Value;
use std::io;

use super::{cell, unwrap_result};

/// Write output as CSV to stdout.
///
/// Record arrays (schedule, chart) get a header row from the first record's
/// keys; a single result becomes `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, unwrap_result(value)) {
        eprintln!("failed to write CSV: {e}");
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    match value {
        Value::Array(rows) => match rows.first() {
            Some(Value::Object(first)) => {
                let headers: Vec<&str> = first.keys().map(String::as_str).collect();
                wtr.write_record(&headers)?;
                for row in rows.iter().filter_map(Value::as_object) {
                    let record: Vec<String> = headers
                        .iter()
                        .map(|h| row.get(*h).map(cell).unwrap_or_default())
                        .collect();
                    wtr.write_record(&record)?;
                }
            }
            _ => {
                for row in rows {
                    wtr.write_record([cell(row)])?;
                }
            }
        },
        Value::Object(fields) => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in fields {
                wtr.write_record([key.as_str(), &cell(val)])?;
            }
        }
        other => wtr.write_record([cell(other)])?,
    }
    wtr.flush()?;
    Ok(())
}
