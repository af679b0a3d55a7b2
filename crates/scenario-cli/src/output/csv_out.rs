use serde_json::Value;
use std::io;

use super::result_object;

const HEADER: [&str; 5] = ["section", "item", "baseline", "adjusted", "movement"];

/// Write the comparison tables as CSV to stdout, one row per metric or ratio.
/// Figures keep full precision; undefined ratios are empty cells.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    for record in csv_records(value) {
        let _ = wtr.write_record(&record);
    }
    let _ = wtr.flush();
}

pub fn csv_records(value: &Value) -> Vec<Vec<String>> {
    let mut records = vec![HEADER.iter().map(|h| h.to_string()).collect()];
    let result = result_object(value);

    for (section, label_key) in [("metrics", "metric"), ("ratios", "ratio")] {
        let Some(Value::Array(rows)) = result.get(section) else {
            continue;
        };
        for row in rows {
            let cell = |key: &str| row.get(key).map(format_csv_value).unwrap_or_default();
            records.push(vec![
                section.to_string(),
                cell(label_key),
                cell("baseline"),
                cell("adjusted"),
                cell("movement"),
            ]);
        }
    }
    records
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
