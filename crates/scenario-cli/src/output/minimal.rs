use serde_json::Value;

use super::{display_value, result_object};

/// Print one line per ratio: `name: baseline -> adjusted`.
///
/// Falls back to the first result field when there are no ratio rows.
pub fn print_minimal(value: &Value) {
    for line in minimal_lines(value) {
        println!("{}", line);
    }
}

pub fn minimal_lines(value: &Value) -> Vec<String> {
    let result = result_object(value);

    if let Some(Value::Array(rows)) = result.get("ratios") {
        return rows
            .iter()
            .map(|row| {
                let name = row.get("ratio").and_then(Value::as_str).unwrap_or("?");
                let baseline = row.get("baseline").map(display_value).unwrap_or_default();
                match row.get("adjusted") {
                    Some(adjusted) => format!("{}: {} -> {}", name, baseline, display_value(adjusted)),
                    None => format!("{}: {}", name, baseline),
                }
            })
            .collect();
    }

    match result {
        Value::Object(map) => map
            .iter()
            .next()
            .map(|(key, val)| vec![format!("{}: {}", key, display_value(val))])
            .unwrap_or_default(),
        other => vec![display_value(other)],
    }
}
