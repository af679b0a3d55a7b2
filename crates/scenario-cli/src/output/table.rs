use colored::Colorize;
use serde_json::{Map, Value};
use std::fmt::Write;
use tabled::{builder::Builder, Table};

use super::{display_value, result_object};

/// Column order for row tables; any other keys follow alphabetically.
const COLUMN_ORDER: [&str; 5] = ["metric", "ratio", "baseline", "adjusted", "movement"];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    print!("{}", render_table(value));
}

pub fn render_table(value: &Value) -> String {
    let mut out = String::new();
    let result = result_object(value);

    match result {
        Value::Object(res) => {
            if let Some(Value::Object(summary)) = res.get("scenario") {
                section(&mut out, "Scenario");
                out.push_str(&field_table(summary));
            }
            if let Some(Value::Array(rows)) = res.get("metrics") {
                section(&mut out, "Baseline vs Adjusted");
                out.push_str(&row_table(rows));
            }
            if let Some(Value::Array(rows)) = res.get("ratios") {
                section(&mut out, "Key Financial Ratios");
                out.push_str(&row_table(rows));
            }
            if let Some(Value::Object(notes)) = res.get("notes") {
                render_notes(&mut out, notes);
            }
            let known = ["scenario", "metrics", "ratios", "notes"];
            let rest: Map<String, Value> = res
                .iter()
                .filter(|(k, _)| !known.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            if !rest.is_empty() {
                out.push_str(&field_table(&rest));
            }
        }
        other => {
            let _ = writeln!(out, "{}", display_value(other));
        }
    }

    if let Some(envelope) = value.as_object() {
        if let Some(Value::Array(warnings)) = envelope.get("warnings") {
            if !warnings.is_empty() {
                out.push_str("\nWarnings:\n");
                for w in warnings.iter().filter_map(Value::as_str) {
                    let _ = writeln!(out, "  - {}", w);
                }
            }
        }
        if let Some(Value::String(meth)) = envelope.get("methodology") {
            let _ = writeln!(out, "\nMethodology: {}", meth);
        }
    }
    out
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{}", title.bold());
}

fn field_table(map: &Map<String, Value>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &display_value(val)]);
    }
    format!("{}\n", Table::from(builder))
}

fn row_table(rows: &[Value]) -> String {
    let Some(Value::Object(first)) = rows.first() else {
        return "(empty)\n".to_string();
    };

    let mut headers: Vec<&str> = COLUMN_ORDER
        .iter()
        .copied()
        .filter(|k| first.contains_key(*k))
        .collect();
    headers.extend(
        first
            .keys()
            .map(String::as_str)
            .filter(|k| !COLUMN_ORDER.contains(k)),
    );

    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| column_title(h)));
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(headers.iter().map(|h| match (*h, row.get(*h)) {
            ("movement", Some(Value::String(m))) => movement_arrow(m).to_string(),
            (_, Some(v)) => display_value(v),
            (_, None) => String::new(),
        }));
    }
    format!("{}\n", Table::from(builder))
}

fn column_title(key: &str) -> String {
    if key == "movement" {
        return "Change".to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    }
}

fn movement_arrow(m: &str) -> &str {
    match m {
        "up" => "↑",
        "down" => "↓",
        "unchanged" => "=",
        "undefined" => "n/a",
        other => other,
    }
}

fn render_notes(out: &mut String, notes: &Map<String, Value>) {
    if let Some(Value::Array(scenarios)) = notes.get("scenarios") {
        section(out, "What-If Scenario Descriptions");
        for note in scenarios.iter().filter_map(Value::as_object) {
            if let Some(title) = note.get("title").and_then(Value::as_str) {
                let _ = writeln!(out, "{}", title);
            }
            if let Some(Value::Array(lines)) = note.get("lines") {
                for line in lines.iter().filter_map(Value::as_str) {
                    let _ = writeln!(out, "  - {}", line);
                }
            }
        }
    }
    if let Some(Value::Array(ratios)) = notes.get("ratios") {
        section(out, "What Changes in These Ratios Mean");
        for note in ratios.iter().filter_map(Value::as_object) {
            let get = |k: &str| note.get(k).and_then(Value::as_str).unwrap_or_default();
            let _ = writeln!(
                out,
                "{}: ↑ {}; ↓ {}.",
                get("ratio"),
                get("increase"),
                get("decrease")
            );
        }
    }
}
