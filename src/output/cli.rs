//! Plain text report
//!
//! Each finger gets a section with its status and runtime. Successful data
//! is printed one block per entry, failures show the error kind and message.

use crate::finger::{FingerResult, HandResult};
use crate::Result;
use serde_json::Value;
use std::io::Write;

/// Writes the text report for a poke result
pub fn render_cli<W: Write>(result: &HandResult, writer: &mut W) -> Result<()> {
    writer.write_all(format_cli_report(result).as_bytes())?;
    Ok(())
}

/// Formats a poke result as a text report
pub fn format_cli_report(result: &HandResult) -> String {
    let mut out = String::new();

    out.push_str("=== wpoke report ===\n\n");
    out.push_str(&format!("Started:  {}\n", result.started_at.to_rfc3339()));
    out.push_str(&format!("Finished: {}\n", result.finished_at.to_rfc3339()));
    out.push_str(&format!(
        "Runtime:  {:.3}s (serial {:.3}s, parallel {:.3}s)\n",
        result.real_runtime, result.serial_runtime, result.parallel_runtime
    ));
    out.push_str(&format!(
        "Fingers:  {}\n",
        result.loaded_fingers.join(", ")
    ));

    for poke in &result.pokes {
        out.push('\n');
        format_poke(poke, &mut out);
    }

    out
}

fn format_poke(poke: &FingerResult, out: &mut String) {
    let status = if poke.is_success() { "ok" } else { "failed" };
    out.push_str(&format!(
        "[{}] {} in {:.3}s\n",
        poke.finger_origin, status, poke.runtime
    ));

    if let Some(error) = &poke.error {
        out.push_str(&format!("  Error ({}): {}\n", error.kind, error.message));
        return;
    }

    match &poke.data {
        Value::Array(entries) => {
            for (i, entry) in entries.iter().enumerate() {
                out.push_str(&format!("  #{}\n", i + 1));
                format_entry(entry, out);
            }
        }
        Value::Null => {}
        other => format_entry(other, out),
    }
}

/// Prints every present field of an entry; nulls are left out
fn format_entry(entry: &Value, out: &mut String) {
    match entry {
        Value::Object(fields) => {
            for (key, value) in fields {
                if matches!(value, Value::Array(items) if items.is_empty()) {
                    continue;
                }
                if let Some(text) = format_scalar(value) {
                    out.push_str(&format!("    {}: {}\n", field_label(key), text));
                }
            }
        }
        other => {
            if let Some(text) = format_scalar(other) {
                out.push_str(&format!("    {}\n", text));
            }
        }
    }
}

fn format_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(format_scalar)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

/// `author_uri` -> `Author Uri`
fn field_label(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
