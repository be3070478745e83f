//! Common utilities for output formatters

use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;

/// Print any serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Cut `value` to `max_chars` characters, marking the cut with "..."
pub fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = value.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Borderless table with the given header
pub(crate) fn plain_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(header);
    table
}

/// `*` for the selected row, empty otherwise
pub(crate) fn current_marker(id: &str, current: Option<&str>) -> &'static str {
    if current == Some(id) {
        "*"
    } else {
        ""
    }
}
