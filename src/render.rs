//! Tabular rendering of query results

use comfy_table::{Cell, ContentArrangement, Table};

use crate::executor::QueryResult;

/// Render a result as a bordered table followed by a row count
pub fn render(result: &QueryResult) -> String {
    let mut table = Table::new();

    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    if !result.columns.is_empty() {
        table.set_header(result.columns.iter().map(Cell::new));
    }

    for row in &result.rows {
        table.add_row(row.iter().map(|v| Cell::new(v.to_string())));
    }

    let noun = if result.rows.len() == 1 { "row" } else { "rows" };
    format!("{table}\n{} {noun}", result.rows.len())
}
