use std::fmt::Write;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use vf_cli::types::PrepareResult;

pub fn print_summary(result: &PrepareResult) {
    print!("{}", render_summary(result));
    let skipped: Vec<String> = result
        .issues
        .iter()
        .filter(|issue| issue.kind.skips_row())
        .map(ToString::to_string)
        .collect();
    if !skipped.is_empty() {
        eprintln!("Skipped rows:");
        for line in skipped {
            eprintln!("- {line}");
        }
    }
}

/// Render the stdout portion of the run summary.
fn render_summary(result: &PrepareResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Input:  {}", result.input.display());
    let _ = writeln!(out, "Output: {}", result.output.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pattern"),
        header_cell("Rows read"),
        header_cell("Skipped"),
        header_cell("Matched"),
        header_cell("Groups"),
        header_cell("Largest group"),
    ]);
    apply_table_style(&mut table);
    for column in 1..=5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(&result.pattern),
        Cell::new(result.rows_read),
        count_cell(result.rows_skipped, Color::Yellow),
        count_cell(result.rows_matched, Color::Green),
        Cell::new(result.group_count),
        Cell::new(result.largest_group),
    ]);
    let _ = writeln!(out, "{table}");

    if result.rows_matched == 0 {
        let _ = writeln!(
            out,
            "No records matched pattern {:?}; wrote a header-only file.",
            result.pattern
        );
    }
    out
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).add_attribute(Attribute::Dim)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
