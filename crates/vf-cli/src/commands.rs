use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use vf_cli::pipeline::prepare;
use vf_cli::types::PrepareResult;
use vf_model::OUTPUT_COLUMNS;

use crate::cli::PrepareArgs;
use crate::summary::apply_table_style;

pub fn run_prepare(args: &PrepareArgs) -> Result<PrepareResult> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(args));
    prepare(&args.input, &output, &args.pattern)
}

/// Default output next to the input, named after the pattern the way the
/// downstream labeling interface expects (e.g. `opv_24-2_prepared.csv`).
fn default_output_path(args: &PrepareArgs) -> PathBuf {
    let file_name = format!("opv_{}_prepared.csv", args.pattern);
    match args.input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

pub fn run_columns() {
    println!("{}", columns_table());
}

fn columns_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Description"]);
    apply_table_style(&mut table);
    for (column, description) in OUTPUT_COLUMNS.iter().zip(COLUMN_DESCRIPTIONS) {
        table.add_row(vec![*column, description]);
    }
    table
}

/// One description per entry of [`OUTPUT_COLUMNS`], same order.
const COLUMN_DESCRIPTIONS: [&str; 9] = [
    "De-identified patient identifier",
    "Eye code as exported by the instrument",
    "Age in years at the exam date ((exam - birth) / 365.25)",
    "Patient date of birth (ISO 8601)",
    "Visual-field test date (ISO 8601)",
    "Exam report PDF reference",
    "Raw instrument export reference",
    "Total tests for this subject/eye",
    "1-based rank of this test within the subject/eye group",
];
