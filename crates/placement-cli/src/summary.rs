use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use placement_common::{format_numeric, format_percent};
use placement_cli::pipeline::{PartitionSummary, PrepareRun};

pub fn print_summary(run: &PrepareRun) {
    println!("Input: {}", run.input.display());
    if run.written.is_empty() {
        println!("Output: none (dry run)");
    } else {
        println!("Output: {}", run.output_dir.display());
    }
    println!("Fit scope: {:?}", run.prepared.fit_scope);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Partition"),
        header_cell("Rows"),
        header_cell("Positives"),
        header_cell("Negatives"),
        header_cell("Positive %"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total = PartitionSummary {
        name: "TOTAL",
        rows: 0,
        positives: 0,
    };
    for summary in &run.partitions {
        total.rows += summary.rows;
        total.positives += summary.positives;
        table.add_row(summary_row(summary, Cell::new(summary.name)));
    }
    let label = Cell::new(total.name)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold);
    table.add_row(summary_row(&total, label));
    println!("{table}");
    println!("Prevalence: {}", format_percent(run.prepared.prevalence));
    print_scaler_table(run);
}

fn print_scaler_table(run: &PrepareRun) {
    let columns = &run.prepared.scaler.columns;
    if columns.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Scaled column"),
        header_cell("Min"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for params in columns {
        let name = if params.is_constant() {
            Cell::new(format!("{} (constant)", params.column)).fg(Color::Yellow)
        } else {
            Cell::new(&params.column)
        };
        table.add_row(vec![
            name,
            Cell::new(format_numeric(params.min)),
            Cell::new(format_numeric(params.max)),
        ]);
    }
    println!("{table}");
}

fn summary_row(summary: &PartitionSummary, label: Cell) -> Vec<Cell> {
    let fraction = match summary.positive_fraction() {
        Some(fraction) => Cell::new(format_percent(fraction)),
        None => Cell::new("-").fg(Color::DarkGrey),
    };
    vec![
        label,
        Cell::new(summary.rows),
        Cell::new(summary.positives),
        Cell::new(summary.negatives()),
        fraction,
    ]
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
