//! Human-readable command summaries.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use recon_ingest::IngestWarning;
use recon_model::AggregateContext;

use crate::commands::{ApplyOutcome, IngestOutcome, StatusOutcome};

pub fn print_ingest_summary(outcome: &IngestOutcome) {
    println!("Ingested {} records", outcome.total);
    print_counts_table(&outcome.context);
    print_warnings(&outcome.warnings);
}

pub fn print_apply_summary(outcome: &ApplyOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Parsed"),
        header_cell("Merged"),
        header_cell("Dropped"),
        header_cell("Orphans"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(outcome.parsed),
        count_cell(outcome.merged, Color::Green),
        count_cell(outcome.dropped, Color::Yellow),
        count_cell(outcome.orphans, Color::Yellow),
    ]);
    println!("{table}");
}

pub fn print_status(outcome: &StatusOutcome) {
    print_counts_table(&outcome.context);
    println!(
        "Average confidence: {:.1}%  High confidence (>= {}%): {}/{}",
        outcome.context.average_confidence,
        outcome.threshold,
        outcome.high_confidence,
        outcome.total
    );
    if let Some(session) = &outcome.context.session_id {
        println!("Session: {session}");
    }
    if !outcome.context.recent_changes.is_empty() {
        println!();
        println!("Recent changes:");
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Record"),
            header_cell("Field"),
            header_cell("Old"),
            header_cell("New"),
            header_cell("When"),
        ]);
        apply_table_style(&mut table);
        for event in &outcome.context.recent_changes {
            table.add_row(vec![
                Cell::new(event.row_id.to_string()),
                Cell::new(&event.field),
                value_cell(&event.old_value),
                value_cell(&event.new_value),
                Cell::new(event.timestamp.to_rfc3339()),
            ]);
        }
        println!("{table}");
    }
}

fn print_counts_table(context: &AggregateContext) {
    let counts = &context.status_counts;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Unmapped"),
        header_cell("Pending"),
        header_cell("Mapped"),
        header_cell("Rejected"),
        header_cell("Total"),
    ]);
    apply_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        count_cell(counts.unmapped, Color::Yellow),
        count_cell(counts.pending, Color::Cyan),
        count_cell(counts.mapped, Color::Green),
        count_cell(counts.rejected, Color::Red),
        Cell::new(counts.total()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn print_warnings(warnings: &[IngestWarning]) {
    if warnings.is_empty() {
        return;
    }
    eprintln!("Warnings:");
    for warning in warnings {
        eprintln!("- {warning}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn value_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
