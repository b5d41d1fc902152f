use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use contract_cli::pipeline::{CleanOutcome, RowLabel};

/// Label, count, and the color used when the count is non-zero.
fn summary_rows(outcome: &CleanOutcome) -> Vec<(&'static str, usize, Option<Color>)> {
    let report = &outcome.report;
    let (dropped, extended) = report.overlaps.as_ref().map_or((0, 0), |overlaps| {
        (
            overlaps.resolution.dropped.len(),
            overlaps.resolution.extended.len(),
        )
    });
    vec![
        ("Input rows", report.input_rows, None),
        ("Swapped intervals", outcome.swapped.len(), Some(Color::Yellow)),
        ("Invalid date cells", report.invalid_dates(), Some(Color::Yellow)),
        ("Overlapping rows", outcome.flagged.len(), Some(Color::Red)),
        ("Dropped rows", dropped, Some(Color::Red)),
        ("Extended rows", extended, Some(Color::Yellow)),
        ("Output rows", report.output_rows, None),
    ]
}

pub fn print_summary(outcome: &CleanOutcome) {
    println!("Input: {}", outcome.input.display());
    match &outcome.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (not written)"),
    }
    if let Some(overlaps) = &outcome.report.overlaps {
        println!("Policy: {:?}", overlaps.policy);
    } else {
        println!("Policy: overlap resolution skipped");
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Step"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, count, color) in summary_rows(outcome) {
        let count_cell = match color {
            Some(color) => count_cell(count, color),
            None => Cell::new(count).add_attribute(Attribute::Bold),
        };
        table.add_row(vec![Cell::new(label), count_cell]);
    }
    println!("{table}");

    print_row_table("Swapped intervals", &outcome.swapped);
    print_row_table("Overlapping rows", &outcome.flagged);
}

fn print_row_table(title: &str, rows: &[RowLabel]) {
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Reference"),
        header_cell("Supplier-Product"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for label in rows {
        table.add_row(vec![
            dim_cell(label.row),
            Cell::new(&label.reference_no),
            Cell::new(label.group.as_str()),
        ]);
    }
    println!("{title}:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
