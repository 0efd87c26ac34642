//! Terminal summary of a built document.

use std::fmt::Write as _;

use archdoc_model::{DocumentModel, STATS_ICON};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// File composition table, in received order, with a total row.
pub fn stats_table(document: &DocumentModel) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        header_cell("File type"),
        header_cell("Files"),
        header_cell("Share"),
    ]);
    for entry in document.stats() {
        table.add_row(vec![
            Cell::new(&entry.label),
            Cell::new(entry.count),
            Cell::new(format!("{:.1}%", entry.percentage)),
        ]);
    }
    if document.stats().is_empty() {
        table.add_row(vec![dim_cell("(none)"), dim_cell("-"), dim_cell("-")]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(document.total_files()).add_attribute(Attribute::Bold),
        dim_cell(if document.total_files() > 0 { "100.0%" } else { "-" }),
    ]);
    for index in [1, 2] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

/// Section headings in document order.
pub fn section_outline(document: &DocumentModel) -> String {
    let mut outline = String::new();
    for (index, section) in document.sections().iter().enumerate() {
        let lines = section.body.lines().count();
        let _ = writeln!(
            outline,
            "{:>2}. {} {} ({lines} line{})",
            index + 1,
            section.icon,
            section.title,
            if lines == 1 { "" } else { "s" }
        );
    }
    outline
}

pub fn print_document_summary(document: &DocumentModel) {
    println!("{STATS_ICON} Project File Composition");
    println!("{}", stats_table(document));
    if document.sections().is_empty() {
        println!("No architecture sections.");
    } else {
        print!("{}", section_outline(document));
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
