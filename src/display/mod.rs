//! Presentation boundary. The core only hands named tables to a presenter;
//! layout is the dashboard's concern.

use crate::table::Table;

/// Consumer of the finished tables.
pub trait Present {
    fn show(&mut self, heading: &str, tables: &[(String, Table)]);
}

/// Pads cells to the widest entry of each column, header row underlined.
pub fn render_table(table: &Table) -> String {
    let columns = table.headers().len();
    let mut widths: Vec<usize> = table.headers().iter().map(|h| h.chars().count()).collect();
    for row in table.rows() {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{c:<width$}", width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&render_row(table.headers()));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    for row in table.rows() {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}

/// Writes each table to stdout under its label.
pub struct ConsolePresenter;

impl Present for ConsolePresenter {
    fn show(&mut self, heading: &str, tables: &[(String, Table)]) {
        println!("\n== {heading} ==");
        for (label, table) in tables {
            println!("\n{label}");
            print!("{}", render_table(table));
        }
    }
}
