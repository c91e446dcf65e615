//! Wide-to-long reshaping of the two-year quote tables.

use crate::error::ScrapeError;
use crate::table::Table;

/// Reshapes a table carrying a current-year `Valor` column and a prior-year
/// `Valor {lastYear}` column into long format with an explicit `Ano` column.
///
/// `current_year` is fixed for the whole call; the prior-year column name is
/// derived from it and must match what the extractor was configured with.
/// Output order is every current-year row first, then every prior-year row,
/// each block in input order.
pub fn pivot_years(
    table: &Table,
    dimension: &str,
    current_year: i32,
) -> Result<Table, ScrapeError> {
    let last_year = current_year - 1;
    let last_year_column = format!("Valor {last_year}");

    let dims = table.column(dimension)?;
    let current_values = table.column("Valor")?;
    let last_values = table.column(&last_year_column)?;

    let mut out = Table::new(["Ano", dimension, "Valor"]);
    for (dim, value) in dims.iter().zip(&current_values) {
        out.push_row(vec![
            current_year.to_string(),
            dim.to_string(),
            value.to_string(),
        ]);
    }
    for (dim, value) in dims.iter().zip(&last_values) {
        out.push_row(vec![
            last_year.to_string(),
            dim.to_string(),
            value.to_string(),
        ]);
    }

    Ok(out)
}
