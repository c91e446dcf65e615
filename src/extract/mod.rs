//! HTML table location and row extraction.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::error::ScrapeError;
use crate::table::Table;

static CELLS: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("td selector is valid"));

fn cell_texts(row: ElementRef) -> Vec<String> {
    row.select(&CELLS)
        .map(|td| td.text().collect::<String>().trim().to_string())
        .collect()
}

/// Locates the first table matching `table_selector` and returns the cell
/// texts of every row matching `row_selector` beneath it, trimmed, in
/// document order.
pub fn select_rows(
    html: &str,
    table_selector: &str,
    row_selector: &str,
) -> Result<Vec<Vec<String>>, ScrapeError> {
    let doc = Html::parse_document(html);
    let table_sel =
        Selector::parse(table_selector).expect("table selector from the catalogue is valid");
    let row_sel = Selector::parse(row_selector).expect("row selector from the catalogue is valid");

    let table = doc
        .select(&table_sel)
        .next()
        .ok_or_else(|| ScrapeError::TableNotFound {
            selector: table_selector.to_string(),
        })?;

    Ok(table.select(&row_sel).map(cell_texts).collect())
}

/// Like [`select_rows`] but keeps only the first row. Used for indicator
/// tables where only the latest entry matters.
pub fn first_row(
    html: &str,
    table_selector: &str,
    row_selector: &str,
) -> Result<Vec<String>, ScrapeError> {
    let mut rows = select_rows(html, table_selector, row_selector)?;
    if rows.is_empty() {
        return Err(ScrapeError::TableNotFound {
            selector: format!("{table_selector} {row_selector}"),
        });
    }
    Ok(rows.swap_remove(0))
}

/// Zips raw rows with `headers` into a [`Table`].
///
/// Rows whose first cell repeats a header label are in-table header rows and
/// skipped. Rows with fewer cells than headers are malformed: reported and
/// dropped, extraction continues. Extra trailing cells are ignored.
pub fn extract<S: AsRef<str>>(rows: Vec<Vec<String>>, headers: &[S]) -> Table {
    let mut table = Table::new(headers.iter().map(|h| h.as_ref().to_string()));

    for (index, row) in rows.into_iter().enumerate() {
        if row
            .first()
            .is_some_and(|c| headers.iter().any(|h| h.as_ref() == c.as_str()))
        {
            continue;
        }
        if row.len() < headers.len() {
            let err = ScrapeError::MalformedRow {
                index,
                got: row.len(),
                expected: headers.len(),
            };
            warn!(%err, "dropping row");
            continue;
        }
        table.push_row(row);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table border="0" cellpadding="0" cellspacing="0" width="660">
          <tr class="conteudo"><td>UF</td><td>Valor</td></tr>
          <tr class="conteudo"><td> SP Araçatuba </td><td>R$ 318,00</td></tr>
          <tr><td>ignored, wrong class</td><td>x</td></tr>
          <tr class="conteudo"><td>MG Uberaba</td><td>R$ 305,00</td></tr>
        </table>
        </body></html>"#;

    #[test]
    fn select_rows_scopes_to_table_and_trims() {
        let rows = select_rows(
            PAGE,
            r#"table[border="0"][cellpadding="0"][cellspacing="0"][width="660"]"#,
            "tr.conteudo",
        )
        .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["SP Araçatuba".to_string(), "R$ 318,00".to_string()]);
    }

    #[test]
    fn select_rows_reports_missing_table() {
        let err = select_rows(PAGE, r#"table[width="999"]"#, "tr").unwrap_err();
        assert!(matches!(err, ScrapeError::TableNotFound { .. }));
    }

    #[test]
    fn extract_drops_repeated_header_rows_keeping_order() {
        let rows = vec![
            vec!["UF".to_string(), "Valor".to_string()],
            vec!["SP".to_string(), "10".to_string()],
            vec!["Valor".to_string(), "x".to_string()],
            vec!["MG".to_string(), "12".to_string()],
        ];
        let table = extract(rows, &["UF", "Valor"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "UF"), Some("SP"));
        assert_eq!(table.cell(1, "UF"), Some("MG"));
    }

    #[test]
    fn extract_reports_and_skips_short_rows() {
        let rows = vec![
            vec!["SP".to_string(), "10".to_string()],
            vec!["broken".to_string()],
            vec!["MG".to_string(), "12".to_string(), "extra".to_string()],
        ];
        let table = extract(rows, &["UF", "Valor"]);
        assert_eq!(table.len(), 2);
        // Extra trailing cell is dropped.
        assert_eq!(table.rows()[1], vec!["MG".to_string(), "12".to_string()]);
    }

    #[test]
    fn first_row_takes_the_latest_indicator_entry() {
        let html = r#"
            <table id="imagenet-indicador1"><tbody>
              <tr><td>28/08/2026</td><td>310,55</td><td>0,2%</td></tr>
              <tr><td>27/08/2026</td><td>309,90</td><td>-0,1%</td></tr>
            </tbody></table>"#;
        let row = first_row(html, "table#imagenet-indicador1", "tbody tr").unwrap();
        assert_eq!(row[0], "28/08/2026");
        assert_eq!(row[1], "310,55");
    }
}
