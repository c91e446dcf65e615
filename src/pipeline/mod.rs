//! Sequences fetch → extract → persist per configured source, then derives
//! the summary and pivot views. Sources are independent: one failing never
//! blocks its siblings, and nothing retries.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use reqwest::Client;
use tracing::{error, info, warn};

use crate::b3;
use crate::error::ScrapeError;
use crate::extract;
use crate::locality::StateTable;
use crate::normalize::{self, SourceTable};
use crate::pivot::pivot_years;
use crate::sink;
use crate::sources::{self, RowMode, TableSpec};
use crate::table::Table;

/// Per-source progress. A source either reaches `Persisted` or stops at
/// `Failed`; either way the run moves on to the next source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceState {
    Pending,
    Fetched,
    Extracted,
    Persisted,
    Failed,
}

impl SourceState {
    pub fn as_str(&self) -> &str {
        match self {
            SourceState::Pending => "Pending",
            SourceState::Fetched => "Fetched",
            SourceState::Extracted => "Extracted",
            SourceState::Persisted => "Persisted",
            SourceState::Failed => "Failed",
        }
    }
}

/// Run-wide fixed values, computed once so every source and every pivoted row
/// sees the same date and year.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub out_dir: PathBuf,
    pub today: NaiveDate,
    pub current_year: i32,
}

impl RunContext {
    pub fn now(out_dir: impl Into<PathBuf>) -> Self {
        let now = Local::now();
        RunContext {
            out_dir: out_dir.into(),
            today: now.date_naive(),
            current_year: now.year(),
        }
    }
}

/// Pulls one configured table out of a fetched page.
fn extract_table(html: &str, spec: &TableSpec) -> Result<Table, ScrapeError> {
    let rows = match spec.mode {
        RowMode::AllRows => {
            extract::select_rows(html, &spec.table_selector, &spec.row_selector)?
        }
        RowMode::FirstRowOnly => {
            vec![extract::first_row(html, &spec.table_selector, &spec.row_selector)?]
        }
    };
    let table = extract::extract(rows, &spec.headers);
    if spec.drop_columns.is_empty() {
        return Ok(table);
    }
    let names: Vec<&str> = spec.drop_columns.iter().map(String::as_str).collect();
    Ok(table.drop_columns(&names))
}

/// Scrapes the quote catalogue, persists every extracted table, builds the
/// summary and the two year-pivoted views. Returns the named tables for the
/// dashboard.
pub async fn run_quotes(
    client: &Client,
    ctx: &RunContext,
    states: &StateTable,
) -> Result<Vec<(String, Table)>> {
    let pages = sources::quote_pages(ctx.current_year - 1);
    let mut collected: Vec<SourceTable> = Vec::new();

    for page in &pages {
        let mut state = SourceState::Pending;

        let html = match fetch_page(client, &page.name, &page.url).await {
            Some(html) => {
                state = SourceState::Fetched;
                html
            }
            None => continue,
        };

        for spec in &page.tables {
            let table = match extract_table(&html, spec) {
                Ok(table) => table,
                Err(err) => {
                    warn!(source = %page.name, category = %spec.category, %err, "table skipped");
                    continue;
                }
            };
            state = SourceState::Extracted;

            if let Err(err) = sink::write_table(&table, &ctx.out_dir, &spec.output, ctx.today) {
                error!(source = %page.name, category = %spec.category, %err,
                       "persist failed, abandoning source");
                state = SourceState::Failed;
                break;
            }
            collected.push(SourceTable {
                category: spec.category.clone(),
                joinable: page.joinable,
                table,
            });
        }

        if state == SourceState::Extracted {
            state = SourceState::Persisted;
        }
        info!(source = %page.name, state = state.as_str(), "source finished");
    }

    // The summary is the run's product; failing to persist it is fatal here.
    let records = normalize::normalize(&collected, states)?;
    sink::write_records(&records, &ctx.out_dir, "resumo.csv", ctx.today)?;

    let mut named = vec![("Resumo".to_string(), normalize::to_table(&records))];
    for (category, dimension, label) in [
        ("BOI NO MUNDO", "Pais", "Boi no mundo"),
        ("ATACADO", "Atacado SP", "Atacado"),
    ] {
        match collected.iter().find(|s| s.category == category) {
            Some(source) => {
                let pivoted = pivot_years(&source.table, dimension, ctx.current_year)?;
                named.push((label.to_string(), pivoted));
            }
            None => warn!(category, "source missing, pivot skipped"),
        }
    }
    Ok(named)
}

/// Scrapes the two B3 feeds. Same independence rules as the quote catalogue.
pub async fn run_b3(client: &Client, ctx: &RunContext) -> Result<Vec<(String, Table)>> {
    let mut named = Vec::new();

    for spec in b3::b3_specs() {
        let mut state = SourceState::Pending;

        let html = match fetch_page(client, &spec.name, &spec.url).await {
            Some(html) => {
                state = SourceState::Fetched;
                html
            }
            None => continue,
        };

        let raw = match extract::select_rows(&html, b3::B3_TABLE_SELECTOR, b3::B3_ROWS) {
            Ok(rows) => {
                extract::extract(rows, &["Mês", "Valor", "Variação"]).drop_columns(&["Variação"])
            }
            Err(err) => {
                warn!(source = %spec.name, %err, "table skipped");
                info!(source = %spec.name, state = state.as_str(), "source finished");
                continue;
            }
        };

        let table = match b3::transform(&raw, &spec) {
            Ok(table) => table,
            Err(err) => {
                warn!(source = %spec.name, %err, "unusable quote data, skipping source");
                info!(source = %spec.name, state = state.as_str(), "source finished");
                continue;
            }
        };
        state = SourceState::Extracted;

        match sink::write_table(&table, &ctx.out_dir, &spec.output, ctx.today) {
            Ok(_) => {
                state = SourceState::Persisted;
                named.push((spec.name.clone(), table));
            }
            Err(err) => {
                error!(source = %spec.name, %err, "persist failed, abandoning source");
                state = SourceState::Failed;
            }
        }
        info!(source = %spec.name, state = state.as_str(), "source finished");
    }

    Ok(named)
}

async fn fetch_page(client: &Client, name: &str, url: &str) -> Option<String> {
    match crate::fetch::page_text(client, url).await {
        Ok(html) => Some(html),
        Err(err) => {
            warn!(source = %name, %err, "fetch failed, skipping source");
            info!(source = %name, state = SourceState::Failed.as_str(), "source finished");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::quote_pages;

    const SCOT_PAGE: &str = r#"
        <html><body>
        <table border="0" cellpadding="0" cellspacing="0" width="660">
          <tr class="conteudo"><td>UF</td><td>Valor</td></tr>
          <tr class="conteudo"><td>SP Araçatuba</td><td>R$ 318,00</td></tr>
          <tr class="conteudo"><td>Rondônia</td><td>R$ 298,00</td></tr>
        </table>
        </body></html>"#;

    const CEPEA_PAGE: &str = r#"
        <html><body>
        <table id="imagenet-indicador1"><tbody>
          <tr><td>28/08/2026</td><td>R$ 310,55</td><td>0,2%</td></tr>
          <tr><td>27/08/2026</td><td>R$ 309,90</td><td>-0,1%</td></tr>
        </tbody></table>
        </body></html>"#;

    #[test]
    fn extract_table_runs_the_configured_scot_flow() {
        let pages = quote_pages(2025);
        // boi-gordo page, physical-market table.
        let spec = &pages[0].tables[1];
        let table = extract_table(SCOT_PAGE, spec).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "UF"), Some("SP Araçatuba"));
        assert_eq!(table.cell(1, "Valor"), Some("R$ 298,00"));
    }

    #[test]
    fn extract_table_takes_only_the_first_cepea_row() {
        let pages = quote_pages(2025);
        let spec = &pages[5].tables[0];
        let table = extract_table(CEPEA_PAGE, spec).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, "UF"), Some("28/08/2026"));
        assert_eq!(table.cell(0, "Valor"), Some("R$ 310,55"));
    }

    #[test]
    fn extract_table_surfaces_missing_tables() {
        let pages = quote_pages(2025);
        // The china table's 660px selector does not match this page.
        let spec = &pages[0].tables[0];
        assert!(matches!(
            extract_table(SCOT_PAGE, spec),
            Err(ScrapeError::TableNotFound { .. })
        ));
    }

    #[test]
    fn source_state_names() {
        assert_eq!(SourceState::Pending.as_str(), "Pending");
        assert_eq!(SourceState::Failed.as_str(), "Failed");
    }
}
