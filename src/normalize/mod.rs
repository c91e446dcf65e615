//! Joins the per-category quote tables into the long-format summary.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScrapeError;
use crate::locality::StateTable;
use crate::table::Table;

/// One extracted category table plus its join flag.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub category: String,
    pub joinable: bool,
    pub table: Table,
}

/// One row of the summary table. Column names follow the published CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    #[serde(rename = "Tipo")]
    pub tipo: String,
    #[serde(rename = "Cidade")]
    pub cidade: String,
    #[serde(rename = "Estado")]
    pub estado: String,
    #[serde(rename = "Valor")]
    pub valor: String,
}

/// Concatenates every joinable source in declaration order, tags each record
/// with its category, resolves the locality field and applies the fixed
/// overrides.
pub fn normalize(
    sources: &[SourceTable],
    states: &StateTable,
) -> Result<Vec<NormalizedRecord>, ScrapeError> {
    let mut records = Vec::new();

    for source in sources.iter().filter(|s| s.joinable) {
        let localities = source.table.column("UF")?;
        let values = source.table.column("Valor")?;
        debug!(category = %source.category, rows = localities.len(), "joining");

        for (raw, valor) in localities.into_iter().zip(values) {
            let locality = states.resolve(raw);
            records.push(NormalizedRecord {
                tipo: source.category.clone(),
                cidade: locality.city,
                estado: locality.state,
                valor: valor.to_string(),
            });
        }
    }

    apply_overrides(&mut records);
    Ok(records)
}

/// The two literal data corrections, in fixed order. Both are exact-match
/// overwrites, so applying them twice changes nothing.
pub fn apply_overrides(records: &mut [NormalizedRecord]) {
    for r in records.iter_mut() {
        if r.tipo == "BOI GORDO - CHINA" {
            r.cidade = "CHINA".to_string();
            r.tipo = "BOI GORDO".to_string();
        }
    }
    for r in records.iter_mut() {
        if r.tipo == "CEPEA" {
            r.tipo = "BOI GORDO".to_string();
            r.cidade = "CHINA".to_string();
            r.estado = "CEPEA".to_string();
        }
    }
}

/// Renders the records as a display table.
pub fn to_table(records: &[NormalizedRecord]) -> Table {
    let mut table = Table::new(["Tipo", "Cidade", "Estado", "Valor"]);
    for r in records {
        table.push_row(vec![
            r.tipo.clone(),
            r.cidade.clone(),
            r.estado.clone(),
            r.valor.clone(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote_table(rows: &[(&str, &str)]) -> Table {
        let mut t = Table::new(["UF", "Valor"]);
        for (uf, valor) in rows {
            t.push_row(vec![uf.to_string(), valor.to_string()]);
        }
        t
    }

    fn sources() -> Vec<SourceTable> {
        vec![
            SourceTable {
                category: "BOI GORDO - CHINA".to_string(),
                joinable: true,
                table: quote_table(&[("SP Araçatuba", "R$ 320,00")]),
            },
            SourceTable {
                category: "BOI GORDO".to_string(),
                joinable: true,
                table: quote_table(&[("MT Cuiabá", "R$ 305,00"), ("Rondônia", "R$ 298,00")]),
            },
            SourceTable {
                category: "BOI NO MUNDO".to_string(),
                joinable: false,
                table: quote_table(&[("EUA", "10")]),
            },
            SourceTable {
                category: "CEPEA".to_string(),
                joinable: true,
                table: quote_table(&[("28/08/2026", "R$ 310,55")]),
            },
        ]
    }

    #[test]
    fn joins_only_joinable_sources_in_declaration_order() {
        let records = normalize(&sources(), &StateTable::brazil()).unwrap();
        assert_eq!(records.len(), 4);
        // Declaration order preserved; the non-joinable table is absent.
        assert_eq!(records[1].cidade, "CUIABÁ");
        assert_eq!(records[1].estado, "MT");
        assert_eq!(records[2].cidade, "PORTO VELHO");
        assert_eq!(records[2].estado, "RO");
        assert!(records.iter().all(|r| r.tipo != "BOI NO MUNDO"));
    }

    #[test]
    fn china_override_rewrites_city_and_category() {
        let records = normalize(&sources(), &StateTable::brazil()).unwrap();
        assert_eq!(records[0].tipo, "BOI GORDO");
        assert_eq!(records[0].cidade, "CHINA");
        // Locality resolution ran before the override.
        assert_eq!(records[0].estado, "SP");
    }

    #[test]
    fn cepea_override_rewrites_all_three_fields() {
        let records = normalize(&sources(), &StateTable::brazil()).unwrap();
        let cepea = &records[3];
        assert_eq!(cepea.tipo, "BOI GORDO");
        assert_eq!(cepea.cidade, "CHINA");
        assert_eq!(cepea.estado, "CEPEA");
        assert_eq!(cepea.valor, "R$ 310,55");
    }

    #[test]
    fn overrides_are_idempotent() {
        let once = normalize(&sources(), &StateTable::brazil()).unwrap();
        let mut twice = once.clone();
        apply_overrides(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_locality_column_is_an_error() {
        let sources = vec![SourceTable {
            category: "X".to_string(),
            joinable: true,
            table: Table::new(["Pais", "Valor"]),
        }];
        assert!(matches!(
            normalize(&sources, &StateTable::brazil()),
            Err(ScrapeError::MissingColumn { .. })
        ));
    }
}
