//! The configured quote sources. Each source is a declarative record; the
//! pipeline interprets them, nothing here fetches or parses.

pub const SCOT_BASE_URL: &str = "https://www.scotconsultoria.com.br/cotacoes";
pub const CEPEA_URL: &str = "https://www.cepea.esalq.usp.br/br/indicador/boi-gordo.aspx";

/// How rows are taken from the located table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    /// Every row matching the row selector.
    AllRows,
    /// Only the first matching row (latest indicator entry).
    FirstRowOnly,
}

/// One table to pull out of a fetched page.
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub category: String,
    pub table_selector: String,
    pub row_selector: String,
    pub mode: RowMode,
    pub headers: Vec<String>,
    /// Dropped after extraction, e.g. an embedded-image column.
    pub drop_columns: Vec<String>,
    /// Logical CSV name; the sink prefixes the run date.
    pub output: String,
}

/// One page to fetch, holding one or more tables. `joinable` tables feed the
/// summary; the rest stay standalone.
#[derive(Debug, Clone)]
pub struct PageSpec {
    pub name: String,
    pub url: String,
    pub joinable: bool,
    pub tables: Vec<TableSpec>,
}

// The provider's tables carry no ids or classes; they are told apart by their
// legacy presentation attributes.
const TABLE_660PX: &str = r#"table[cellpadding="0"][cellspacing="0"][width="660px"]"#;
const TABLE_660: &str = r#"table[border="0"][cellpadding="0"][cellspacing="0"][width="660"]"#;
const TABLE_660_TOPMARGIN: &str =
    r#"table[border="0"][cellpadding="0"][cellspacing="0"][width="660"][style="margin-top: 10px"]"#;
const QUOTE_ROWS: &str = "tr.conteudo";

fn scot_url(link: &str) -> String {
    format!("{SCOT_BASE_URL}/{link}/?ref=smn")
}

fn table(category: &str, selector: &str, headers: &[&str], output: &str) -> TableSpec {
    TableSpec {
        category: category.to_string(),
        table_selector: selector.to_string(),
        row_selector: QUOTE_ROWS.to_string(),
        mode: RowMode::AllRows,
        headers: headers.iter().map(|h| h.to_string()).collect(),
        drop_columns: Vec::new(),
        output: output.to_string(),
    }
}

/// The full catalogue, in processing order. `last_year` names the prior-year
/// value column of the two-year tables; it must match the pivot's year.
pub fn quote_pages(last_year: i32) -> Vec<PageSpec> {
    let last_year_column = format!("Valor {last_year}");

    vec![
        PageSpec {
            name: "boi-gordo".to_string(),
            url: scot_url("boi-gordo"),
            joinable: true,
            tables: vec![
                table(
                    "BOI GORDO - CHINA",
                    TABLE_660PX,
                    &["UF", "Valor"],
                    "boi_china_prazo.csv",
                ),
                table(
                    "BOI GORDO",
                    TABLE_660,
                    &["UF", "Valor"],
                    "boi_mercado_fisico.csv",
                ),
            ],
        },
        PageSpec {
            name: "vaca-gorda".to_string(),
            url: scot_url("vaca-gorda"),
            joinable: true,
            tables: vec![table(
                "VACA GORDA",
                TABLE_660PX,
                &["UF", "Valor"],
                "vaca_mercado_fisico.csv",
            )],
        },
        PageSpec {
            name: "novilha".to_string(),
            url: scot_url("novilha"),
            joinable: true,
            tables: vec![table(
                "NOVILHA",
                TABLE_660_TOPMARGIN,
                &["UF", "Valor"],
                "novilha_mercado_fisico.csv",
            )],
        },
        PageSpec {
            name: "boi-no-mundo".to_string(),
            url: scot_url("boi-no-mundo"),
            joinable: false,
            tables: vec![table(
                "BOI NO MUNDO",
                TABLE_660,
                &["Pais", "Valor", &last_year_column],
                "boi_no_mundo.csv",
            )],
        },
        PageSpec {
            name: "atacado".to_string(),
            url: scot_url("atacado"),
            joinable: false,
            tables: vec![TableSpec {
                drop_columns: vec!["Img".to_string()],
                ..table(
                    "ATACADO",
                    TABLE_660,
                    &["Atacado SP", "Valor", "Img", &last_year_column],
                    "atacado.csv",
                )
            }],
        },
        PageSpec {
            name: "cepea".to_string(),
            url: CEPEA_URL.to_string(),
            joinable: true,
            tables: vec![TableSpec {
                category: "CEPEA".to_string(),
                table_selector: "table#imagenet-indicador1".to_string(),
                row_selector: "tbody tr".to_string(),
                mode: RowMode::FirstRowOnly,
                headers: vec!["UF".to_string(), "Valor".to_string()],
                drop_columns: Vec::new(),
                output: "cpea.csv".to_string(),
            }],
        },
    ]
}
