//! The B3 quote tables published by Notícias Agrícolas: month-keyed values
//! with Portuguese month labels and Brazilian number formatting.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

use crate::table::Table;

pub const BOI_GORDO_B3_URL: &str =
    "https://www.noticiasagricolas.com.br/cotacoes/boi-gordo/boi-gordo-b3-prego-regular";
pub const DOLAR_B3_URL: &str =
    "https://www.noticiasagricolas.com.br/cotacoes/mercado-financeiro/dolar-b3";

pub const B3_TABLE_SELECTOR: &str = "div.table-content table.cot-fisicas";
pub const B3_ROWS: &str = "tbody tr";

/// Which day of the labelled month a quote refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    FirstDayOfMonth,
    LastDayOfMonth,
}

#[derive(Debug, Clone)]
pub struct B3Spec {
    pub name: String,
    pub url: String,
    pub output: String,
    pub date_rule: DateRule,
    /// The dollar feed publishes thousandths.
    pub divide_by: Option<f64>,
}

pub fn b3_specs() -> Vec<B3Spec> {
    vec![
        B3Spec {
            name: "Boi Gordo".to_string(),
            url: BOI_GORDO_B3_URL.to_string(),
            output: "boi_gordo_b3.csv".to_string(),
            date_rule: DateRule::LastDayOfMonth,
            divide_by: None,
        },
        B3Spec {
            name: "Dolar".to_string(),
            url: DOLAR_B3_URL.to_string(),
            output: "dolar_b3.csv".to_string(),
            date_rule: DateRule::FirstDayOfMonth,
            divide_by: Some(1000.0),
        },
    ]
}

fn month_to_english(pt: &str) -> Option<&'static str> {
    Some(match pt {
        "Janeiro" => "January",
        "Fevereiro" => "February",
        "Março" => "March",
        "Abril" => "April",
        "Maio" => "May",
        "Junho" => "June",
        "Julho" => "July",
        "Agosto" => "August",
        "Setembro" => "September",
        "Outubro" => "October",
        "Novembro" => "November",
        "Dezembro" => "December",
        _ => return None,
    })
}

/// Rewrites any Portuguese month component of a `/`-separated label into its
/// English name, so chrono's `%B` can parse it.
pub fn translate_month(label: &str) -> String {
    label
        .split('/')
        .map(|part| month_to_english(part).unwrap_or(part))
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolves a `Mês/Ano` label (e.g. `Setembro/2026` or `Janeiro/24`) to a
/// concrete date per `rule`. Two-digit years are expanded to 20xx.
pub fn resolve_month(label: &str, rule: DateRule) -> Result<NaiveDate> {
    let translated = translate_month(label);
    let (month, year) = translated
        .split_once('/')
        .with_context(|| format!("month label `{label}` has no year component"))?;
    let year = match year.len() {
        2 => format!("20{year}"),
        _ => year.to_string(),
    };

    let first = NaiveDate::parse_from_str(&format!("1/{month}/{year}"), "%d/%B/%Y")
        .with_context(|| format!("cannot parse month label `{label}`"))?;

    match rule {
        DateRule::FirstDayOfMonth => Ok(first),
        DateRule::LastDayOfMonth => {
            let (y, m) = if first.month() == 12 {
                (first.year() + 1, 1)
            } else {
                (first.year(), first.month() + 1)
            };
            NaiveDate::from_ymd_opt(y, m, 1)
                .and_then(|d| d.pred_opt())
                .context("month end out of range")
        }
    }
}

/// Parses a Brazilian-formatted decimal: `.` thousands, `,` decimal.
pub fn parse_br_number(text: &str) -> Result<f64> {
    text.trim()
        .replace('.', "")
        .replace(',', ".")
        .parse::<f64>()
        .with_context(|| format!("cannot parse number `{text}`"))
}

/// Four decimal places, `.` thousands separator, `,` decimal separator.
pub fn format_currency(value: f64) -> String {
    let rendered = format!("{value:.4}");
    let (int_part, frac) = rendered.split_once('.').expect("fixed-point format");
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped},{frac}")
}

/// Applies the per-feed date and value rules to an extracted `Mês`/`Valor`
/// table, yielding ISO dates and formatted currency strings.
pub fn transform(table: &Table, spec: &B3Spec) -> Result<Table> {
    let months = table.column("Mês")?;
    let values = table.column("Valor")?;

    let mut out = Table::new(["Mês", "Valor"]);
    for (label, raw) in months.iter().zip(&values) {
        let date = resolve_month(label, spec.date_rule)?;
        let mut value = parse_br_number(raw)?;
        if let Some(divisor) = spec.divide_by {
            value /= divisor;
        }
        out.push_row(vec![
            date.format("%Y-%m-%d").to_string(),
            format_currency(value),
        ]);
    }
    Ok(out)
}
