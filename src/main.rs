use agroscraper::display::{ConsolePresenter, Present};
use agroscraper::locality::StateTable;
use agroscraper::pipeline::{run_b3, run_quotes, RunContext};
use agroscraper::{fetch, sink};
use anyhow::Result;
use chrono::Local;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) shared lookups, client, run-wide dates ───────────────────
    let client = fetch::client()?;
    let states = StateTable::brazil();
    let ctx = RunContext::now(sink::OUTPUT_DIR);

    // ─── 3) one sequential pass over every source ────────────────────
    let quote_tables = run_quotes(&client, &ctx, &states).await?;
    let b3_tables = run_b3(&client, &ctx).await?;

    // ─── 4) hand the finished tables to the dashboard ────────────────
    let stamp = Local::now().format("%d/%m/%Y %H:%M").to_string();
    let mut presenter = ConsolePresenter;
    presenter.show(&format!("Dados Scot em {stamp}"), &quote_tables);
    presenter.show(&format!("Dados Notícias Agrícolas em {stamp}"), &b3_tables);

    Ok(())
}
