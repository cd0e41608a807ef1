use anyhow::Result;
use gdp_etl::{pipeline, Config};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) run every stage with the built-in paths ──────────────────
    let cfg = Config::default();
    info!(url = %cfg.url, csv = %cfg.csv_path.display(), db = %cfg.db_path.display(), "configured");

    let summary = pipeline::run(&cfg)?;
    info!(
        rows = summary.rows,
        matched = summary.query.rows.len(),
        "finished"
    );
    Ok(())
}
