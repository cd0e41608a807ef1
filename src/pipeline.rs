// src/pipeline.rs

use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::history::ProgressLog;
use crate::report::{self, QueryOutput};
use crate::{export, extract, fetch, process, store};

pub const EXTRACTED: &str = "Data extraction complete. Initiating Transformation process";
pub const TRANSFORMED: &str = "Data transformation complete. Initiating Loading process";
pub const SAVED_CSV: &str = "Data saved to CSV file";
pub const LOADED_DB: &str = "Data loaded to Database as table. Running the query";
pub const COMPLETE: &str = "Process Complete";

/// What a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub rows: usize,
    pub query: QueryOutput,
}

/// Run one stage, logging a failure with the stage name before passing it on.
fn stage<T>(name: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    f().map_err(|e| {
        error!(stage = name, error = %e, "stage failed");
        e
    })
}

/// Fetch the configured page and run every stage on it.
pub fn run(cfg: &Config) -> Result<RunSummary> {
    let client = fetch::client()?;
    let html = stage("extract", || fetch::fetch_page(&client, &cfg.url))?;
    run_document(cfg, &html)
}

/// extract → transform → export-csv → load-db → query, strictly in order.
///
/// The first failure aborts the run. Sinks already written stay written, so
/// the CSV can be newer than the database after a failed load. The database
/// connection is dropped on every path.
#[tracing::instrument(level = "info", skip(cfg, html), fields(table = %cfg.table_name))]
pub fn run_document(cfg: &Config, html: &str) -> Result<RunSummary> {
    let log = ProgressLog::new(&cfg.log_path);

    // ─── 1) extract ──────────────────────────────────────────────────
    let raw = stage("extract", || extract::extract_table(html, &cfg.layout))?;
    log.log(EXTRACTED)?;

    // ─── 2) transform ────────────────────────────────────────────────
    let table = stage("transform", || process::transform(raw))?;
    log.log(TRANSFORMED)?;

    // ─── 3) export csv ───────────────────────────────────────────────
    stage("export-csv", || export::write_csv(&table, &cfg.csv_path))?;
    log.log(SAVED_CSV)?;

    // ─── 4) load db ──────────────────────────────────────────────────
    let mut conn = stage("load-db", || store::open(&cfg.db_path))?;
    let rows = stage("load-db", || {
        store::load_table(&mut conn, &cfg.table_name, &table)
    })?;
    log.log(LOADED_DB)?;

    // ─── 5) query ────────────────────────────────────────────────────
    let query = stage("query", || report::run_query(&conn, &cfg.default_query()))?;
    stage("query", || store::close(conn))?;
    log.log(COMPLETE)?;

    info!(rows, matched = query.rows.len(), "all done");
    Ok(RunSummary { rows, query })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EtlError;
    use crate::history::parse_line;
    use crate::model::Record;
    use rusqlite::types::Value;
    use std::{fs, path::Path};
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,gdp_etl=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    const PAGE: &str = r#"<html><body>
        <table><tbody><tr><td>Largest economies</td></tr></tbody></table>
        <table><tbody><tr><td>IMF</td><td>World Bank</td></tr></tbody></table>
        <table class="wikitable sortable"><tbody>
          <tr><th>Country/Territory</th><th>UN region</th><th>IMF estimate</th></tr>
          <tr><td>World</td><td>—</td><td>105,568,776</td></tr>
          <tr><td><a href="/wiki/Big">Big</a></td><td>Americas</td><td>150,000</td></tr>
          <tr><td><a href="/wiki/Alpha">Alpha</a></td><td>Europe</td><td>1,234<sup>[n 1]</sup></td></tr>
          <tr><td><a href="/wiki/Beta">Beta</a></td><td>Asia</td><td>—</td></tr>
          <tr><td><a href="/wiki/Gamma">Gamma</a></td><td>Africa</td><td>500</td></tr>
        </tbody></table>
        </body></html>"#;

    fn config_in(dir: &Path) -> Config {
        Config {
            csv_path: dir.join("Countries_by_GDP.csv"),
            db_path: dir.join("World_Economies.db"),
            log_path: dir.join("etl_project_log.txt"),
            ..Config::default()
        }
    }

    fn logged_messages(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(|l| parse_line(l).expect("well-formed log line").1.to_string())
            .collect()
    }

    fn rec(name: &str, value_billions: f64) -> Record {
        Record {
            name: name.to_string(),
            value_billions,
        }
    }

    #[test]
    fn end_to_end_writes_every_sink() {
        init_test_logging();
        let tmp = tempdir().unwrap();
        let cfg = config_in(tmp.path());

        let summary = run_document(&cfg, PAGE).unwrap();
        assert_eq!(summary.rows, 3);

        let expected = vec![rec("Big", 150.0), rec("Alpha", 1.23), rec("Gamma", 0.5)];
        assert_eq!(export::read_csv(&cfg.csv_path).unwrap(), expected);

        assert_eq!(summary.query.columns, vec!["name", "value_billions"]);
        assert_eq!(
            summary.query.rows,
            vec![vec![Value::Text("Big".into()), Value::Real(150.0)]]
        );

        let conn = store::open(&cfg.db_path).unwrap();
        let all = report::query(&conn, "SELECT * FROM Countries_by_GDP").unwrap();
        assert_eq!(all.rows.len(), 3);

        assert_eq!(
            logged_messages(&cfg.log_path),
            vec![EXTRACTED, TRANSFORMED, SAVED_CSV, LOADED_DB, COMPLETE]
        );
    }

    #[test]
    fn second_run_replaces_and_appends() {
        let tmp = tempdir().unwrap();
        let cfg = config_in(tmp.path());

        run_document(&cfg, PAGE).unwrap();
        run_document(&cfg, PAGE).unwrap();

        let conn = store::open(&cfg.db_path).unwrap();
        let all = report::query(&conn, "SELECT * FROM Countries_by_GDP").unwrap();
        assert_eq!(all.rows.len(), 3);
        assert_eq!(export::read_csv(&cfg.csv_path).unwrap().len(), 3);
        assert_eq!(logged_messages(&cfg.log_path).len(), 10);
    }

    #[test]
    fn structure_failure_writes_nothing() {
        init_test_logging();
        let tmp = tempdir().unwrap();
        let cfg = config_in(tmp.path());

        let err = run_document(&cfg, "<table><tbody><tr><td>x</td></tr></tbody></table>")
            .unwrap_err();
        assert!(matches!(err, EtlError::Structure(_)));
        assert!(!cfg.csv_path.exists());
        assert!(!cfg.db_path.exists());
        assert!(logged_messages(&cfg.log_path).is_empty());
    }

    #[test]
    fn parse_failure_stops_before_sinks() {
        let tmp = tempdir().unwrap();
        let cfg = config_in(tmp.path());
        let page = PAGE.replace("500", "5OO");

        let err = run_document(&cfg, &page).unwrap_err();
        assert!(matches!(err, EtlError::Parse { ref name, .. } if name == "Gamma"));
        assert!(!cfg.csv_path.exists());
        assert_eq!(logged_messages(&cfg.log_path), vec![EXTRACTED]);
    }

    #[test]
    fn load_failure_leaves_csv_behind() {
        let tmp = tempdir().unwrap();
        let cfg = Config {
            table_name: "bad name".into(),
            ..config_in(tmp.path())
        };

        let err = run_document(&cfg, PAGE).unwrap_err();
        assert!(matches!(err, EtlError::Storage { .. }));
        assert_eq!(export::read_csv(&cfg.csv_path).unwrap().len(), 3);
        assert_eq!(
            logged_messages(&cfg.log_path),
            vec![EXTRACTED, TRANSFORMED, SAVED_CSV]
        );
    }
}
