use gdp_etl::{report, store, Config};
use std::{env, process::exit};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // Expect exactly one CLI argument: the SQL to run.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("{}", usage(&args));
        exit(1);
    }

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    if let Err(e) = run(&args[1]) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

fn usage(args: &[String]) -> String {
    let program = args.first().map(String::as_str).unwrap_or("gdp_query");
    format!("Usage: {} <SQL>", program)
}

/// Print the query and its result against the database a full run produced.
fn run(sql: &str) -> anyhow::Result<()> {
    let cfg = Config::default();
    let conn = store::open(&cfg.db_path)?;
    report::run_query(&conn, sql)?;
    store::close(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_names_invoked_program() {
        let args = vec!["./target/debug/gdp_query".to_string()];
        assert_eq!(usage(&args), "Usage: ./target/debug/gdp_query <SQL>");
    }

    #[test]
    fn usage_without_argv_falls_back() {
        assert_eq!(usage(&[]), "Usage: gdp_query <SQL>");
    }
}
