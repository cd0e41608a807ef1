// src/config.rs

use std::path::PathBuf;

use crate::extract::TableLayout;

static SOURCE_URL: &str = "https://web.archive.org/web/20230902185326/https://en.wikipedia.org/wiki/List_of_countries_by_GDP_%28nominal%29";
static CSV_PATH: &str = "Countries_by_GDP.csv";
static DB_PATH: &str = "World_Economies.db";
static TABLE_NAME: &str = "Countries_by_GDP";
static LOG_PATH: &str = "etl_project_log.txt";

/// Output and source locations for one run. There is no file or env
/// loading: `Config::default()` is what the binary uses.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub csv_path: PathBuf,
    pub db_path: PathBuf,
    pub table_name: String,
    pub log_path: PathBuf,
    pub layout: TableLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: SOURCE_URL.to_string(),
            csv_path: PathBuf::from(CSV_PATH),
            db_path: PathBuf::from(DB_PATH),
            table_name: TABLE_NAME.to_string(),
            log_path: PathBuf::from(LOG_PATH),
            layout: TableLayout::default(),
        }
    }
}

impl Config {
    /// Everything at or above 100 billion.
    pub fn default_query(&self) -> String {
        format!(
            "SELECT * FROM {} WHERE value_billions >= 100",
            self.table_name
        )
    }
}
