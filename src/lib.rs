// src/lib.rs

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod history;
pub mod model;
pub mod pipeline;
pub mod process;
pub mod report;
pub mod store;

pub use config::Config;
pub use error::{EtlError, Result};
pub use model::{RawRecord, Record, Table};
