// src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EtlError>;

/// Every way a run can fail. Nothing in the pipeline recovers from these;
/// the first one aborts the run.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("fetching {url}")]
    Network {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The page no longer has the shape the extractor expects.
    #[error("unexpected page structure: {0}")]
    Structure(String),

    #[error("value {raw:?} for {name:?} is not a finite non-negative number")]
    Parse { name: String, raw: String },

    #[error("writing {target}")]
    Storage {
        target: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("running query `{query}`")]
    Query {
        query: String,
        #[source]
        source: rusqlite::Error,
    },
}

impl EtlError {
    pub fn network(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        EtlError::Network {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn storage(
        target: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        EtlError::Storage {
            target: target.into(),
            source: source.into(),
        }
    }
}
