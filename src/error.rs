use std::path::PathBuf;
use thiserror::Error;

/// Pipeline-level failures. Per-cell coercion problems never surface here;
/// they degrade to text fallback inside the coercer.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file is missing or cannot be parsed as tabular data.
    #[error("source table unavailable: {path}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Any failure talking to the destination store.
    #[error("persistence failure: {0}")]
    Store(#[from] mongodb::error::Error),
}
