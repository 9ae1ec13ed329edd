//! Errors raised while reading plan and assumption files

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: invalid {field} '{value}'")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("row {row}: unknown asset '{name}'")]
    UnknownAsset { row: usize, name: String },

    #[error("missing rate for asset {0}")]
    MissingAsset(&'static str),
}
