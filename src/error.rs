// ⚠️ Domain Errors - typed failures raised by the library
// Application code wraps these with anyhow context at the boundaries

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Ecosystem tag outside the closed color table
    #[error("unknown ecosystem tag: {0:?}")]
    UnknownEcosystem(String),

    /// Transaction amounts must be positive integers
    #[error("transaction {source_account} -> {target_account} has non-positive amount")]
    InvalidAmount {
        source_account: String,
        target_account: String,
    },

    /// Data source name not recognised
    #[error("unknown data source: {0:?} (expected sample, random or csv)")]
    UnknownSource(String),
}
