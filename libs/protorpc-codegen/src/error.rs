//! Error types for protorpc code generation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown backend: {name} (available: {})", .available.join(", "))]
    UnknownBackend {
        name: String,
        available: Vec<String>,
    },

    #[error("No code generation backend registered")]
    NoBackends,

    #[error("Failed to decode CodeGeneratorRequest: {0}")]
    Decode(#[from] prost::DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to reformat generated source text.
///
/// Never fatal: the driver falls back to the unformatted text.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("generated source does not parse: {0}")]
    Parse(#[from] syn::Error),
}
