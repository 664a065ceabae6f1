use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied value is outside the domain the model accepts
    /// (zero kernel, zero throughput, negative dimension).
    #[error("Invalid argument `{name}`: {detail}")]
    InvalidArgument { name: &'static str, detail: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    // Higher layers map their parse errors (YAML, CLI input) into this
    // variant so callers only deal with one error type.
    #[error("Scenario error: {0}")]
    Scenario(String),

    /// A computed result failed a post-condition check.
    #[error("Invariant violated: {0}")]
    Invariant(String),
}

impl Error {
    pub fn invalid(name: &'static str, detail: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            detail: detail.into(),
        }
    }
}
