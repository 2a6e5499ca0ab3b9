use thiserror::Error;

/// The primary error type for all operations in `idscramble`.
///
/// Scrambling itself is total and never fails; every variant here comes from
/// the surrounding plumbing: reading lines, writing lines, or loading configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// An error reading from the line source or writing to the line sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An error that occurred during regex compilation.
    #[error("Pattern compilation failed: {0}")]
    Regex(#[from] regex::Error),

    /// An error that occurred while parsing a YAML configuration file.
    #[error("Config parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A configuration value that cannot be used (empty salt, unknown digest, ...).
    #[error("Config error: {0}")]
    Config(String),

    /// An error related to JSON serialization of the run summary.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, idscramble::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Config(s.to_string())
    }
}
