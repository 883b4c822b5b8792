use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the tool.
///
/// Problems with an individual case (missing files, no match) are reported
/// inline and are not errors.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Could not read config file {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("Could not parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    /// Writing the report or reading the prompt failed
    #[error("Console error: {0}")]
    Io(#[from] io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
