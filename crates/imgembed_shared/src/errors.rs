//! Error results that can be returned from the converter
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, resizing, emitting or reading back an image literal
#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("cannot decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("io error: {0}")]
    IO(#[from] std::io::Error),
}

impl Error {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    /// Process exit code used when the binaries run in strict mode
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::FileNotFound(_) => 2,
            Error::Decode { .. } => 3,
            Error::InvalidArgument(_) => 4,
            Error::Write { .. } => 5,
            Error::Parse { .. } => 6,
            Error::IO(_) => 1,
        }
    }
}

/// Result with the typed error of this crate
pub type EmbedResult<T> = std::result::Result<T, Error>;
