//! Result and Error types for strata-parse

/// Type alias for Result<T, parse::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `strata-parse` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    GridError(#[from] strata_grid::Error),

    #[error("unknown data type \"{0}\", expected float32, float64 or int32")]
    DtypeUnknown(String),

    #[error("unknown endian marker \"{0}\", expected one of @ < >")]
    EndianUnknown(String),

    #[error("{bytes} bytes is not a whole number of {size} byte values")]
    LengthMismatch { bytes: usize, size: usize },

    #[error("malformed row on line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("parser failed: {0}")]
    ParseError(String),
}
