//! Result and Error types for strata-pvgp

/// Type alias for Result<T, pvgp::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `strata-pvgp` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to (de)serialise the PVGP header")]
    FailedSerde(#[from] serde_json::Error),

    #[error("invalid base64 payload")]
    FailedDecode(#[from] base64::DecodeError),

    #[error(transparent)]
    ParseError(#[from] strata_parse::Error),

    #[error(transparent)]
    GridError(#[from] strata_grid::Error),

    #[error(transparent)]
    SeriesError(#[from] strata_series::Error),

    #[error("PVGP header has no \"{0}\" key")]
    MissingKey(String),

    #[error("unknown memory order \"{0}\", expected F or C")]
    UnknownOrder(String),
}
