//! Result and Error types for the strata command line

/// Type alias for Result<T, cli::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// Everything that can stop a conversion
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to set up logging")]
    LoggerError(#[from] log::SetLoggerError),

    #[error(transparent)]
    GridError(#[from] strata_grid::Error),

    #[error(transparent)]
    FilterError(#[from] strata_filters::Error),

    #[error(transparent)]
    GeneralError(#[from] strata_general::Error),

    #[error(transparent)]
    GslibError(#[from] strata_gslib::Error),

    #[error(transparent)]
    UbcError(#[from] strata_ubc::Error),

    #[error(transparent)]
    Ws3dError(#[from] strata_ws3d::Error),

    #[error(transparent)]
    PvgpError(#[from] strata_pvgp::Error),

    #[error("a packed binary array needs --extent to be placed on a grid")]
    MissingExtent,

    #[error("only point sets can be voxelized, found a {0}")]
    NotPoints(&'static str),
}
