//! `strata` is a modular toolkit of readers, writers and filters for
//! geoscience grids, meshes and point data
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use strata_format as format;

#[doc(inline)]
pub use strata_grid as grid;

#[doc(inline)]
pub use strata_parse as parse;

#[doc(inline)]
pub use strata_series as series;

#[doc(inline)]
pub use strata_utils as utils;

#[cfg(feature = "filters")]
#[cfg_attr(docsrs, doc(cfg(feature = "filters")))]
#[doc(inline)]
pub use strata_filters as filters;

#[cfg(feature = "general")]
#[cfg_attr(docsrs, doc(cfg(feature = "general")))]
#[doc(inline)]
pub use strata_general as general;

#[cfg(feature = "gslib")]
#[cfg_attr(docsrs, doc(cfg(feature = "gslib")))]
#[doc(inline)]
pub use strata_gslib as gslib;

#[cfg(feature = "pvgp")]
#[cfg_attr(docsrs, doc(cfg(feature = "pvgp")))]
#[doc(inline)]
pub use strata_pvgp as pvgp;

#[cfg(feature = "ubc")]
#[cfg_attr(docsrs, doc(cfg(feature = "ubc")))]
#[doc(inline)]
pub use strata_ubc as ubc;

#[cfg(feature = "ws3d")]
#[cfg_attr(docsrs, doc(cfg(feature = "ws3d")))]
#[doc(inline)]
pub use strata_ws3d as ws3d;
