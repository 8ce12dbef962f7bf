//! Text and binary parsing primitives
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod binary;
mod error;
mod text;

#[doc(inline)]
pub use binary::{
    find_sentinel, pack, read_madagascar, read_packed, unpack, Dtype, Endian, MADAGASCAR_SENTINEL,
};

#[doc(inline)]
pub use text::{
    columns_from_rows, data_lines, drop_comments, expand_repeater, is_comment, parse_floats,
    parse_integers, parse_repeated_line, parse_scalar, read_text, skip_lines, strip_comment,
    tokenize, Line, Scalar,
};

#[doc(inline)]
pub use error::{Error, Result};
