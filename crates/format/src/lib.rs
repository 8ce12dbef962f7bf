//! Number formatting for the strata writers
//!
//! Writers need C style scientific notation (`1.0e+00` where Rust gives
//! `1e0`) and the printf style format strings users already pass around,
//! such as `%.9e`.
#![doc = include_str!("../readme.md")]

mod printf;

#[doc(inline)]
pub use printf::{Conversion, Error, NumberFormat};

/// Short alias for `format!`
pub use std::format as f;

// standard library
use std::fmt::LowerExp;

/// Scientific notation with a signed, zero padded exponent
pub trait NumFormat {
    /// `precision` digits after the point and at least `exp_pad` exponent digits
    ///
    /// ```rust
    /// # use strata_format::NumFormat;
    /// assert_eq!((-1.0).sci(5, 2), "-1.00000e+00");
    /// assert_eq!(2.5e-7.sci(3, 2), "2.500e-07");
    /// assert_eq!(1.0e120.sci(1, 2), "1.0e+120");
    /// assert_eq!(f64::NAN.sci(3, 2), "NaN");
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: LowerExp> NumFormat for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let mut mantissa = f!("{self:.precision$e}");
        let Some(idx) = mantissa.find('e') else {
            // inf and NaN
            return mantissa;
        };
        let exponent = mantissa.split_off(idx);
        let (sign, digits) = match exponent.strip_prefix("e-") {
            Some(digits) => ('-', digits),
            None => ('+', &exponent[1..]),
        };
        mantissa.push_str(&f!("e{sign}{digits:0>exp_pad$}"));
        mantissa
    }
}
