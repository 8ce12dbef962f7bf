//! printf-style numeric format strings
//!
//! Writers accept format strings such as `%.9e` or `%10.4f` so that output
//! matches what other geoscience tools produce. Only a single conversion is
//! supported per format string.

// crate modules
use crate::{f, NumFormat};

// standard library
use std::str::FromStr;

// external crates
use nom::branch::alt;
use nom::bytes::complete::take_while;
use nom::character::complete::{char, digit0, digit1, one_of};
use nom::combinator::{all_consuming, map, map_res, opt};
use nom::sequence::{preceded, tuple};
use nom::IResult;

/// Failures when interpreting a format string
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("invalid numeric format \"{0}\"")]
    InvalidFormat(String),
}

/// The conversion character of a format string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `%e` and `%E`
    Exponent { upper: bool },
    /// `%f` and `%F`
    Fixed,
    /// `%g` and `%G`
    General { upper: bool },
    /// `%d` and `%i`
    Integer,
    /// `%s`, whatever the default display is
    Display,
}

/// A parsed printf-style format for a single number
///
/// ```rust
/// # use strata_format::NumberFormat;
/// let fmt: NumberFormat = "%.3e".parse().unwrap();
/// assert_eq!(fmt.format_f64(1234.0), "1.234e+03");
///
/// let fmt: NumberFormat = "%8.2f".parse().unwrap();
/// assert_eq!(fmt.format_f64(-3.14159), "   -3.14");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NumberFormat {
    pub conversion: Conversion,
    pub precision: Option<usize>,
    pub width: Option<usize>,
    pub left_align: bool,
    pub zero_pad: bool,
    pub plus_sign: bool,
    pub space_sign: bool,
    pub alternate: bool,
}

impl Default for NumberFormat {
    /// Equivalent to `%.9e`
    fn default() -> Self {
        Self {
            conversion: Conversion::Exponent { upper: false },
            precision: Some(9),
            width: None,
            left_align: false,
            zero_pad: false,
            plus_sign: false,
            space_sign: false,
            alternate: false,
        }
    }
}

impl FromStr for NumberFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, fmt) =
            all_consuming(format_spec)(s.trim()).map_err(|_| Error::InvalidFormat(s.to_string()))?;
        Ok(fmt)
    }
}

impl std::fmt::Display for NumberFormat {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(fmt, "%")?;
        for (set, flag) in [
            (self.left_align, '-'),
            (self.plus_sign, '+'),
            (self.space_sign, ' '),
            (self.alternate, '#'),
            (self.zero_pad, '0'),
        ] {
            if set {
                write!(fmt, "{flag}")?;
            }
        }
        if let Some(width) = self.width {
            write!(fmt, "{width}")?;
        }
        if let Some(precision) = self.precision {
            write!(fmt, ".{precision}")?;
        }
        let c = match self.conversion {
            Conversion::Exponent { upper: false } => 'e',
            Conversion::Exponent { upper: true } => 'E',
            Conversion::Fixed => 'f',
            Conversion::General { upper: false } => 'g',
            Conversion::General { upper: true } => 'G',
            Conversion::Integer => 'd',
            Conversion::Display => 's',
        };
        write!(fmt, "{c}")
    }
}

impl NumberFormat {
    /// Format a floating point value
    pub fn format_f64(&self, value: f64) -> String {
        let body = if !value.is_finite() {
            Self::non_finite(value)
        } else {
            match self.conversion {
                Conversion::Exponent { upper } => {
                    let s = value.abs().sci(self.precision.unwrap_or(6), 2);
                    if upper {
                        s.to_uppercase()
                    } else {
                        s
                    }
                }
                Conversion::Fixed => f!("{:.p$}", value.abs(), p = self.precision.unwrap_or(6)),
                Conversion::General { upper } => {
                    let s = self.general(value.abs());
                    if upper {
                        s.to_uppercase()
                    } else {
                        s
                    }
                }
                Conversion::Integer => f!("{}", value.abs().trunc() as i64),
                Conversion::Display => f!("{}", value.abs()),
            }
        };
        self.pad(value.is_sign_negative() && value != 0.0 && !value.is_nan(), body)
    }

    /// Format an integer value
    ///
    /// Integer conversions keep full precision, anything else goes through the
    /// floating point path.
    pub fn format_i64(&self, value: i64) -> String {
        match self.conversion {
            Conversion::Integer | Conversion::Display => {
                self.pad(value < 0, f!("{}", value.unsigned_abs()))
            }
            _ => self.format_f64(value as f64),
        }
    }

    fn non_finite(value: f64) -> String {
        if value.is_nan() {
            "nan".to_string()
        } else {
            "inf".to_string()
        }
    }

    /// Shortest of the exponent and fixed forms, C rules
    fn general(&self, value: f64) -> String {
        let p = match self.precision {
            Some(0) => 1,
            Some(p) => p,
            None => 6,
        };

        // exponent after rounding to the requested significant figures
        let exp = {
            let s = f!("{:.p$e}", value, p = p - 1);
            s.split_once('e')
                .and_then(|(_, e)| e.parse::<i32>().ok())
                .unwrap_or(0)
        };

        if exp < -4 || exp >= p as i32 {
            let s = value.sci(p - 1, 2);
            if self.alternate {
                return s;
            }
            match s.split_once('e') {
                Some((mantissa, exponent)) => {
                    f!("{}e{}", Self::strip_zeros(mantissa), exponent)
                }
                None => s,
            }
        } else {
            let precision = (p as i32 - 1 - exp).max(0) as usize;
            let s = f!("{:.precision$}", value);
            if self.alternate {
                s
            } else {
                Self::strip_zeros(&s).to_string()
            }
        }
    }

    fn strip_zeros(s: &str) -> &str {
        if s.contains('.') {
            s.trim_end_matches('0').trim_end_matches('.')
        } else {
            s
        }
    }

    /// Apply the sign and width flags to an unsigned body
    fn pad(&self, negative: bool, body: String) -> String {
        let sign = if negative {
            "-"
        } else if self.plus_sign {
            "+"
        } else if self.space_sign {
            " "
        } else {
            ""
        };

        let len = sign.len() + body.len();
        let width = self.width.unwrap_or(0);
        if len >= width {
            return f!("{sign}{body}");
        }

        let fill = width - len;
        if self.left_align {
            f!("{sign}{body}{}", " ".repeat(fill))
        } else if self.zero_pad && body.starts_with(|c: char| c.is_ascii_digit()) {
            f!("{sign}{}{body}", "0".repeat(fill))
        } else {
            f!("{}{sign}{body}", " ".repeat(fill))
        }
    }
}

// ! ------------------------------------------------------------------------
// ! Parsers
// ! ------------------------------------------------------------------------

fn flags(i: &str) -> IResult<&str, &str> {
    take_while(|c: char| "-+ #0".contains(c))(i)
}

fn width(i: &str) -> IResult<&str, Option<usize>> {
    opt(map_res(digit1, str::parse::<usize>))(i)
}

fn precision(i: &str) -> IResult<&str, Option<usize>> {
    opt(preceded(
        char('.'),
        alt((
            map_res(digit1, str::parse::<usize>),
            // a bare '.' means zero precision
            map(digit0, |_| 0),
        )),
    ))(i)
}

fn conversion(i: &str) -> IResult<&str, Conversion> {
    map(one_of("eEfFgGdis"), |c| match c {
        'e' => Conversion::Exponent { upper: false },
        'E' => Conversion::Exponent { upper: true },
        'f' | 'F' => Conversion::Fixed,
        'g' => Conversion::General { upper: false },
        'G' => Conversion::General { upper: true },
        'd' | 'i' => Conversion::Integer,
        _ => Conversion::Display,
    })(i)
}

fn format_spec(i: &str) -> IResult<&str, NumberFormat> {
    let (i, (_, flags, width, precision, conversion)) =
        tuple((char('%'), flags, width, precision, conversion))(i)?;

    Ok((
        i,
        NumberFormat {
            conversion,
            precision,
            width,
            left_align: flags.contains('-'),
            zero_pad: flags.contains('0'),
            plus_sign: flags.contains('+'),
            space_sign: flags.contains(' '),
            alternate: flags.contains('#'),
        },
    ))
}
