//! Line oriented text parsing primitives

// crate modules
use crate::error::{Error, Result};

// standard library
use std::fs;
use std::path::Path;

// strata modules
use strata_format::f;
use strata_grid::NumericArray;

// external crates
use log::{debug, trace};

// nom parser combinators
use nom::character::complete::{char, digit1, space0};
use nom::combinator::{all_consuming, map_res};
use nom::number::complete::double;
use nom::sequence::{delimited, separated_pair};
use nom::IResult;

/// A line of text with its 1-based line number
pub type Line<'a> = (usize, &'a str);

/// Read a whole text file
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Number every line of `text`, discarding the first `n`
pub fn skip_lines(text: &str, n: usize) -> impl Iterator<Item = Line<'_>> {
    text.lines().enumerate().skip(n).map(|(i, l)| (i + 1, l))
}

/// True if the first non-whitespace character is any of `prefix`
///
/// ```rust
/// # use strata_parse::is_comment;
/// assert!(is_comment("  ! a comment", "!#"));
/// assert!(!is_comment("1.0 ! trailing", "!#"));
/// ```
pub fn is_comment(line: &str, prefix: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_some_and(|c| prefix.contains(c))
}

/// Drop comment lines and blank lines
pub fn drop_comments<'a, 'p, I>(lines: I, prefix: &'p str) -> impl Iterator<Item = Line<'a>> + 'p
where
    I: Iterator<Item = Line<'a>> + 'p,
{
    lines.filter(move |(_, l)| !l.trim().is_empty() && !is_comment(l, prefix))
}

/// The useful lines of a file after skipping rows and dropping comments
pub fn data_lines<'a>(text: &'a str, skiprows: usize, prefix: &'a str) -> Vec<Line<'a>> {
    drop_comments(skip_lines(text, skiprows), prefix).collect()
}

/// Everything before the first `marker`
///
/// ```rust
/// # use strata_parse::strip_comment;
/// assert_eq!(strip_comment("10 10 5 ! cells", '!'), "10 10 5 ");
/// ```
pub fn strip_comment(line: &str, marker: char) -> &str {
    match line.find(marker) {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Split a line on a single character delimiter
///
/// A space delimiter splits on any run of whitespace, any other delimiter is
/// split exactly with surrounding whitespace trimmed from every field.
///
/// ```rust
/// # use strata_parse::tokenize;
/// assert_eq!(tokenize("1.0   2.0 3", ' '), vec!["1.0", "2.0", "3"]);
/// assert_eq!(tokenize("a, b,,c", ','), vec!["a", "b", "", "c"]);
/// ```
pub fn tokenize(line: &str, delimiter: char) -> Vec<&str> {
    if delimiter == ' ' {
        line.split_whitespace().collect()
    } else {
        line.trim_end_matches(['\r', '\n'])
            .split(delimiter)
            .map(|t| t.trim())
            .collect()
    }
}

/// `k*v` with optional whitespace around the `*`
fn repeater(i: &str) -> IResult<&str, (usize, f64)> {
    separated_pair(
        map_res(digit1, str::parse::<usize>),
        delimited(space0, char('*'), space0),
        double,
    )(i)
}

/// Expand a single token, `k*v` becomes `k` copies of `v`
///
/// ```rust
/// # use strata_parse::expand_repeater;
/// assert_eq!(expand_repeater("3*2.5").unwrap(), vec![2.5, 2.5, 2.5]);
/// assert_eq!(expand_repeater("7.0").unwrap(), vec![7.0]);
/// assert!(expand_repeater("0*1.0").is_err());
/// ```
pub fn expand_repeater(token: &str) -> Result<Vec<f64>> {
    let token = token.trim();
    if let Ok((_, (k, v))) = all_consuming(repeater)(token) {
        if k == 0 {
            return Err(Error::ParseError(f!("repeat count of \"{token}\" must be positive")));
        }
        return Ok(vec![v; k]);
    }

    match parse_scalar(token) {
        Scalar::Int(v) => Ok(vec![v as f64]),
        Scalar::Float(v) => Ok(vec![v]),
        Scalar::Text(_) => Err(Error::ParseError(f!("\"{token}\" is not a number"))),
    }
}

/// Concatenate the expansions of every whitespace separated token on a line
///
/// ```rust
/// # use strata_parse::parse_repeated_line;
/// assert_eq!(parse_repeated_line("2*1.0 5.0").unwrap(), vec![1.0, 1.0, 5.0]);
/// ```
pub fn parse_repeated_line(line: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for token in line.split_whitespace() {
        values.extend(expand_repeater(token)?);
    }
    Ok(values)
}

/// Parse every whitespace separated token as a float
pub fn parse_floats(line: &str, line_number: usize) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|t| match parse_scalar(t) {
            Scalar::Int(v) => Ok(v as f64),
            Scalar::Float(v) => Ok(v),
            Scalar::Text(s) => Err(Error::MalformedRow {
                line: line_number,
                reason: f!("\"{s}\" is not a number"),
            }),
        })
        .collect()
}

/// Parse every whitespace separated token as an integer
pub fn parse_integers(line: &str, line_number: usize) -> Result<Vec<i64>> {
    line.split_whitespace()
        .map(|t| {
            t.parse::<i64>().map_err(|_| Error::MalformedRow {
                line: line_number,
                reason: f!("\"{t}\" is not an integer"),
            })
        })
        .collect()
}

/// Best effort interpretation of a single token
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Try an integer, then a float, then fall back to text
///
/// ```rust
/// # use strata_parse::{parse_scalar, Scalar};
/// assert_eq!(parse_scalar("42"), Scalar::Int(42));
/// assert_eq!(parse_scalar("-1.5e2"), Scalar::Float(-150.0));
/// assert_eq!(parse_scalar("shale"), Scalar::Text("shale".to_string()));
/// assert!(matches!(parse_scalar("NaN"), Scalar::Float(v) if v.is_nan()));
/// ```
pub fn parse_scalar(token: &str) -> Scalar {
    let token = token.trim();
    if token.eq_ignore_ascii_case("nan") {
        return Scalar::Float(f64::NAN);
    }
    if let Ok(v) = token.parse::<i64>() {
        return Scalar::Int(v);
    }
    if let Ok(v) = token.parse::<f64>() {
        return Scalar::Float(v);
    }
    Scalar::Text(token.to_string())
}

/// Column type decided by the first data row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

impl ColumnKind {
    fn of(token: &str) -> Self {
        match parse_scalar(token) {
            Scalar::Int(_) => Self::Int,
            Scalar::Float(_) => Self::Float,
            Scalar::Text(_) => Self::Text,
        }
    }
}

/// Build typed columns from tokenised rows
///
/// The type of every column comes from its value on the first row and all
/// later rows are coerced to it. An integer column is promoted to float as
/// soon as any later row holds a float or `nan`. Text columns become fixed
/// width character arrays.
///
/// ```rust
/// # use strata_parse::columns_from_rows;
/// # use strata_grid::ElementType;
/// let names = ["id", "value"].map(String::from);
/// let rows = vec![(3, vec!["1", "2.5"]), (4, vec!["2", "3"])];
/// let columns = columns_from_rows(&names, &rows).unwrap();
///
/// assert_eq!(columns[0].element_type(), ElementType::I64);
/// assert_eq!(columns[1].element_type(), ElementType::F64);
/// ```
pub fn columns_from_rows(names: &[String], rows: &[(usize, Vec<&str>)]) -> Result<Vec<NumericArray>> {
    let n = names.len();
    for (line, row) in rows {
        if row.len() != n {
            return Err(Error::MalformedRow {
                line: *line,
                reason: f!("expected {n} values, found {}", row.len()),
            });
        }
    }

    let kinds = match rows.first() {
        Some((_, row)) => row.iter().map(|t| ColumnKind::of(t)).collect(),
        None => vec![ColumnKind::Float; n],
    };
    trace!("Column kinds {kinds:?}");

    let mut columns = Vec::with_capacity(n);
    for (c, (name, kind)) in names.iter().zip(kinds).enumerate() {
        let tokens = rows.iter().map(|(line, row)| (*line, row[c]));
        let column = match kind {
            ColumnKind::Int => match int_column(tokens.clone()) {
                Some(values) => NumericArray::new(name.as_str(), values)?,
                None => {
                    debug!("Promoting integer column \"{name}\" to float");
                    NumericArray::new(name.as_str(), float_column(tokens)?)?
                }
            },
            ColumnKind::Float => NumericArray::new(name.as_str(), float_column(tokens)?)?,
            ColumnKind::Text => {
                let values = tokens.map(|(_, t)| t.to_string()).collect::<Vec<String>>();
                NumericArray::from_strings(name.as_str(), &values)?
            }
        };
        columns.push(column);
    }

    Ok(columns)
}

/// None when any token is not an integer
fn int_column<'a, I: Iterator<Item = Line<'a>>>(tokens: I) -> Option<Vec<i64>> {
    tokens.map(|(_, t)| t.parse::<i64>().ok()).collect()
}

fn float_column<'a, I: Iterator<Item = Line<'a>>>(tokens: I) -> Result<Vec<f64>> {
    tokens
        .map(|(line, t)| match parse_scalar(t) {
            Scalar::Int(v) => Ok(v as f64),
            Scalar::Float(v) => Ok(v),
            Scalar::Text(_) => Err(Error::MalformedRow {
                line,
                reason: f!("\"{t}\" is not a number"),
            }),
        })
        .collect()
}

#[cfg(test)]
mod text_tests {
    use super::*;
    use rstest::rstest;
    use strata_grid::ElementType;

    #[rstest]
    #[case("4*1.0", vec![1.0; 4])]
    #[case("1 * 2", vec![2.0])]
    #[case("-3.5", vec![-3.5])]
    #[case("12", vec![12.0])]
    fn repeaters(#[case] token: &str, #[case] expected: Vec<f64>) {
        assert_eq!(expand_repeater(token).unwrap(), expected);
    }

    #[test]
    fn bad_repeater() {
        assert!(expand_repeater("2*x").is_err());
        assert!(parse_repeated_line("1.0 a").is_err());
    }

    #[test]
    fn lines_and_comments() {
        let text = "skip me\n# comment\n\n1 2\n  ! other\n3 4\n";
        let lines = data_lines(text, 1, "#!");
        assert_eq!(lines, vec![(4, "1 2"), (6, "3 4")]);
    }

    #[test]
    fn tab_tokens() {
        assert_eq!(tokenize("a\tb\t c", '\t'), vec!["a", "b", "c"]);
    }

    #[test]
    fn ragged_rows() {
        let names = ["a", "b"].map(String::from);
        let rows = vec![(1, vec!["1", "2"]), (2, vec!["3"])];
        let err = columns_from_rows(&names, &rows).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn integer_column_promotes_to_float() {
        let names = ["a".to_string()];
        let rows = vec![(1, vec!["1"]), (2, vec!["1.5"])];
        let columns = columns_from_rows(&names, &rows).unwrap();
        assert_eq!(columns[0].element_type(), ElementType::F64);
        assert_eq!(columns[0].to_f64(), vec![1.0, 1.5]);

        let rows = vec![(1, vec!["0"]), (2, vec!["nan"]), (3, vec!["2"])];
        let columns = columns_from_rows(&names, &rows).unwrap();
        assert_eq!(columns[0].element_type(), ElementType::F64);
        assert!(columns[0].value(1, 0).is_nan());

        // text after an integer is still an error
        let rows = vec![(1, vec!["1"]), (2, vec!["shale"])];
        let err = columns_from_rows(&names, &rows).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { line: 2, .. }));

        // float columns accept integers
        let rows = vec![(1, vec!["1.5"]), (2, vec!["1"])];
        let columns = columns_from_rows(&names, &rows).unwrap();
        assert_eq!(columns[0].to_f64(), vec![1.5, 1.0]);
    }

    #[test]
    fn text_and_nan_columns() {
        let names = ["rock", "v"].map(String::from);
        let rows = vec![(1, vec!["shale", "nan"]), (2, vec!["sand", "2"])];
        let columns = columns_from_rows(&names, &rows).unwrap();
        assert_eq!(columns[0].element_type(), ElementType::Char);
        assert_eq!(columns[0].strings().unwrap(), vec!["shale", "sand"]);
        assert!(columns[1].value(0, 0).is_nan());
    }

    #[test]
    fn no_rows() {
        let names = ["a".to_string()];
        let columns = columns_from_rows(&names, &[]).unwrap();
        assert!(columns[0].is_empty());
    }
}
