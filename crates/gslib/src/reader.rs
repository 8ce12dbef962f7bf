//! GSLIB table and point set readers

// crate modules
use crate::error::{Error, Result};

// standard library
use std::path::Path;

// strata modules
use strata_format::f;
use strata_general::table_to_points;
use strata_grid::{ParsedFile, ParsedKind, PointSet, Table};
use strata_parse::{columns_from_rows, drop_comments, read_text, skip_lines, tokenize};
use strata_series::{Algorithm, Information, TimeSeries};

// external crates
use log::{debug, trace};

/// Reader for GSLIB tables
///
/// The header line is kept verbatim and is available after a read through
/// [header()](GslibReader::header). Rows are split on any run of whitespace
/// unless another delimiter is set, and lines starting with a comment
/// character (`#` by default) are ignored once the column names are read.
///
/// ```rust
/// # use strata_gslib::GslibReader;
/// let text = "assays\n3\nX\nY\nAu\n1 2 0.5\n3 4 0.7\n";
/// let parsed = GslibReader::default().parse_str(text).unwrap();
///
/// assert_eq!(parsed.header_lines, vec!["assays"]);
/// assert_eq!(parsed.column_names(), vec!["X", "Y", "Au"]);
/// assert_eq!(parsed.n_rows(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct GslibReader {
    series: TimeSeries,
    skiprows: usize,
    comments: String,
    delimiter: char,
    header: Option<String>,
}

impl Default for GslibReader {
    fn default() -> Self {
        Self {
            series: TimeSeries::default(),
            skiprows: 0,
            comments: "#".to_string(),
            delimiter: ' ',
            header: None,
        }
    }
}

impl GslibReader {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            series: TimeSeries::new(files),
            ..Default::default()
        }
    }

    pub fn set_skip_rows(&mut self, skiprows: usize) {
        self.skiprows = skiprows;
    }

    pub fn skiprows(&self) -> usize {
        self.skiprows
    }

    pub fn set_comments<S: Into<String>>(&mut self, comments: S) {
        self.comments = comments.into();
    }

    /// Any single character, a space means any run of whitespace
    pub fn set_delimiter(&mut self, delimiter: char) {
        self.delimiter = delimiter;
    }

    /// Header line of the most recently read file
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn series_mut(&mut self) -> &mut TimeSeries {
        &mut self.series
    }

    /// Split a file into its header, column names and typed columns
    pub fn parse_str(&self, text: &str) -> Result<ParsedFile> {
        let mut lines = skip_lines(text, self.skiprows);

        let (_, header) = lines
            .next()
            .ok_or_else(|| Error::NotGSLIB("missing header line".to_string()))?;

        let (line, count) = lines
            .next()
            .ok_or_else(|| Error::NotGSLIB("missing column count".to_string()))?;
        let n = count.trim().parse::<usize>().map_err(|_| {
            Error::NotGSLIB(f!("line {line} \"{}\" is not a column count", count.trim()))
        })?;

        let names = lines
            .by_ref()
            .take(n)
            .map(|(_, l)| l.trim().to_string())
            .collect::<Vec<String>>();
        if names.len() != n {
            return Err(Error::NotGSLIB(f!(
                "expected {n} column names, found {}",
                names.len()
            )));
        }
        trace!("GSLIB columns {names:?}");

        let rows = drop_comments(lines, &self.comments)
            .map(|(i, l)| (i, tokenize(l, self.delimiter)))
            .collect::<Vec<(usize, Vec<&str>)>>();

        let mut parsed = ParsedFile::new(ParsedKind::Table);
        parsed.header_lines.push(header.trim_end().to_string());
        parsed.columns = columns_from_rows(&names, &rows)?;
        Ok(parsed)
    }

    /// Parse a single file, outside of any series
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedFile> {
        debug!("Reading GSLIB file {}", path.as_ref().display());
        self.parse_str(&read_text(path)?)
    }

    /// Parse the file nearest the requested time, keeping its header
    pub fn read_parsed(&mut self, time: Option<f64>) -> Result<ParsedFile> {
        let parsed = self.parse_file(self.series.file_for(time)?)?;
        self.header = parsed.header_lines.first().cloned();
        Ok(parsed)
    }

    /// Read the file nearest the requested time as a table
    pub fn read(&mut self, time: Option<f64>) -> Result<Table> {
        Ok(self.read_parsed(time)?.into_table()?)
    }
}

impl Algorithm for GslibReader {
    type Input = ();
    type Output = Table;
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("table").with_series(&self.series))
    }

    fn request_data(&mut self, _: &(), time: Option<f64>) -> Result<Table> {
        self.read(time)
    }
}

/// Reader for GSLIB files whose first three columns are X, Y and Z
#[derive(Debug, Clone, Default)]
pub struct GslibPointSetReader {
    reader: GslibReader,
    copy_z: bool,
}

impl GslibPointSetReader {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            reader: GslibReader::new(files),
            copy_z: false,
        }
    }

    pub fn reader_mut(&mut self) -> &mut GslibReader {
        &mut self.reader
    }

    /// Also attach Z as an `Elevation` point array
    pub fn set_copy_z(&mut self, copy_z: bool) {
        self.copy_z = copy_z;
    }

    pub fn read(&mut self, time: Option<f64>) -> Result<PointSet> {
        let table = self.reader.read(time)?;
        Ok(table_to_points(table, self.copy_z)?)
    }
}

impl Algorithm for GslibPointSetReader {
    type Input = ();
    type Output = PointSet;
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("points").with_series(self.reader.series()))
    }

    fn request_data(&mut self, _: &(), time: Option<f64>) -> Result<PointSet> {
        self.read(time)
    }
}

#[cfg(test)]
mod reader_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("header only\n")]
    #[case("header\nthree\nA\n")]
    #[case("header\n3\nA\nB\n")]
    fn not_gslib(#[case] text: &str) {
        let result = GslibReader::default().parse_str(text);
        assert!(matches!(result, Err(Error::NotGSLIB(_))));
    }

    #[test]
    fn count_message() {
        let err = GslibReader::default().parse_str("h\nx\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "not in GSLIB format, line 2 \"x\" is not a column count"
        );
    }

    #[test]
    fn comments_and_skiprows() {
        let mut reader = GslibReader::default();
        reader.set_skip_rows(1);
        let text = "junk\nheader\n2\nA \nB\r\n# note\n1 2\n\n3 4\n";

        let parsed = reader.parse_str(text).unwrap();
        assert_eq!(parsed.column_names(), vec!["A", "B"]);
        assert_eq!(parsed.columns[1].to_f64(), vec![2.0, 4.0]);
    }

    #[test]
    fn no_rows() {
        let table = GslibReader::default()
            .parse_str("empty\n1\nA\n")
            .unwrap()
            .into_table()
            .unwrap();
        assert_eq!(table.n_rows(), 0);
        assert_eq!(table.names(), vec!["A"]);
    }
}
