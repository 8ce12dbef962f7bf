//! Delimited text tables

// crate modules
use crate::error::{Error, Result};

// standard library
use std::path::Path;

// strata modules
use strata_format::f;
use strata_grid::Table;
use strata_parse::{columns_from_rows, drop_comments, read_text, skip_lines, tokenize};
use strata_series::{Algorithm, Information, TimeSeries, TitlesGuard};

// external crates
use log::{debug, trace};

/// Where column titles are taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TitleStyle {
    /// The first data line, split on the delimiter
    #[default]
    Delimited,
    /// A leading `! a, b, c` line, titles separated by `", "`
    Xyz,
}

/// Reader for delimited text tables
///
/// Defaults are a space delimiter (any run of whitespace), no skipped rows,
/// `!` comments and a title row. Without titles the columns are named
/// `Field 0`, `Field 1` and so on.
///
/// Every file of a series must carry the same titles.
///
/// ```rust
/// # use strata_general::DelimitedTextReader;
/// let mut reader = DelimitedTextReader::default();
/// reader.set_delimiter(',');
///
/// let text = "x, y, rock\n! a comment\n1.0, 2, shale\n3.5, 4, granite\n";
/// let table = reader.parse_str(text).unwrap();
///
/// assert_eq!(table.names(), vec!["x", "y", "rock"]);
/// assert_eq!(table.n_rows(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DelimitedTextReader {
    series: TimeSeries,
    delimiter: char,
    use_tab: bool,
    skiprows: usize,
    comments: String,
    has_titles: bool,
    title_style: TitleStyle,
    titles: Vec<String>,
    guard: TitlesGuard,
}

impl Default for DelimitedTextReader {
    fn default() -> Self {
        Self {
            series: TimeSeries::default(),
            delimiter: ' ',
            use_tab: false,
            skiprows: 0,
            comments: "!".to_string(),
            has_titles: true,
            title_style: TitleStyle::Delimited,
            titles: Vec::new(),
            guard: TitlesGuard::new(),
        }
    }
}

impl DelimitedTextReader {
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

    /// Reader for XYZ files, where only the title line is comma separated
    ///
    /// The title line starts with `! ` so comments switch to `#`.
    pub fn xyz<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            comments: "#".to_string(),
            title_style: TitleStyle::Xyz,
            ..Self::new(files)
        }
    }

    pub fn set_delimiter(&mut self, delimiter: char) {
        self.delimiter = delimiter;
    }

    /// Split on tabs whatever the delimiter is set to
    pub fn set_use_tab(&mut self, use_tab: bool) {
        self.use_tab = use_tab;
    }

    /// The delimiter actually used for splitting
    pub fn delimiter(&self) -> char {
        if self.use_tab {
            '\t'
        } else {
            self.delimiter
        }
    }

    /// Raw lines discarded before anything else, comments included
    pub fn set_skip_rows(&mut self, skiprows: usize) {
        self.skiprows = skiprows;
    }

    /// Characters that start a comment line
    pub fn set_comments<S: Into<String>>(&mut self, comments: S) {
        self.comments = comments.into();
    }

    pub fn set_has_titles(&mut self, has_titles: bool) {
        self.has_titles = has_titles;
    }

    pub fn has_titles(&self) -> bool {
        self.has_titles
    }

    pub fn set_title_style(&mut self, style: TitleStyle) {
        self.title_style = style;
    }

    /// Titles of the most recently read file
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Append a file to the series
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) {
        self.series.add_file(path);
        self.guard.reset();
    }

    pub fn clear_files(&mut self) {
        self.series.clear_files();
        self.guard.reset();
    }

    pub fn set_dt(&mut self, dt: f64) {
        self.series.set_dt(dt);
    }

    /// Parse the contents of a single file
    pub fn parse_str(&self, text: &str) -> Result<Table> {
        let delimiter = self.delimiter();
        let mut raw = skip_lines(text, self.skiprows);

        // the xyz title line looks like a comment so take it first
        let mut titles = match (self.has_titles, self.title_style) {
            (true, TitleStyle::Xyz) => {
                let (_, line) = raw
                    .find(|(_, l)| !l.trim().is_empty())
                    .ok_or(Error::MissingTitles)?;
                Some(xyz_titles(line))
            }
            _ => None,
        };

        let mut lines = drop_comments(raw, &self.comments);
        if self.has_titles && titles.is_none() {
            let (_, line) = lines.next().ok_or(Error::MissingTitles)?;
            titles = Some(tokenize(line, delimiter).into_iter().map(String::from).collect());
        }

        let rows = lines
            .map(|(n, l)| (n, tokenize(l, delimiter)))
            .collect::<Vec<(usize, Vec<&str>)>>();
        trace!("{} data rows", rows.len());

        let names = match titles {
            Some(titles) => titles,
            None => field_names(rows.first().map_or(0, |(_, r)| r.len())),
        };

        let columns = columns_from_rows(&names, &rows)?;
        Ok(Table::from_columns(columns)?)
    }

    /// Parse a single file, outside of any series
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Table> {
        debug!("Reading delimited text {}", path.as_ref().display());
        self.parse_str(&read_text(path)?)
    }

    /// Read the file nearest the requested time
    ///
    /// Every file must carry the titles of the first file of the series.
    pub fn read(&mut self, time: Option<f64>) -> Result<Table> {
        if !self.guard.is_seeded() && self.series.index_for(time) != 0 {
            let first = self.series.file(0).map(|p| self.parse_file(p)).transpose()?;
            if let Some(first) = first {
                self.guard.check(&owned_names(&first))?;
            }
        }
        let table = self.parse_file(self.series.file_for(time)?)?;
        let titles = owned_names(&table);
        self.guard.check(&titles)?;
        self.titles = titles;
        Ok(table)
    }
}

impl Algorithm for DelimitedTextReader {
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

fn owned_names(table: &Table) -> Vec<String> {
    table.names().into_iter().map(String::from).collect()
}

/// `Field 0`, `Field 1`, ... for files without titles
pub fn field_names(n: usize) -> Vec<String> {
    (0..n).map(|i| f!("Field {i}")).collect()
}

fn xyz_titles(line: &str) -> Vec<String> {
    line.trim()
        .trim_start_matches('!')
        .split(", ")
        .map(|t| t.trim().to_string())
        .collect()
}

#[cfg(test)]
mod delimited_tests {
    use super::*;
    use rstest::rstest;
    use strata_grid::ElementType;

    #[rstest]
    #[case(' ', false, "a b c\n1 2 3\n4 5 6\n")]
    #[case(',', false, "a,b,c\n1,2,3\n4,5,6\n")]
    #[case(',', true, "a\tb\tc\n1\t2\t3\n4\t5\t6\n")]
    fn delimiters(#[case] delimiter: char, #[case] tab: bool, #[case] text: &str) {
        let mut reader = DelimitedTextReader::default();
        reader.set_delimiter(delimiter);
        reader.set_use_tab(tab);

        let table = reader.parse_str(text).unwrap();
        assert_eq!(table.names(), vec!["a", "b", "c"]);
        assert_eq!(table.column("c").unwrap().to_f64(), vec![3.0, 6.0]);
    }

    #[test]
    fn synthesised_names() {
        let mut reader = DelimitedTextReader::default();
        reader.set_has_titles(false);

        let table = reader.parse_str("1 2.5\n3 4\n").unwrap();
        assert_eq!(table.names(), vec!["Field 0", "Field 1"]);
        assert_eq!(table.column_at(0).unwrap().element_type(), ElementType::I64);
        assert_eq!(table.column_at(1).unwrap().element_type(), ElementType::F64);
    }

    #[test]
    fn skiprows_before_comments() {
        let mut reader = DelimitedTextReader::default();
        reader.set_skip_rows(2);

        let text = "garbage line\nmore garbage\n! comment\nx y\n1 2\n";
        let table = reader.parse_str(text).unwrap();
        assert_eq!(table.names(), vec!["x", "y"]);
        assert_eq!(table.n_rows(), 1);
    }

    #[test]
    fn xyz_titles_line() {
        let reader = DelimitedTextReader::xyz(Vec::<String>::new());
        let text = "! Easting, Northing, Elevation, Au ppm\n# note\n1 2 3 0.5\n4 5 6 0.7\n";

        let table = reader.parse_str(text).unwrap();
        assert_eq!(table.names(), vec!["Easting", "Northing", "Elevation", "Au ppm"]);
        assert_eq!(table.column("Au ppm").unwrap().to_f64(), vec![0.5, 0.7]);
    }

    #[test]
    fn ragged_row() {
        let reader = DelimitedTextReader::default();
        let err = reader.parse_str("a b\n1 2\n3\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed row on line 3: expected 2 values, found 1"
        );
    }

    #[test]
    fn titles_without_lines() {
        let reader = DelimitedTextReader::default();
        assert!(matches!(reader.parse_str("! only\n"), Err(Error::MissingTitles)));
    }
}
