//! SGeMS uniform grids

// crate modules
use crate::error::{Error, Result};
use crate::reader::GslibReader;

// standard library
use std::path::Path;

// strata modules
use strata_grid::{build_from_parsed, DataObject, Extent, ParsedFile, ParsedKind, UniformGrid};
use strata_parse::read_text;
use strata_series::{Algorithm, ExtentGuard, Information};

// external crates
use log::debug;

// nom parser combinators
use nom::bytes::complete::take_until;
use nom::character::complete::{char, digit1, multispace1};
use nom::combinator::map_res;
use nom::sequence::{delimited, preceded, tuple};
use nom::IResult;

/// Value SGeMS writes for missing samples
pub const SGEMS_MASK: f64 = -9966699.0;

/// Reader for SGeMS grid files
///
/// The header line gives the sample counts, either as `n1 n2 n3` or as
/// `name (n1xn2xn3)`. Columns are attached as point data of a uniform grid
/// with those dimensions, X varying fastest. Every occurrence of the mask
/// value becomes NaN unless the mask is turned off.
///
/// All files of a series must have the dimensions of the first file, whichever
/// step is read first.
#[derive(Debug, Clone)]
pub struct SgemsGridReader {
    reader: GslibReader,
    origin: [f64; 3],
    spacing: [f64; 3],
    mask: Option<f64>,
    guard: ExtentGuard,
}

impl Default for SgemsGridReader {
    fn default() -> Self {
        Self {
            reader: GslibReader::default(),
            origin: [0.0; 3],
            spacing: [1.0; 3],
            mask: Some(SGEMS_MASK),
            guard: ExtentGuard::new(),
        }
    }
}

impl SgemsGridReader {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            reader: GslibReader::new(files),
            ..Default::default()
        }
    }

    /// Shared GSLIB settings, for comments and skipped rows
    pub fn reader_mut(&mut self) -> &mut GslibReader {
        &mut self.reader
    }

    pub fn set_origin(&mut self, origin: [f64; 3]) {
        self.origin = origin;
    }

    pub fn set_spacing(&mut self, spacing: [f64; 3]) {
        self.spacing = spacing;
    }

    /// Value replaced by NaN, `None` to keep every value
    pub fn set_mask(&mut self, mask: Option<f64>) {
        self.mask = mask;
    }

    pub fn mask(&self) -> Option<f64> {
        self.mask
    }

    pub fn header(&self) -> Option<&str> {
        self.reader.header()
    }

    /// Append a file, forgetting the recorded dimensions
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) {
        self.reader.series_mut().add_file(path);
        self.guard.reset();
    }

    pub fn set_dt(&mut self, dt: f64) {
        self.reader.series_mut().set_dt(dt);
    }

    /// Dimensions declared by the first file, without reading any data
    pub fn read_extent(&self) -> Result<Extent> {
        let path = self.reader.series().file_for(None)?;
        let text = read_text(path)?;
        let header = text.lines().nth(self.reader.skiprows()).unwrap_or_default();
        parse_sgems_header(header)
    }

    /// Build a grid from the contents of a single file
    pub fn parse_str(&self, text: &str) -> Result<UniformGrid> {
        let parsed = self.reader.parse_str(text)?;
        let extent = header_extent(&parsed)?;
        self.grid_from(parsed, extent)
    }

    /// Read the file nearest the requested time
    pub fn read(&mut self, time: Option<f64>) -> Result<UniformGrid> {
        if !self.guard.is_seeded() && self.reader.series().index_for(time) != 0 {
            self.guard.check(self.read_extent()?)?;
        }
        let parsed = self.reader.read_parsed(time)?;
        let extent = header_extent(&parsed)?;
        self.guard.check(extent)?;
        debug!("SGeMS grid of {extent} samples");
        self.grid_from(parsed, extent)
    }

    fn grid_from(&self, mut parsed: ParsedFile, extent: Extent) -> Result<UniformGrid> {
        parsed.kind = ParsedKind::UniformGrid;
        parsed.extent = Some(extent);
        parsed.origin = Some(self.origin);
        parsed.spacing = Some(self.spacing);

        if let Some(mask) = self.mask {
            parsed.columns = parsed.columns.into_iter().map(|c| c.masked(mask)).collect();
        }

        match build_from_parsed(parsed)? {
            DataObject::Uniform(grid) => Ok(grid),
            other => Err(Error::NotSGeMSGrid(other.kind().to_string())),
        }
    }
}

impl Algorithm for SgemsGridReader {
    type Input = ();
    type Output = UniformGrid;
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        let extent = self.read_extent()?;
        Ok(Information::new("uniform grid")
            .with_extent(extent)
            .with_series(self.reader.series()))
    }

    fn request_data(&mut self, _: &(), time: Option<f64>) -> Result<UniformGrid> {
        self.read(time)
    }
}

fn dimension(i: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(i)
}

/// `(n1xn2xn3)` somewhere in the line
fn bracketed(i: &str) -> IResult<&str, (usize, usize, usize)> {
    let (i, _) = take_until("(")(i)?;
    let (i, (n1, _, n2, _, n3)) = delimited(
        char('('),
        tuple((dimension, char('x'), dimension, char('x'), dimension)),
        char(')'),
    )(i)?;
    Ok((i, (n1, n2, n3)))
}

/// `n1 n2 n3` at the start of a token
fn spaced(i: &str) -> IResult<&str, (usize, usize, usize)> {
    let (i, (n1, n2, n3)) = tuple((
        dimension,
        preceded(multispace1, dimension),
        preceded(multispace1, dimension),
    ))(i)?;
    Ok((i, (n1, n2, n3)))
}

fn header_extent(parsed: &ParsedFile) -> Result<Extent> {
    parse_sgems_header(parsed.header_lines.first().map_or("", |h| h.as_str()))
}

/// Sample counts declared in an SGeMS header line
///
/// ```rust
/// # use strata_gslib::parse_sgems_header;
/// # use strata_grid::Extent;
/// assert_eq!(parse_sgems_header("150 200 20").unwrap(), Extent::new(150, 200, 20));
/// assert_eq!(parse_sgems_header("porosity (10x20x3)").unwrap(), Extent::new(10, 20, 3));
/// assert!(parse_sgems_header("Data saved by PVGeo").is_err());
/// ```
pub fn parse_sgems_header(header: &str) -> Result<Extent> {
    let not_sgems = || Error::NotSGeMSGrid(header.trim().to_string());

    if let Ok((_, (n1, n2, n3))) = bracketed(header) {
        return Ok(Extent::new(n1, n2, n3));
    }

    // three integers in a row, starting at any token
    let mut rest = header.trim_start();
    while !rest.is_empty() {
        if let Ok((_, (n1, n2, n3))) = spaced(rest) {
            return Ok(Extent::new(n1, n2, n3));
        }
        rest = match rest.find(char::is_whitespace) {
            Some(idx) => rest[idx..].trim_start(),
            None => "",
        };
    }

    Err(not_sgems())
}
