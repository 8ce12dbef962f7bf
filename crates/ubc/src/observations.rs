//! UBC observation and topography files as point sets

// crate modules
use crate::error::{Error, Result};
use crate::mesh::{next_line, ubc_lines};

// standard library
use std::fmt;
use std::path::Path;

// strata modules
use strata_format::f;
use strata_general::table_to_points;
use strata_grid::{Dataset, FieldAssociation, NumericArray, PointSet, Table};
use strata_parse::{parse_floats, read_text, Line};
use strata_series::{Algorithm, Information, TimeSeries};

// external crates
use log::{debug, warn};

/// The observation file layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservationKind {
    /// Point count then `X Y Z` rows
    Topo,
    /// Point count then `X Y Z Grav Err` rows
    Gravity,
    /// Component list, point count, then one value per component and
    /// optionally one error per component
    GravityGradient,
    /// Inducing field, anomaly projection, point count, then data rows
    Magnetic,
}

impl fmt::Display for ObservationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topo => write!(f, "topography"),
            Self::Gravity => write!(f, "gravity"),
            Self::GravityGradient => write!(f, "gravity gradiometry"),
            Self::Magnetic => write!(f, "magnetic"),
        }
    }
}

/// Cartesian vector from an inclination, declination and magnitude
///
/// Angles are in degrees, inclination positive down from horizontal.
pub fn field_vector(inclination: f64, declination: f64, magnitude: f64) -> [f64; 3] {
    let (i, d) = (inclination.to_radians(), declination.to_radians());
    [
        magnitude * i.cos() * d.cos(),
        magnitude * i.cos() * d.sin(),
        magnitude * i.sin(),
    ]
}

/// Reader for UBC topography, gravity, gravity gradiometry and magnetic
/// observation files
///
/// Every file becomes a point set with one array per data column. With
/// `copy_z` set the Z coordinate is kept as an `Elevation` array, which is
/// the default for topography.
///
/// ```rust
/// # use strata_ubc::{ObservationKind, ObservationReader};
/// # use strata_grid::Dataset;
/// let reader = ObservationReader::new(ObservationKind::Gravity, ["grav.obs"]);
/// let points = reader.parse_str("2\n0 0 0 -1.5 0.1\n10 0 0 -1.2 0.1\n").unwrap();
///
/// assert_eq!(points.n_points(), 2);
/// assert_eq!(points.point_data().names(), vec!["Grav", "Err"]);
/// ```
#[derive(Debug, Clone)]
pub struct ObservationReader {
    kind: ObservationKind,
    series: TimeSeries,
    copy_z: bool,
}

impl ObservationReader {
    pub fn new<I, P>(kind: ObservationKind, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            kind,
            series: TimeSeries::new(files),
            copy_z: kind == ObservationKind::Topo,
        }
    }

    pub fn kind(&self) -> ObservationKind {
        self.kind
    }

    pub fn set_copy_z(&mut self, copy_z: bool) {
        self.copy_z = copy_z;
    }

    pub fn copy_z(&self) -> bool {
        self.copy_z
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) {
        self.series.add_file(path);
    }

    pub fn set_dt(&mut self, dt: f64) {
        self.series.set_dt(dt);
    }

    pub fn parse_str(&self, text: &str) -> Result<PointSet> {
        let lines = ubc_lines(text);
        let mut lines = lines.into_iter();

        match self.kind {
            ObservationKind::Topo => {
                let rows = self.rows(&mut lines)?;
                let names = ["X", "Y", "Z"].map(String::from);
                self.points(&names, &rows, self.copy_z)
            }
            ObservationKind::Gravity => {
                let rows = self.rows(&mut lines)?;
                let names = ["X", "Y", "Z", "Grav", "Err"].map(String::from);
                self.points(&names, &rows, self.copy_z)
            }
            ObservationKind::GravityGradient => self.gravity_gradient(&mut lines),
            ObservationKind::Magnetic => self.magnetic(&mut lines),
        }
    }

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<PointSet> {
        debug!("Reading {} observations from {}", self.kind, path.as_ref().display());
        self.parse_str(&read_text(path)?)
    }

    pub fn read(&self, time: Option<f64>) -> Result<PointSet> {
        self.parse_file(self.series.file_for(time)?)
    }

    /// Point count line followed by the data rows
    fn rows<'a, I>(&self, lines: &mut I) -> Result<Vec<Vec<f64>>>
    where
        I: Iterator<Item = Line<'a>>,
    {
        let line = next_line(lines, "number of observations")?;
        let npts = line
            .1
            .split_whitespace()
            .next()
            .and_then(|t| t.parse::<usize>().ok())
            .ok_or_else(|| {
                Error::ObservationFormat(f!("line {} \"{}\" is not a point count", line.0, line.1))
            })?;

        let rows = lines
            .map(|(n, l)| parse_floats(l, n))
            .collect::<std::result::Result<Vec<Vec<f64>>, _>>()?;

        if rows.len() != npts {
            warn!("File lists {npts} observations but holds {} rows", rows.len());
        }
        Ok(rows)
    }

    /// Build the point set once the column names are known
    fn points(&self, names: &[String], rows: &[Vec<f64>], copy_z: bool) -> Result<PointSet> {
        if let Some(row) = rows.iter().find(|r| r.len() != names.len()) {
            return Err(Error::ObservationFormat(f!(
                "{} data expects {} columns, found {}",
                self.kind,
                names.len(),
                row.len()
            )));
        }

        let columns = names
            .iter()
            .enumerate()
            .map(|(c, name)| NumericArray::new(name.as_str(), rows.iter().map(|r| r[c]).collect::<Vec<f64>>()))
            .collect::<std::result::Result<Vec<NumericArray>, _>>()?;

        let table = Table::from_columns(columns)?;
        Ok(table_to_points(table, copy_z)?)
    }

    fn gravity_gradient<'a, I>(&self, lines: &mut I) -> Result<PointSet>
    where
        I: Iterator<Item = Line<'a>>,
    {
        let line = next_line(lines, "gradient components")?;
        let components = line
            .1
            .split_once('=')
            .map(|(_, c)| {
                c.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<String>>()
            })
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                Error::ObservationFormat(f!("line {} \"{}\" does not list components", line.0, line.1))
            })?;

        let rows = self.rows(lines)?;
        let width = rows.first().map_or(3 + components.len(), |r| r.len());

        let mut names = ["X", "Y", "Z"].map(String::from).to_vec();
        names.extend(components.iter().cloned());
        if width == 3 + 2 * components.len() {
            names.extend(components.iter().map(|c| f!("Stn_{c}")));
        }

        self.points(&names, &rows, self.copy_z)
    }

    fn magnetic<'a, I>(&self, lines: &mut I) -> Result<PointSet>
    where
        I: Iterator<Item = Line<'a>>,
    {
        let mut header = |what: &'static str| -> Result<[f64; 3]> {
            let line = next_line(lines, what)?;
            match parse_floats(line.1, line.0)?.as_slice() {
                [a, b, c, ..] => Ok([*a, *b, *c]),
                _ => Err(Error::ObservationFormat(f!(
                    "line {} \"{}\" does not hold the {what}",
                    line.0,
                    line.1
                ))),
            }
        };

        let [incl, decl, geomag] = header("inducing field")?;
        let [ainc, adec, _] = header("anomaly projection")?;

        let rows = self.rows(lines)?;
        let width = rows.first().map_or(4, |r| r.len());

        let mut copy_z = self.copy_z;
        let data: &[&str] = match width {
            3 => {
                copy_z = true;
                &[]
            }
            4 => &["Mag"],
            5 => &["Mag", "Err"],
            7 => &["ainc_1", "ainc_2", "Mag", "Err"],
            n => {
                return Err(Error::ObservationFormat(f!(
                    "magnetic data expects 3, 4, 5 or 7 columns, found {n}"
                )))
            }
        };

        let mut names = ["X", "Y", "Z"].map(String::from).to_vec();
        names.extend(data.iter().map(|s| s.to_string()));
        let mut points = self.points(&names, &rows, copy_z)?;

        let inducing = field_vector(incl, decl, geomag);
        let projection = field_vector(ainc, adec, 1.0);
        for (name, vector) in [("Inducing Magnetic Field", inducing), ("Anomaly Projection", projection)] {
            let array = NumericArray::with_components(name, 3, vector.to_vec())?;
            points.add_array(FieldAssociation::FieldData, array)?;
        }

        Ok(points)
    }
}

impl Algorithm for ObservationReader {
    type Input = ();
    type Output = PointSet;
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("point set").with_series(&self.series))
    }

    fn request_data(&mut self, _: &(), time: Option<f64>) -> Result<PointSet> {
        self.read(time)
    }
}
