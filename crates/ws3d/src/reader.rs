// crate modules
use crate::error::Result;
use crate::mesh::parse_ws3d;

// standard library
use std::path::Path;

// strata modules
use strata_grid::StructuredGrid;
use strata_parse::read_text;
use strata_series::{Algorithm, Information, TimeSeries};

// external crates
use log::info;

/// Reader for ws3dinv mesh and model files
///
/// Each file holds both the mesh and the model, so a series of files is a
/// model evolving on a fixed mesh.
///
/// ```rust
/// # use strata_ws3d::WsMeshReader;
/// let mut reader = WsMeshReader::new(["iter01.ws", "iter02.ws"]);
/// reader.set_origin([1000.0, 2000.0, 0.0]);
/// reader.set_angle(30.0);
///
/// assert_eq!(reader.origin(), [1000.0, 2000.0, 0.0]);
/// assert_eq!(reader.series().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WsMeshReader {
    series: TimeSeries,
    origin: [f64; 3],
    angle: f64,
}

impl WsMeshReader {
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

    /// Global coordinates of the top centre of the mesh
    pub fn set_origin(&mut self, origin: [f64; 3]) {
        self.origin = origin;
    }

    pub fn origin(&self) -> [f64; 3] {
        self.origin
    }

    /// Clockwise rotation about the vertical in degrees
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    pub fn angle(&self) -> f64 {
        self.angle
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

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<StructuredGrid> {
        let path = path.as_ref();
        let grid = parse_ws3d(&read_text(path)?, self.origin, self.angle)?;
        info!("Read {} ws3dinv grid from {}", grid.dims(), path.display());
        Ok(grid)
    }

    pub fn read(&self, time: Option<f64>) -> Result<StructuredGrid> {
        self.parse_file(self.series.file_for(time)?)
    }
}

impl Algorithm for WsMeshReader {
    type Input = ();
    type Output = StructuredGrid;
    type Error = crate::Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("structured grid").with_series(&self.series))
    }

    fn request_data(&mut self, _: &(), time: Option<f64>) -> Result<StructuredGrid> {
        self.read(time)
    }
}
