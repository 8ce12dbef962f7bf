// crate modules
use crate::error::{Error, Result};
use crate::header::{default_array_name, PvgpHeader};

// standard library
use std::path::{Path, PathBuf};

// strata modules
use strata_grid::{
    build_uniform, table_to_grid, AxisConvention, Extent, Layout, NumericArray, Table, UniformGrid,
};
use strata_parse::unpack;
use strata_series::{Algorithm, ExtentGuard, Information, TimeSeries};

// external crates
use log::{debug, warn};

/// Reader for PVGP uniform grid files
///
/// Arrays become point data on a uniform grid. Legacy files look for their
/// array files next to the header first, then in the directory stored in the
/// header, unless a data directory is set.
#[derive(Debug, Clone, Default)]
pub struct PvgpGridReader {
    series: TimeSeries,
    data_dir: Option<PathBuf>,
    guard: ExtentGuard,
}

impl PvgpGridReader {
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

    /// Directory holding the array files of legacy headers
    pub fn set_data_dir<P: AsRef<Path>>(&mut self, dir: P) {
        self.data_dir = Some(dir.as_ref().to_path_buf());
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) {
        self.series.add_file(path);
        self.guard.reset();
    }

    pub fn set_dt(&mut self, dt: f64) {
        self.series.set_dt(dt);
    }

    /// Point counts of the first file, without decoding any arrays
    pub fn read_extent(&self) -> Result<Extent> {
        let path = self.series.file_for(None)?;
        Ok(PvgpHeader::from_file(path)?.extent())
    }

    fn data_dir_for(&self, path: &Path, header: &PvgpHeader) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        match path.parent() {
            Some(dir) if dir.exists() => dir.to_path_buf(),
            _ => header.original_dir().to_path_buf(),
        }
    }

    /// Read one file outside of any series
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<UniformGrid> {
        let path = path.as_ref();
        let header = PvgpHeader::from_file(path)?;
        let dir = self.data_dir_for(path, &header);
        grid_from_header(&header, &dir)
    }

    /// Read the file for the requested time
    pub fn read(&self, time: Option<f64>) -> Result<UniformGrid> {
        self.parse_file(self.series.file_for(time)?)
    }

    /// As [read()](PvgpGridReader::read), rejecting files whose extent
    /// differs from the first file of the series
    pub fn read_checked(&mut self, time: Option<f64>) -> Result<UniformGrid> {
        if !self.guard.is_seeded() && self.series.index_for(time) != 0 {
            self.guard.check(self.read_extent()?)?;
        }
        let grid = self.read(time)?;
        self.guard.check(grid.dims())?;
        Ok(grid)
    }
}

/// Read a single PVGP file
///
/// Legacy payload files are looked up next to the header, then in its
/// `originalPath`.
pub fn read_pvgp_grid<P: AsRef<Path>>(path: P) -> Result<UniformGrid> {
    let path = path.as_ref();
    PvgpGridReader::new([path]).parse_file(path)
}

/// Decode every array of a header onto its grid
pub fn grid_from_header(header: &PvgpHeader, dir: &Path) -> Result<UniformGrid> {
    let extent = header.extent();
    let endian = header.endian()?;
    let order = header.memory_order()?;

    if header.num_arrays != header.data_arrays.len() {
        warn!(
            "Header lists {} arrays but holds {}",
            header.num_arrays,
            header.data_arrays.len()
        );
    }

    let mut columns = Vec::with_capacity(header.data_arrays.len());
    for (i, (name, entry)) in header.data_arrays.iter().enumerate() {
        let bytes = entry.bytes(dir).or_else(|e| match &entry.file_name {
            Some(file) if dir != header.original_dir() => {
                debug!("{file} not in {}, trying {}", dir.display(), header.original_path);
                entry.bytes(header.original_dir())
            }
            _ => Err(e),
        })?;
        let data = unpack(&bytes, entry.dtype()?, endian)?;
        debug!("Decoded {} values of {name}", data.len());
        let name = match name.is_empty() {
            true => default_array_name(i),
            false => name.clone(),
        };
        columns.push(NumericArray::new(name, data)?);
    }

    if columns.is_empty() {
        warn!("{} holds no arrays", header.basename);
        return Ok(build_uniform(extent, header.origin, header.spacing)?);
    }

    let table = Table::from_columns(columns)?;
    let layout = Layout::new(order, AxisConvention::Cartesian, false);
    Ok(table_to_grid(&table, extent, header.spacing, header.origin, layout)?)
}

impl Algorithm for PvgpGridReader {
    type Input = ();
    type Output = UniformGrid;
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("uniform grid")
            .with_extent(self.read_extent()?)
            .with_series(&self.series))
    }

    fn request_data(&mut self, _: &(), time: Option<f64>) -> Result<UniformGrid> {
        self.read_checked(time)
    }
}
