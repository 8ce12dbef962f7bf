//! Packed binary and Madagascar single-stream readers

// crate modules
use crate::error::{Error, Result};

// standard library
use std::path::Path;

// strata modules
use strata_grid::{NumericArray, Table};
use strata_parse::{read_madagascar, read_packed, Dtype, Endian};
use strata_series::{Algorithm, Information, TimeSeries};

// external crates
use log::debug;

/// Reader for files holding a single packed array
///
/// Produces a one column table. The column is named after the file stem
/// unless a name is set. The Madagascar variant discards everything up to
/// the `EOL EOL EOT` header sentinel first.
///
/// ```rust
/// # use strata_general::PackedBinaryReader;
/// # use strata_parse::{Dtype, Endian};
/// let mut reader = PackedBinaryReader::new(["velocity.bin"]);
/// reader.set_dtype(Dtype::F64);
/// reader.set_endian(Endian::Little);
///
/// assert_eq!(reader.data_name_for("path/to/velocity.bin"), "velocity");
/// reader.set_data_name("Vp");
/// assert_eq!(reader.data_name_for("path/to/velocity.bin"), "Vp");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackedBinaryReader {
    series: TimeSeries,
    dtype: Dtype,
    endian: Endian,
    data_name: Option<String>,
    madagascar: bool,
}

impl PackedBinaryReader {
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

    /// Reader for Madagascar single-stream files
    pub fn madagascar<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            madagascar: true,
            ..Self::new(files)
        }
    }

    pub fn set_dtype(&mut self, dtype: Dtype) {
        self.dtype = dtype;
    }

    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn set_data_name<S: Into<String>>(&mut self, name: S) {
        self.data_name = Some(name.into());
    }

    /// Go back to naming the column after the file
    pub fn clear_data_name(&mut self) {
        self.data_name = None;
    }

    /// Column name used for a file
    pub fn data_name_for<P: AsRef<Path>>(&self, path: P) -> String {
        match &self.data_name {
            Some(name) => name.clone(),
            None => path
                .as_ref()
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Data".to_string()),
        }
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

    /// Parse a single file, outside of any series
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Table> {
        let path = path.as_ref();
        debug!("Reading {} values from {}", self.dtype, path.display());

        let data = if self.madagascar {
            read_madagascar(path, self.dtype, self.endian)?
        } else {
            read_packed(path, self.dtype, self.endian)?
        };

        let column = NumericArray::new(self.data_name_for(path), data)?;
        Ok(Table::from_columns([column])?)
    }

    /// Read the file nearest the requested time
    pub fn read(&self, time: Option<f64>) -> Result<Table> {
        self.parse_file(self.series.file_for(time)?)
    }
}

impl Algorithm for PackedBinaryReader {
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
