//! Cell centres and cell data written as delimited text

// crate modules
use crate::error::{Error, Result};

// standard library
use std::io::Write;
use std::path::{Path, PathBuf};

// strata modules
use strata_format::{f, NumberFormat};
use strata_grid::{DataObject, Dataset, ElementType, NumericArray};
use strata_series::{Algorithm, Information};
use strata_utils::write_atomic;

// external crates
use log::{debug, warn};

/// Writes the centre of every cell followed by the cell arrays
///
/// The header row is `X,Y,Z` and the array names, with the delimiter in any
/// name replaced by `_` (or `-` when the delimiter is `_`). Values use a
/// printf-style format, `%.9e` by default. Character arrays are skipped and
/// multi-component arrays get one column per component.
#[derive(Debug, Clone)]
pub struct CellCenterWriter {
    path: PathBuf,
    delimiter: u8,
    format: NumberFormat,
}

impl CellCenterWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
            format: NumberFormat::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_delimiter(&mut self, delimiter: u8) {
        self.delimiter = delimiter;
    }

    /// Set the numeric format from a printf-style string, e.g. `%.6f`
    pub fn set_format(&mut self, format: &str) -> Result<()> {
        self.format = format.parse()?;
        Ok(())
    }

    /// Header names for a dataset
    pub fn header(&self, dataset: &dyn Dataset) -> Vec<String> {
        let delimiter = char::from(self.delimiter);
        let replacement = if delimiter == '_' { "-" } else { "_" };

        let mut names = vec!["X".to_string(), "Y".to_string(), "Z".to_string()];
        for array in written_arrays(dataset) {
            let name = array.name().replace(delimiter, replacement);
            match array.components() {
                1 => names.push(name),
                n => names.extend((0..n).map(|c| f!("{name}{replacement}{c}"))),
            }
        }
        names
    }

    /// Write to any stream
    pub fn write_to<W: Write>(&self, dataset: &dyn Dataset, stream: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(stream);

        writer.write_record(self.header(dataset))?;

        let arrays = written_arrays(dataset);
        for (i, centre) in dataset.cell_centers().iter().enumerate() {
            let mut record = centre
                .iter()
                .map(|v| self.format.format_f64(*v))
                .collect::<Vec<String>>();
            for array in &arrays {
                record.extend((0..array.components()).map(|c| self.format_value(array, i, c)));
            }
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Write a dataset to the configured path
    pub fn write(&self, dataset: &dyn Dataset) -> Result<()> {
        debug!("Writing {} cell centres to {}", dataset.n_cells(), self.path.display());
        write_atomic(&self.path, |file| self.write_to(dataset, file))
    }

    fn format_value(&self, array: &NumericArray, tuple: usize, component: usize) -> String {
        match array.element_type() {
            ElementType::F32 | ElementType::F64 => {
                self.format.format_f64(array.value(tuple, component))
            }
            _ => self.format.format_i64(array.value(tuple, component) as i64),
        }
    }
}

impl Algorithm for CellCenterWriter {
    type Input = DataObject;
    type Output = ();
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("file"))
    }

    fn request_data(&mut self, input: &DataObject, _: Option<f64>) -> Result<()> {
        let dataset = input.as_dataset().ok_or(Error::NotADataset(input.kind()))?;
        self.write(dataset)
    }
}

fn written_arrays(dataset: &dyn Dataset) -> Vec<&NumericArray> {
    dataset
        .cell_data()
        .iter()
        .filter(|a| {
            let keep = a.element_type() != ElementType::Char;
            if !keep {
                warn!("Skipping character array \"{}\"", a.name());
            }
            keep
        })
        .collect()
}
