// crate modules
use crate::error::{Error, Result};
use crate::header::{ArrayEntry, PvgpHeader};

// standard library
use std::collections::BTreeMap;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// strata modules
use strata_format::f;
use strata_grid::{ArrayData, Dataset, MemoryOrder, NumericArray, UniformGrid};
use strata_parse::{pack, Dtype, Endian};
use strata_series::{Algorithm, Information};
use strata_utils::write_atomic;

// external crates
use log::{debug, info, warn};

/// Writes a uniform grid as a self-contained PVGP file
///
/// Point arrays are written in grid order, which is `F` order over the
/// point dimensions. Arrays with no packed equivalent are widened to
/// `float64`, text arrays are skipped and vector arrays are split into one
/// scalar array per component.
#[derive(Debug, Clone)]
pub struct PvgpWriter {
    path: PathBuf,
    endian: Endian,
}

impl PvgpWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            endian: Endian::Native,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Header describing the grid with every array encoded inline
    pub fn header(&self, grid: &UniformGrid) -> PvgpHeader {
        let mut data_arrays = BTreeMap::new();
        for array in grid.point_data() {
            if matches!(array.data(), ArrayData::Char(_)) {
                warn!("Skipping text array \"{}\"", array.name());
                continue;
            }
            for (name, data) in split_components(array) {
                let (dtype, bytes) = match Dtype::of(data.element_type()) {
                    Some(dtype) => (dtype, pack(&data, self.endian)),
                    None => {
                        warn!("Writing {} array \"{name}\" as float64", data.element_type());
                        (Dtype::F64, pack(&ArrayData::F64(data.to_f64()), self.endian))
                    }
                };
                data_arrays.insert(name, ArrayEntry::inline(dtype, &bytes));
            }
        }

        if !grid.cell_data().is_empty() {
            warn!("PVGP grids only hold point data, cell arrays are not written");
        }

        let basename = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let original_path = self
            .path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        PvgpHeader {
            basename,
            extent: grid.dims().as_array(),
            spacing: grid.spacing(),
            origin: grid.origin(),
            order: MemoryOrder::F.to_string(),
            endian: self.endian.to_string(),
            num_arrays: data_arrays.len(),
            original_path,
            data_arrays,
        }
    }

    pub fn write_to<W: Write>(&self, grid: &UniformGrid, stream: W) -> Result<()> {
        self.header(grid).to_writer(stream)
    }

    pub fn write(&self, grid: &UniformGrid) -> Result<()> {
        write_atomic(&self.path, |file| -> Result<()> {
            let mut stream = BufWriter::new(file);
            self.write_to(grid, &mut stream)?;
            stream.flush()?;
            Ok(())
        })?;
        info!("Written grid to {}", self.path.display());
        Ok(())
    }
}

/// One scalar array per component, `name_0`, `name_1`, ... for vectors
fn split_components(array: &NumericArray) -> Vec<(String, ArrayData)> {
    let n = array.components();
    if n == 1 {
        return vec![(array.name().to_string(), array.data().clone())];
    }
    debug!("Splitting \"{}\" into {n} scalar arrays", array.name());
    (0..n)
        .map(|k| {
            let index = (0..array.len()).map(|t| t * n + k).collect::<Vec<usize>>();
            (f!("{}_{k}", array.name()), array.data().gather(&index))
        })
        .collect()
}

impl Algorithm for PvgpWriter {
    type Input = UniformGrid;
    type Output = ();
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("file"))
    }

    fn request_data(&mut self, grid: &UniformGrid, _: Option<f64>) -> Result<()> {
        self.write(grid)
    }
}
