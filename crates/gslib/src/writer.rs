//! GSLIB and SGeMS writers

// crate modules
use crate::error::{Error, Result};

// standard library
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// strata modules
use strata_format::{f, NumberFormat};
use strata_grid::{Dataset, ElementType, NumericArray, Table, UniformGrid};
use strata_series::{Algorithm, Information};
use strata_utils::write_atomic;

// external crates
use log::{debug, warn};

/// Header written when none is given
pub const DEFAULT_HEADER: &str = "Data saved by PVGeo";

/// Writes the columns of a table in GSLIB format
///
/// ```rust
/// # use strata_gslib::GslibWriter;
/// # use strata_grid::{NumericArray, Table};
/// let table = Table::from_columns([
///     NumericArray::new("A", vec![1.0, 2.0]).unwrap(),
///     NumericArray::new("B", vec![-0.5, 0.25]).unwrap(),
/// ])
/// .unwrap();
///
/// let mut writer = GslibWriter::new("unused.gslib");
/// writer.set_header("demo");
/// writer.set_format("%.2f").unwrap();
///
/// let mut buffer = Vec::new();
/// writer.write_to(&table, &mut buffer).unwrap();
/// assert_eq!(
///     String::from_utf8(buffer).unwrap(),
///     "demo\n2\nA\nB\n1.00 -0.50\n2.00 0.25\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct GslibWriter {
    path: PathBuf,
    header: String,
    format: Option<NumberFormat>,
}

impl GslibWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            header: DEFAULT_HEADER.to_string(),
            format: None,
        }
    }

    pub fn set_header<S: Into<String>>(&mut self, header: S) {
        self.header = header.into();
    }

    /// printf-style number format for every column
    ///
    /// Without one, float columns use `%.9e` and integer columns are written
    /// as plain integers so they read back as integers.
    pub fn set_format(&mut self, format: &str) -> Result<()> {
        self.format = Some(format.parse()?);
        Ok(())
    }

    pub fn write_to<W: Write>(&self, table: &Table, stream: W) -> Result<()> {
        let columns = table.columns().iter().collect::<Vec<&NumericArray>>();
        write_columns(stream, &self.header, &columns, self.format.as_ref())
    }

    pub fn write(&self, table: &Table) -> Result<()> {
        debug!("Writing GSLIB table to {}", self.path.display());
        write_atomic(&self.path, |file| self.write_to(table, file))
    }
}

impl Algorithm for GslibWriter {
    type Input = Table;
    type Output = ();
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("file"))
    }

    fn request_data(&mut self, input: &Table, _: Option<f64>) -> Result<()> {
        self.write(input)
    }
}

/// Writes the point data of a uniform grid in SGeMS format
///
/// The header line holds the point dimensions of the grid.
#[derive(Debug, Clone)]
pub struct SgemsWriter {
    path: PathBuf,
    format: Option<NumberFormat>,
}

impl SgemsWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format: None,
        }
    }

    /// printf-style number format, see [GslibWriter::set_format]
    pub fn set_format(&mut self, format: &str) -> Result<()> {
        self.format = Some(format.parse()?);
        Ok(())
    }

    pub fn write_to<W: Write>(&self, grid: &UniformGrid, stream: W) -> Result<()> {
        let [nx, ny, nz] = grid.dims().as_array();
        let columns = grid.point_data().iter().collect::<Vec<&NumericArray>>();
        if !grid.cell_data().is_empty() {
            warn!("SGeMS output only holds point data, cell arrays are dropped");
        }
        write_columns(stream, &f!("{nx} {ny} {nz}"), &columns, self.format.as_ref())
    }

    pub fn write(&self, grid: &UniformGrid) -> Result<()> {
        debug!("Writing SGeMS grid to {}", self.path.display());
        write_atomic(&self.path, |file| self.write_to(grid, file))
    }
}

impl Algorithm for SgemsWriter {
    type Input = UniformGrid;
    type Output = ();
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("file"))
    }

    fn request_data(&mut self, input: &UniformGrid, _: Option<f64>) -> Result<()> {
        self.write(input)
    }
}

/// Header, column count, names and rows
fn write_columns<W: Write>(
    stream: W,
    header: &str,
    columns: &[&NumericArray],
    format: Option<&NumberFormat>,
) -> Result<()> {
    let columns = columns
        .iter()
        .filter(|c| {
            let numeric = c.element_type() != ElementType::Char;
            if !numeric {
                warn!("Skipping character array \"{}\"", c.name());
            }
            numeric
        })
        .collect::<Vec<_>>();

    let mut names = Vec::new();
    for column in &columns {
        match column.components() {
            1 => names.push(column.name().to_string()),
            n => names.extend((0..n).map(|c| f!("{}_{c}", column.name()))),
        }
    }

    let mut writer = BufWriter::new(stream);
    writeln!(writer, "{header}")?;
    writeln!(writer, "{}", names.len())?;
    for name in &names {
        writeln!(writer, "{name}")?;
    }

    let rows = columns.first().map_or(0, |c| c.len());
    for row in 0..rows {
        let values = columns
            .iter()
            .flat_map(|c| (0..c.components()).map(move |k| format_value(c, row, k, format)))
            .collect::<Vec<String>>();
        writeln!(writer, "{}", values.join(" "))?;
    }

    writer.flush()?;
    Ok(())
}

fn format_value(
    array: &NumericArray,
    tuple: usize,
    component: usize,
    format: Option<&NumberFormat>,
) -> String {
    let value = array.value(tuple, component);
    match (format, array.element_type().is_float()) {
        (Some(format), true) => format.format_f64(value),
        (Some(format), false) => format.format_i64(value as i64),
        (None, true) => NumberFormat::default().format_f64(value),
        (None, false) => f!("{}", value as i64),
    }
}

#[cfg(test)]
mod writer_tests {
    use super::*;
    use strata_grid::{Extent, FieldAssociation};

    #[test]
    fn sgems_header_uses_point_dims() {
        let mut grid = UniformGrid::new(Extent::new(2, 1, 1), [0.0; 3], [1.0; 3]).unwrap();
        grid.add_array(
            FieldAssociation::PointData,
            NumericArray::new("v", vec![1i32, 2]).unwrap(),
        )
        .unwrap();

        let mut writer = SgemsWriter::new("unused.sgems");
        writer.set_format("%d").unwrap();

        let mut buffer = Vec::new();
        writer.write_to(&grid, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "2 1 1\n1\nv\n1\n2\n");
    }

    #[test]
    fn integers_stay_integers() {
        let table = Table::from_columns([
            NumericArray::new("facies", vec![3i32, -1]).unwrap(),
            NumericArray::new("grade", vec![0.25, 2.0]).unwrap(),
        ])
        .unwrap();

        let mut buffer = Vec::new();
        GslibWriter::new("unused").write_to(&table, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Data saved by PVGeo\n2\nfacies\ngrade\n3 2.500000000e-01\n-1 2.000000000e+00\n"
        );
    }

    #[test]
    fn default_header() {
        let table = Table::from_columns([NumericArray::new("A", vec![1.0]).unwrap()]).unwrap();
        let mut buffer = Vec::new();
        GslibWriter::new("unused").write_to(&table, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Data saved by PVGeo\n1\nA\n1.000000000e+00\n"
        );
    }
}
